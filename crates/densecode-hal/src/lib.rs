//! Backend abstraction layer for densecode.
//!
//! The HAL separates "what to run" from "where it runs":
//! - a common [`Backend`] trait for job submission and management
//! - [`Capabilities`] describing what a backend accepts
//! - [`ExecutionResult`] and [`Counts`] for measurement results
//!
//! # Example: Running a Circuit
//!
//! ```ignore
//! use densecode_hal::Backend;
//! use densecode_adapter_sim::SimulatorBackend;
//! use densecode_ir::Circuit;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let circuit = Circuit::bell()?;
//!     let backend = SimulatorBackend::new();
//!
//!     let job_id = backend.submit(&circuit, 1000).await?;
//!     let result = backend.wait(&job_id).await?;
//!
//!     if let Some((bitstring, count)) = result.counts.most_frequent() {
//!         println!("Most frequent: {bitstring} ({count} times)");
//!     }
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod job;
pub mod result;

pub use backend::{Backend, BackendAvailability, BackendConfig, BackendFactory, ValidationResult};
pub use capability::{Capabilities, GateSet};
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use result::{Counts, ExecutionResult};
