//! Local density-matrix simulator for densecode.
//!
//! Simulates circuits exactly as mixed states, so gate noise given as a
//! [`NoiseProfile`](densecode_ir::NoiseProfile) is applied as Kraus channels
//! rather than by trajectory sampling. Shot counts are then drawn from the
//! exact outcome distribution.
//!
//! # Features
//!
//! - **Exact mixed-state evolution**: depolarizing, amplitude damping, phase
//!   damping, bit-flip and phase-flip channels after any gate
//! - **Exact outcome probabilities** via [`SimulatorBackend::probabilities`]
//! - **Reproducible sampling** with [`SimulatorBackend::with_seed`]
//!
//! # Performance
//!
//! | Qubits | Matrix entries | Simulation Speed |
//! |--------|----------------|------------------|
//! | 2 | 16 | Instant |
//! | 5 | 1 024 | Instant |
//! | 8 | 65 536 | Moderate |
//!
//! # Example
//!
//! ```ignore
//! use densecode_adapter_sim::SimulatorBackend;
//! use densecode_hal::Backend;
//! use densecode_ir::{Circuit, NoiseModel, NoiseProfile};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut noise = NoiseProfile::new();
//!     noise.add_all_qubit_error(NoiseModel::depolarizing(0.02, 2), ["cx"])?;
//!
//!     let backend = SimulatorBackend::new().with_noise(noise).with_seed(1);
//!     let circuit = Circuit::bell()?;
//!     let job_id = backend.submit(&circuit, 1000).await?;
//!     let result = backend.wait(&job_id).await?;
//!
//!     println!("Results: {:?}", result.counts);
//!     Ok(())
//! }
//! ```

mod density;
mod gates;
mod simulator;

pub use density::{DensityMatrix, PROBABILITY_FLOOR};
pub use gates::{gate_matrix, kraus_operators};
pub use simulator::SimulatorBackend;
