//! Superdense coding under imperfect gates.
//!
//! Alice and Bob share a Bell pair. Alice encodes two classical bits by
//! applying X and/or Z to her half and sends it to Bob, who decodes both bits
//! with a CX, an H and two measurements. Here every gate is followed by
//! depolarizing and amplitude-damping noise whose strength scales with one
//! gate-error angle, and the crate reports how often Bob still decodes the
//! right message.
//!
//! # Example
//!
//! ```ignore
//! use densecode_protocol::{report, SuperdenseCoding};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let mut sdc = SuperdenseCoding::from_degrees(5.0)?;
//!     let records = sdc.test_all_cases(2048).await?;
//!     report::print_summary(&records, sdc.error_angle_deg());
//!
//!     let sweep = sdc
//!         .compare_gate_errors("11", &[0.0, 1.0, 2.0, 5.0, 10.0, 15.0], 2048)
//!         .await?;
//!     report::print_comparison("11".parse()?, &sweep);
//!     Ok(())
//! }
//! ```

pub mod circuit;
pub mod config;
pub mod error;
pub mod message;
pub mod noise;
pub mod plot;
pub mod protocol;
pub mod record;
pub mod report;

pub use circuit::{ALICE, BOB, bell_pair, decode, encode, superdense_circuit};
pub use config::SuperdenseConfig;
pub use error::{ProtocolError, ProtocolResult};
pub use message::Message;
pub use noise::{MAX_DAMPING, MAX_SINGLE_QUBIT_ERROR, MAX_TWO_QUBIT_ERROR, NoiseParameters};
pub use protocol::SuperdenseCoding;
pub use record::{ComparisonPoint, FidelityBand, ResultRecord};
