//! Circuit intermediate representation for densecode.
//!
//! The IR is a DAG of instructions over qubit and classical wires, wrapped by
//! the [`Circuit`] builder. It also owns the gate-level noise description
//! ([`NoiseModel`], [`NoiseProfile`]) so that backends and protocol code can
//! share it without depending on each other.
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use densecode_ir::{Circuit, ClbitId, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell_state", 2, 2);
//!
//! // |00⟩ → (|00⟩ + |11⟩)/√2
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure(QubitId(0), ClbitId(0)).unwrap();
//! circuit.measure(QubitId(1), ClbitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 3);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Z` | 1 | Pauli gates |
//! | `CX` | 2 | Controlled-NOT (CNOT) |

pub mod circuit;
pub mod dag;
pub mod draw;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod noise;
pub mod qubit;

pub use circuit::Circuit;
pub use dag::{CircuitDag, DagEdge, DagNode, NodeIndex, WireId};
pub use draw::draw;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use noise::{NoiseModel, NoiseProfile};
pub use qubit::{Bit, Clbit, ClbitId, Qubit, QubitId};
