//! Operations placed on circuit wires.

use serde::{Deserialize, Serialize};

use crate::gate::StandardGate;
use crate::qubit::{ClbitId, QubitId};

/// What an instruction does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A unitary gate.
    Gate(StandardGate),
    /// Computational-basis measurement of one qubit into one classical bit.
    Measure,
    /// Stage separator across wires; optionally labelled for drawings.
    Barrier {
        /// Text printed above the barrier column.
        label: Option<String>,
    },
}

/// An operation together with the wires it touches.
///
/// For `cx` the first qubit is the control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The operation.
    pub kind: InstructionKind,
    /// Quantum operands, in gate order.
    pub qubits: Vec<QubitId>,
    /// Classical operands; only measurements have one.
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    /// `gate` on `qubits`. Arity is checked when the instruction joins a DAG.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate),
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// `gate` on one qubit.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// `gate` on two qubits.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Measure `qubit` into `clbit`.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: vec![qubit],
            clbits: vec![clbit],
        }
    }

    /// A barrier over `qubits`.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>, label: Option<String>) -> Self {
        Self {
            kind: InstructionKind::Barrier { label },
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Whether this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure)
    }

    /// Whether this is a barrier.
    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, InstructionKind::Barrier { .. })
    }

    /// Gate name, or `measure`/`barrier`.
    pub fn name(&self) -> &'static str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Measure => "measure",
            InstructionKind::Barrier { .. } => "barrier",
        }
    }
}
