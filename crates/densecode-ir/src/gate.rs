//! Quantum gate types.

use serde::{Deserialize, Serialize};

/// The gates the protocol circuits are built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardGate {
    /// Pauli-X gate.
    X,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,
    /// Controlled-X (CNOT) gate.
    CX,
}

impl StandardGate {
    /// Every supported gate.
    pub const ALL: [StandardGate; 4] = [
        StandardGate::X,
        StandardGate::Z,
        StandardGate::H,
        StandardGate::CX,
    ];

    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::X => "x",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::CX => "cx",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::X | StandardGate::Z | StandardGate::H => 1,
            StandardGate::CX => 2,
        }
    }

    /// Look up a gate by its name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.name() == name)
    }

    /// Number of qubits of the standard gate called `name`, if there is one.
    ///
    /// Used to check noise channels against the gates they are attached to.
    pub fn arity_of(name: &str) -> Option<u32> {
        Self::from_name(name).map(|g| g.num_qubits())
    }

    /// Short symbol used when drawing the gate on a wire.
    pub fn symbol(&self) -> String {
        self.name().to_uppercase()
    }
}
