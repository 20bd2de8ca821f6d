//! Backend capability introspection.
//!
//! [`Capabilities`] tells callers what a backend accepts before they submit:
//! register size, gate vocabulary, shot limits, and whether gate noise is
//! modelled.

use densecode_ir::{NoiseProfile, StandardGate};
use serde::{Deserialize, Serialize};

/// Hardware or simulator capabilities of a backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Supported gate set.
    pub gate_set: GateSet,
    /// Maximum number of shots per job.
    pub max_shots: u32,
    /// Whether this is a simulator (`true`) or real hardware (`false`).
    pub is_simulator: bool,
    /// Additional capability flags, e.g. `"density_matrix"` or `"noise"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    /// Gate noise applied during execution, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise_profile: Option<NoiseProfile>,
}

impl Capabilities {
    /// Create capabilities for a noiseless simulator.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            gate_set: GateSet::universal(),
            max_shots: 1_000_000,
            is_simulator: true,
            features: vec!["density_matrix".into()],
            noise_profile: None,
        }
    }

    /// Set the backend name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Attach a gate noise profile.
    #[must_use]
    pub fn with_noise_profile(mut self, profile: NoiseProfile) -> Self {
        if !self.features.iter().any(|f| f == "noise") {
            self.features.push("noise".into());
        }
        self.noise_profile = Some(profile);
        self
    }

    /// Check whether a feature flag is set.
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

/// Gate set supported by a backend, by gate name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateSet {
    /// Single-qubit gates supported.
    pub single_qubit: Vec<String>,
    /// Two-qubit gates supported.
    pub two_qubit: Vec<String>,
}

impl GateSet {
    /// Every gate the IR can express.
    pub fn universal() -> Self {
        let (two_qubit, single_qubit): (Vec<_>, Vec<_>) = StandardGate::ALL
            .into_iter()
            .partition(|g| g.num_qubits() == 2);
        Self {
            single_qubit: single_qubit.iter().map(|g| g.name().to_string()).collect(),
            two_qubit: two_qubit.iter().map(|g| g.name().to_string()).collect(),
        }
    }

    /// Check if a gate is supported.
    pub fn contains(&self, gate: &str) -> bool {
        self.single_qubit.iter().any(|g| g == gate) || self.two_qubit.iter().any(|g| g == gate)
    }
}
