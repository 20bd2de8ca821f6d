//! Noise channel types and gate-attached noise configuration.
//!
//! A [`NoiseModel`] describes one physical error process. A [`NoiseProfile`]
//! attaches ordered lists of those processes to gate names: every time a
//! simulator executes a gate whose name has an entry, it applies the listed
//! channels to the gate's own qubits, in order, right after the gate.
//!
//! ```rust
//! use densecode_ir::{NoiseModel, NoiseProfile};
//!
//! let mut profile = NoiseProfile::new();
//! profile
//!     .add_all_qubit_error(NoiseModel::depolarizing(0.01, 1), ["h", "x"])
//!     .unwrap();
//! profile
//!     .add_all_qubit_error(NoiseModel::depolarizing(0.02, 2), ["cx"])
//!     .unwrap();
//!
//! assert_eq!(profile.errors_for("h").len(), 1);
//! assert!(profile.errors_for("z").is_empty());
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;

/// A noise channel model.
///
/// Every variant is a CPTP map with a small Kraus representation; parameters
/// are probabilities in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NoiseModel {
    /// Depolarizing channel on `num_qubits` qubits: with probability `p`,
    /// replaces the state of those qubits with the maximally mixed state.
    Depolarizing {
        /// Error probability (0.0 to 1.0).
        p: f64,
        /// Number of qubits the channel acts on jointly.
        num_qubits: u32,
    },

    /// Amplitude damping: models energy relaxation (T1 decay).
    AmplitudeDamping {
        /// Damping parameter (0.0 to 1.0).
        gamma: f64,
    },
}

impl NoiseModel {
    /// Shorthand for a depolarizing channel.
    pub fn depolarizing(p: f64, num_qubits: u32) -> Self {
        NoiseModel::Depolarizing { p, num_qubits }
    }

    /// Shorthand for an amplitude damping channel.
    pub fn amplitude_damping(gamma: f64) -> Self {
        NoiseModel::AmplitudeDamping { gamma }
    }

    /// Get a human-readable name for this noise model.
    pub fn name(&self) -> &'static str {
        match self {
            NoiseModel::Depolarizing { .. } => "depolarizing",
            NoiseModel::AmplitudeDamping { .. } => "amplitude_damping",
        }
    }

    /// Get the primary error parameter of this noise model.
    pub fn error_param(&self) -> f64 {
        match self {
            NoiseModel::Depolarizing { p, .. } => *p,
            NoiseModel::AmplitudeDamping { gamma } => *gamma,
        }
    }

    /// Number of qubits the channel acts on.
    pub fn num_qubits(&self) -> u32 {
        match self {
            NoiseModel::Depolarizing { num_qubits, .. } => *num_qubits,
            NoiseModel::AmplitudeDamping { .. } => 1,
        }
    }

    /// Whether the channel is the identity map.
    pub fn is_identity(&self) -> bool {
        self.error_param() == 0.0
    }

    /// Check the parameter is a probability.
    pub fn validate(&self) -> IrResult<()> {
        let value = self.error_param();
        if !(0.0..=1.0).contains(&value) {
            return Err(IrError::InvalidNoiseParameter {
                channel: self.name().to_string(),
                value,
            });
        }
        if self.num_qubits() == 0 {
            return Err(IrError::InvalidNoiseParameter {
                channel: self.name().to_string(),
                value: 0.0,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for NoiseModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoiseModel::Depolarizing { p, num_qubits } => {
                write!(f, "depolarizing{num_qubits}q(p={p:.4})")
            }
            NoiseModel::AmplitudeDamping { gamma } => {
                write!(f, "amplitude_damping(γ={gamma:.4})")
            }
        }
    }
}

/// Gate-level noise configuration consumed by simulator backends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoiseProfile {
    /// Ordered channels per gate name (e.g., "cx" → [depolarizing2q]).
    #[serde(default)]
    pub gate_errors: BTreeMap<String, Vec<NoiseModel>>,
}

impl NoiseProfile {
    /// Create a new empty noise profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `error` to every listed gate, on whatever qubits the gate acts on.
    ///
    /// A gate that already carries channels gets `error` composed after them.
    /// Fails if the parameter is not a probability or the channel arity does
    /// not match a known gate's arity; the profile is left untouched on error.
    pub fn add_all_qubit_error<I, S>(&mut self, error: NoiseModel, gates: I) -> IrResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        error.validate()?;
        let gates: Vec<String> = gates.into_iter().map(Into::into).collect();
        for gate in &gates {
            check_arity(&error, gate)?;
        }
        for gate in gates {
            self.gate_errors.entry(gate).or_default().push(error.clone());
        }
        Ok(())
    }

    /// Check every attached channel is a valid probability and fits its gate.
    ///
    /// Profiles deserialized from configuration bypass
    /// [`add_all_qubit_error`](Self::add_all_qubit_error) and must pass this
    /// before a simulator uses them.
    pub fn validate(&self) -> IrResult<()> {
        for (gate, errors) in &self.gate_errors {
            for error in errors {
                error.validate()?;
                check_arity(error, gate)?;
            }
        }
        Ok(())
    }

    /// Channels applied after `gate_name`, in order.
    pub fn errors_for(&self, gate_name: &str) -> &[NoiseModel] {
        self.gate_errors
            .get(gate_name)
            .map_or(&[], std::vec::Vec::as_slice)
    }

    /// Gate names that carry at least one channel.
    pub fn noisy_gates(&self) -> impl Iterator<Item = &str> {
        self.gate_errors
            .iter()
            .filter(|(_, errors)| !errors.is_empty())
            .map(|(name, _)| name.as_str())
    }

    /// Check if every attached channel is the identity.
    pub fn is_ideal(&self) -> bool {
        self.gate_errors
            .values()
            .flatten()
            .all(NoiseModel::is_identity)
    }

    /// Check if this profile has any entries at all.
    pub fn is_empty(&self) -> bool {
        self.gate_errors.is_empty()
    }
}

fn check_arity(error: &NoiseModel, gate: &str) -> IrResult<()> {
    match StandardGate::arity_of(gate) {
        Some(arity) if arity != error.num_qubits() => Err(IrError::NoiseArityMismatch {
            channel: error.name().to_string(),
            channel_qubits: error.num_qubits(),
            gate_name: gate.to_string(),
            gate_qubits: arity,
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_model_names() {
        assert_eq!(NoiseModel::depolarizing(0.01, 1).name(), "depolarizing");
        assert_eq!(
            NoiseModel::amplitude_damping(0.02).name(),
            "amplitude_damping"
        );
    }

    #[test]
    fn test_noise_model_display() {
        let m = NoiseModel::depolarizing(0.03, 2);
        assert_eq!(format!("{m}"), "depolarizing2q(p=0.0300)");
    }

    #[test]
    fn test_noise_model_validation() {
        assert!(NoiseModel::depolarizing(0.5, 1).validate().is_ok());
        assert!(NoiseModel::depolarizing(1.5, 1).validate().is_err());
        assert!(NoiseModel::amplitude_damping(-0.1).validate().is_err());
        assert!(NoiseModel::depolarizing(0.1, 0).validate().is_err());
    }

    #[test]
    fn test_profile_composes_in_order() {
        let mut profile = NoiseProfile::new();
        profile
            .add_all_qubit_error(NoiseModel::depolarizing(0.1, 1), ["h", "x", "z"])
            .unwrap();
        profile
            .add_all_qubit_error(NoiseModel::amplitude_damping(0.05), ["h", "x", "z"])
            .unwrap();

        let h = profile.errors_for("h");
        assert_eq!(h.len(), 2);
        assert_eq!(h[0].name(), "depolarizing");
        assert_eq!(h[1].name(), "amplitude_damping");
        assert!(profile.errors_for("cx").is_empty());
        assert_eq!(profile.noisy_gates().count(), 3);
    }

    #[test]
    fn test_profile_rejects_arity_mismatch() {
        let mut profile = NoiseProfile::new();
        let err = profile
            .add_all_qubit_error(NoiseModel::amplitude_damping(0.01), ["cx"])
            .unwrap_err();
        assert!(matches!(err, IrError::NoiseArityMismatch { .. }));
        assert!(profile.is_empty());
    }

    #[test]
    fn test_failed_attach_leaves_profile_unchanged() {
        let mut profile = NoiseProfile::new();
        profile
            .add_all_qubit_error(NoiseModel::amplitude_damping(0.02), ["x"])
            .unwrap();
        let before = profile.clone();

        let err = profile
            .add_all_qubit_error(NoiseModel::depolarizing(0.1, 1), ["h", "cx"])
            .unwrap_err();
        assert!(matches!(
            err,
            IrError::NoiseArityMismatch { ref gate_name, gate_qubits: 2, .. } if gate_name == "cx"
        ));
        assert!(profile.errors_for("h").is_empty());
        assert_eq!(profile, before);
    }

    #[test]
    fn test_validate_checks_deserialized_profiles() {
        let json = r#"{"gate_errors":{"cx":[{"AmplitudeDamping":{"gamma":0.1}}]}}"#;
        let profile: NoiseProfile = serde_json::from_str(json).unwrap();
        assert!(matches!(
            profile.validate(),
            Err(IrError::NoiseArityMismatch { .. })
        ));

        let json = r#"{"gate_errors":{"x":[{"AmplitudeDamping":{"gamma":2.0}}]}}"#;
        let profile: NoiseProfile = serde_json::from_str(json).unwrap();
        assert!(matches!(
            profile.validate(),
            Err(IrError::InvalidNoiseParameter { .. })
        ));

        let mut good = NoiseProfile::new();
        good.add_all_qubit_error(NoiseModel::depolarizing(0.05, 2), ["cx"])
            .unwrap();
        assert!(good.validate().is_ok());
    }

    #[test]
    fn test_profile_ideal_detection() {
        let mut profile = NoiseProfile::new();
        assert!(profile.is_ideal());
        profile
            .add_all_qubit_error(NoiseModel::depolarizing(0.0, 2), ["cx"])
            .unwrap();
        assert!(profile.is_ideal());
        assert!(!profile.is_empty());
        profile
            .add_all_qubit_error(NoiseModel::amplitude_damping(0.01), ["x"])
            .unwrap();
        assert!(!profile.is_ideal());
    }

    #[test]
    fn test_noise_profile_serialization() {
        let mut profile = NoiseProfile::new();
        profile
            .add_all_qubit_error(NoiseModel::depolarizing(0.01, 2), ["cx"])
            .unwrap();

        let json = serde_json::to_string(&profile).unwrap();
        let deserialized: NoiseProfile = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, profile);
    }
}
