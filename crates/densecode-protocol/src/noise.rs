//! Mapping from a gate-error angle to simulator noise.
//!
//! A single angle `θ` (radians) stands in for calibration error. It scales
//! three channel strengths linearly, each clamped at a cap:
//!
//! | channel                     | gates       | strength           |
//! |-----------------------------|-------------|--------------------|
//! | 1-qubit depolarizing        | `h` `x` `z` | `min(0.10, 2θ)`    |
//! | 2-qubit depolarizing        | `cx`        | `min(0.15, 3θ)`    |
//! | amplitude damping           | `h` `x` `z` | `min(0.05, θ)`     |
//!
//! Amplitude damping follows depolarizing on the single-qubit gates.

use serde::{Deserialize, Serialize};
use tracing::debug;

use densecode_ir::{NoiseModel, NoiseProfile};

use crate::error::{ProtocolError, ProtocolResult};

/// Cap on the single-qubit depolarizing probability.
pub const MAX_SINGLE_QUBIT_ERROR: f64 = 0.10;
/// Cap on the two-qubit depolarizing probability.
pub const MAX_TWO_QUBIT_ERROR: f64 = 0.15;
/// Cap on the amplitude damping parameter.
pub const MAX_DAMPING: f64 = 0.05;

const SINGLE_QUBIT_GATES: [&str; 3] = ["h", "x", "z"];
const TWO_QUBIT_GATES: [&str; 1] = ["cx"];

/// Channel strengths derived from one gate-error angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseParameters {
    /// The angle these were derived from, in radians.
    pub error_angle: f64,
    /// Single-qubit depolarizing probability.
    pub p1: f64,
    /// Two-qubit depolarizing probability.
    pub p2: f64,
    /// Amplitude damping parameter.
    pub gamma: f64,
}

impl NoiseParameters {
    /// Derive channel strengths from an angle in radians.
    pub fn from_error_angle(theta: f64) -> ProtocolResult<Self> {
        if !theta.is_finite() || theta < 0.0 {
            return Err(ProtocolError::InvalidErrorAngle(theta));
        }
        let params = Self {
            error_angle: theta,
            p1: MAX_SINGLE_QUBIT_ERROR.min(2.0 * theta),
            p2: MAX_TWO_QUBIT_ERROR.min(3.0 * theta),
            gamma: MAX_DAMPING.min(theta),
        };
        debug!(
            theta,
            p1 = params.p1,
            p2 = params.p2,
            gamma = params.gamma,
            "derived noise parameters"
        );
        Ok(params)
    }

    /// Derive channel strengths from an angle in degrees.
    pub fn from_degrees(degrees: f64) -> ProtocolResult<Self> {
        if !degrees.is_finite() || degrees < 0.0 {
            return Err(ProtocolError::InvalidErrorAngle(degrees.to_radians()));
        }
        Self::from_error_angle(degrees.to_radians())
    }

    /// The error angle in degrees.
    pub fn error_angle_deg(&self) -> f64 {
        self.error_angle.to_degrees()
    }

    /// True when every channel is the identity.
    pub fn is_ideal(&self) -> bool {
        self.p1 == 0.0 && self.p2 == 0.0 && self.gamma == 0.0
    }

    /// Build the gate noise these parameters describe.
    ///
    /// Zero-strength channels are still recorded; they act as the identity.
    pub fn to_profile(&self) -> ProtocolResult<NoiseProfile> {
        let mut profile = NoiseProfile::new();
        profile.add_all_qubit_error(NoiseModel::depolarizing(self.p1, 1), SINGLE_QUBIT_GATES)?;
        profile.add_all_qubit_error(NoiseModel::depolarizing(self.p2, 2), TWO_QUBIT_GATES)?;
        profile.add_all_qubit_error(NoiseModel::amplitude_damping(self.gamma), SINGLE_QUBIT_GATES)?;
        Ok(profile)
    }
}
