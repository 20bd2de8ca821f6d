//! Density-matrix simulation engine.
//!
//! The state of `n` qubits is a `2^n × 2^n` matrix `ρ`. Qubit `q` is bit `q`
//! of a basis index. Gates evolve `ρ → UρU†`; noise channels
//! evolve `ρ → Σ KρK†`.

use ndarray::Array2;
use num_complex::Complex64;

use crate::gates::{dagger, kraus_operators};
use densecode_ir::{NoiseModel, StandardGate};

/// Probabilities below this are treated as exactly zero.
pub const PROBABILITY_FLOOR: f64 = 1e-12;

/// A mixed quantum state.
#[derive(Debug, Clone)]
pub struct DensityMatrix {
    rho: Array2<Complex64>,
    num_qubits: usize,
}

impl DensityMatrix {
    /// Create a new density matrix initialized to |0...0⟩⟨0...0|.
    pub fn new(num_qubits: usize) -> Self {
        let dim = 1usize << num_qubits;
        let mut rho = Array2::zeros((dim, dim));
        rho[[0, 0]] = Complex64::new(1.0, 0.0);
        Self { rho, num_qubits }
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Hilbert space dimension.
    pub fn dim(&self) -> usize {
        self.rho.nrows()
    }

    /// The underlying matrix.
    pub fn matrix(&self) -> &Array2<Complex64> {
        &self.rho
    }

    /// Lift a local operator on `qubits` to the full space.
    ///
    /// Bit `j` of the local index corresponds to `qubits[j]`; all other
    /// qubits see the identity.
    fn embed(&self, op: &Array2<Complex64>, qubits: &[usize]) -> Array2<Complex64> {
        let dim = self.dim();
        let mask: usize = qubits.iter().map(|&q| 1usize << q).sum();
        let local = |index: usize| -> usize {
            qubits
                .iter()
                .enumerate()
                .map(|(j, &q)| ((index >> q) & 1) << j)
                .sum()
        };

        Array2::from_shape_fn((dim, dim), |(r, c)| {
            if r & !mask == c & !mask {
                op[[local(r), local(c)]]
            } else {
                Complex64::new(0.0, 0.0)
            }
        })
    }

    /// Apply the unitary `op` acting on `qubits`.
    pub fn apply_unitary(&mut self, op: &Array2<Complex64>, qubits: &[usize]) {
        let u = self.embed(op, qubits);
        self.rho = u.dot(&self.rho).dot(&dagger(&u));
    }

    /// Apply a standard gate.
    pub fn apply_gate(&mut self, gate: &StandardGate, qubits: &[usize]) {
        self.apply_unitary(&crate::gates::gate_matrix(gate), qubits);
    }

    /// Apply the channel given by `kraus` acting on `qubits`.
    pub fn apply_kraus(&mut self, kraus: &[Array2<Complex64>], qubits: &[usize]) {
        let dim = self.dim();
        let mut next = Array2::zeros((dim, dim));
        for k in kraus {
            let full = self.embed(k, qubits);
            next += &full.dot(&self.rho).dot(&dagger(&full));
        }
        self.rho = next;
    }

    /// Apply a noise channel acting on `qubits`.
    pub fn apply_noise(&mut self, model: &NoiseModel, qubits: &[usize]) {
        if model.is_identity() {
            return;
        }
        self.apply_kraus(&kraus_operators(model), qubits);
    }

    /// Trace of ρ; 1 for a valid state.
    pub fn trace(&self) -> f64 {
        self.rho.diag().iter().map(|z| z.re).sum()
    }

    /// Probability of each computational basis state.
    ///
    /// Values below [`PROBABILITY_FLOOR`] are clamped to zero, including the
    /// tiny negatives floating-point rounding leaves on the diagonal.
    pub fn probabilities(&self) -> Vec<f64> {
        self.rho
            .diag()
            .iter()
            .map(|z| if z.re < PROBABILITY_FLOOR { 0.0 } else { z.re })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-10;

    #[test]
    fn test_initial_state() {
        let dm = DensityMatrix::new(2);
        assert_eq!(dm.dim(), 4);
        assert!((dm.trace() - 1.0).abs() < EPS);
        assert_eq!(dm.probabilities(), vec![1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_x_on_second_qubit_sets_bit_one() {
        let mut dm = DensityMatrix::new(2);
        dm.apply_gate(&StandardGate::X, &[1]);
        let probs = dm.probabilities();
        assert!((probs[0b10] - 1.0).abs() < EPS);
    }

    #[test]
    fn test_bell_state() {
        let mut dm = DensityMatrix::new(2);
        dm.apply_gate(&StandardGate::H, &[0]);
        dm.apply_gate(&StandardGate::CX, &[0, 1]);

        let probs = dm.probabilities();
        assert!((probs[0b00] - 0.5).abs() < EPS);
        assert!((probs[0b11] - 0.5).abs() < EPS);
        assert!(probs[0b01].abs() < EPS);
        // coherence between |00⟩ and |11⟩ survives
        assert!((dm.matrix()[[0b00, 0b11]].re - 0.5).abs() < EPS);
    }

    #[test]
    fn test_cx_with_reversed_operands() {
        // control on qubit 1, target on qubit 0
        let mut dm = DensityMatrix::new(2);
        dm.apply_gate(&StandardGate::X, &[1]);
        dm.apply_gate(&StandardGate::CX, &[1, 0]);
        assert!((dm.probabilities()[0b11] - 1.0).abs() < EPS);
    }

    #[test]
    fn test_full_depolarizing_gives_maximally_mixed() {
        let mut dm = DensityMatrix::new(2);
        dm.apply_noise(&NoiseModel::depolarizing(1.0, 2), &[0, 1]);
        for p in dm.probabilities() {
            assert!((p - 0.25).abs() < EPS);
        }
        assert!((dm.trace() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_depolarizing_mixes_toward_identity() {
        let mut dm = DensityMatrix::new(1);
        dm.apply_noise(&NoiseModel::depolarizing(0.2, 1), &[0]);
        let probs = dm.probabilities();
        assert!((probs[0] - 0.9).abs() < EPS);
        assert!((probs[1] - 0.1).abs() < EPS);
    }

    #[test]
    fn test_amplitude_damping_relaxes_excited_state() {
        let mut dm = DensityMatrix::new(1);
        dm.apply_gate(&StandardGate::X, &[0]);
        dm.apply_noise(&NoiseModel::amplitude_damping(0.3), &[0]);
        let probs = dm.probabilities();
        assert!((probs[0] - 0.3).abs() < EPS);
        assert!((probs[1] - 0.7).abs() < EPS);
        assert!((dm.trace() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_noise_on_one_qubit_leaves_other_untouched() {
        let mut dm = DensityMatrix::new(2);
        dm.apply_gate(&StandardGate::X, &[1]);
        dm.apply_noise(&NoiseModel::depolarizing(1.0, 1), &[0]);
        let probs = dm.probabilities();
        assert!((probs[0b10] - 0.5).abs() < EPS);
        assert!((probs[0b11] - 0.5).abs() < EPS);
    }
}
