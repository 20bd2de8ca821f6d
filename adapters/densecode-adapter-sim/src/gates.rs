//! Gate and noise-channel matrices.
//!
//! Local operators use little-endian qubit order: bit `j` of a local basis
//! index belongs to the `j`-th qubit operand of the instruction. For `cx`
//! that makes operand 0 (bit 0) the control and operand 1 (bit 1) the target.

use ndarray::{Array2, array};
use num_complex::Complex64;

use densecode_ir::{NoiseModel, StandardGate};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

fn c(re: f64) -> Complex64 {
    Complex64::new(re, 0.0)
}

fn identity(dim: usize) -> Array2<Complex64> {
    Array2::eye(dim)
}

fn pauli_x() -> Array2<Complex64> {
    array![[ZERO, ONE], [ONE, ZERO]]
}

fn pauli_y() -> Array2<Complex64> {
    let i = Complex64::i();
    array![[ZERO, -i], [i, ZERO]]
}

fn pauli_z() -> Array2<Complex64> {
    array![[ONE, ZERO], [ZERO, -ONE]]
}

/// Kronecker product `a ⊗ b`; `b` occupies the low bits of the result index.
pub fn kron(a: &Array2<Complex64>, b: &Array2<Complex64>) -> Array2<Complex64> {
    let (ar, ac) = a.dim();
    let (br, bc) = b.dim();
    Array2::from_shape_fn((ar * br, ac * bc), |(i, j)| {
        a[[i / br, j / bc]] * b[[i % br, j % bc]]
    })
}

/// Unitary of a standard gate on its local operand space.
pub fn gate_matrix(gate: &StandardGate) -> Array2<Complex64> {
    use std::f64::consts::FRAC_1_SQRT_2;

    match *gate {
        StandardGate::X => pauli_x(),
        StandardGate::Z => pauli_z(),
        StandardGate::H => {
            let h = c(FRAC_1_SQRT_2);
            array![[h, h], [h, -h]]
        }
        StandardGate::CX => array![
            [ONE, ZERO, ZERO, ZERO],
            [ZERO, ZERO, ZERO, ONE],
            [ZERO, ZERO, ONE, ZERO],
            [ZERO, ONE, ZERO, ZERO]
        ],
    }
}

/// All `4^k` Pauli strings on `k` qubits, identity first.
fn pauli_strings(k: u32) -> Vec<Array2<Complex64>> {
    let singles = [identity(2), pauli_x(), pauli_y(), pauli_z()];
    let mut strings = vec![identity(1)];
    for _ in 0..k {
        strings = strings
            .iter()
            .flat_map(|low| singles.iter().map(move |high| kron(high, low)))
            .collect();
    }
    strings
}

/// Kraus operators of a noise channel on its local operand space.
///
/// The depolarizing channel on `k` qubits maps `ρ → (1-p)ρ + p·I/2^k`, which
/// is `√(1 - p + p/4^k)·I` plus `√(p/4^k)·P` for each non-identity Pauli
/// string `P`.
pub fn kraus_operators(model: &NoiseModel) -> Vec<Array2<Complex64>> {
    match *model {
        NoiseModel::Depolarizing { p, num_qubits } => {
            let n_paulis = 4f64.powi(num_qubits as i32);
            let weight_identity = (1.0 - p + p / n_paulis).sqrt();
            let weight_pauli = (p / n_paulis).sqrt();
            pauli_strings(num_qubits)
                .into_iter()
                .enumerate()
                .map(|(i, pauli)| {
                    let w = if i == 0 { weight_identity } else { weight_pauli };
                    pauli.mapv(|z| z * w)
                })
                .collect()
        }
        NoiseModel::AmplitudeDamping { gamma } => vec![
            array![[ONE, ZERO], [ZERO, c((1.0 - gamma).sqrt())]],
            array![[ZERO, c(gamma.sqrt())], [ZERO, ZERO]],
        ],
    }
}

/// Conjugate transpose.
pub fn dagger(m: &Array2<Complex64>) -> Array2<Complex64> {
    m.t().mapv(|z| z.conj())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &Array2<Complex64>, b: &Array2<Complex64>) {
        assert_eq!(a.dim(), b.dim());
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).norm() < 1e-12, "{a:?} != {b:?}");
        }
    }

    fn completeness(ops: &[Array2<Complex64>]) -> Array2<Complex64> {
        let dim = ops[0].nrows();
        ops.iter()
            .fold(Array2::zeros((dim, dim)), |acc, k| acc + dagger(k).dot(k))
    }

    #[test]
    fn test_gates_are_unitary() {
        for gate in StandardGate::ALL {
            let u = gate_matrix(&gate);
            let dim = u.nrows();
            assert_close(&dagger(&u).dot(&u), &identity(dim));
        }
    }

    #[test]
    fn test_cx_flips_target_when_control_set() {
        let cx = gate_matrix(&StandardGate::CX);
        // local index = control + 2 * target
        assert_eq!(cx[[3, 1]], ONE);
        assert_eq!(cx[[1, 3]], ONE);
        assert_eq!(cx[[0, 0]], ONE);
        assert_eq!(cx[[2, 2]], ONE);
    }

    #[test]
    fn test_kraus_sets_are_complete() {
        for model in [
            NoiseModel::depolarizing(0.07, 1),
            NoiseModel::depolarizing(0.12, 2),
            NoiseModel::amplitude_damping(0.3),
            NoiseModel::amplitude_damping(1.0),
        ] {
            let ops = kraus_operators(&model);
            let dim = ops[0].nrows();
            assert_close(&completeness(&ops), &identity(dim));
        }
    }

    #[test]
    fn test_two_qubit_depolarizing_has_sixteen_terms() {
        let ops = kraus_operators(&NoiseModel::depolarizing(0.1, 2));
        assert_eq!(ops.len(), 16);
        assert_eq!(ops[0].dim(), (4, 4));
    }

    #[test]
    fn test_kron_places_second_factor_in_low_bits() {
        let x_low = kron(&identity(2), &pauli_x());
        // flips bit 0: |00⟩ ↔ |01⟩
        assert_eq!(x_low[[1, 0]], ONE);
        assert_eq!(x_low[[3, 2]], ONE);
    }
}
