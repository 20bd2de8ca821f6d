//! End-to-end checks of the simulator through the `Backend` trait.

use densecode_adapter_sim::SimulatorBackend;
use densecode_hal::{Backend, JobStatus};
use densecode_ir::{Circuit, ClbitId, NoiseModel, NoiseProfile, QubitId};
use proptest::prelude::*;

fn bell_roundtrip() -> Circuit {
    // Prepare and undo a Bell pair; ideally returns |00⟩.
    let mut circuit = Circuit::with_size("bell_roundtrip", 2, 2);
    let (q0, q1) = (QubitId(0), QubitId(1));
    circuit
        .h(q0)
        .unwrap()
        .cx(q0, q1)
        .unwrap()
        .cx(q0, q1)
        .unwrap()
        .h(q0)
        .unwrap()
        .measure(q0, ClbitId(0))
        .unwrap()
        .measure(q1, ClbitId(1))
        .unwrap();
    circuit
}

fn depolarizing_profile(p1: f64, p2: f64) -> NoiseProfile {
    let mut profile = NoiseProfile::new();
    profile
        .add_all_qubit_error(NoiseModel::depolarizing(p1, 1), ["h", "x", "z"])
        .unwrap();
    profile
        .add_all_qubit_error(NoiseModel::depolarizing(p2, 2), ["cx"])
        .unwrap();
    profile
}

#[tokio::test]
async fn wait_returns_completed_result() {
    let backend = SimulatorBackend::new().with_seed(3);
    let circuit = bell_roundtrip();

    let job = backend.submit(&circuit, 256).await.unwrap();
    assert_eq!(backend.status(&job).await.unwrap(), JobStatus::Completed);

    let result = backend.wait(&job).await.unwrap();
    assert_eq!(result.counts.get("00"), 256);
    assert!(result.execution_time_ms.is_some());
}

#[tokio::test]
async fn cancelling_a_finished_job_keeps_its_result() {
    let backend = SimulatorBackend::new();
    let job = backend.submit(&bell_roundtrip(), 10).await.unwrap();
    backend.cancel(&job).await.unwrap();
    assert_eq!(backend.status(&job).await.unwrap(), JobStatus::Completed);
    assert_eq!(backend.result(&job).await.unwrap().counts.total_shots(), 10);
}

#[test]
fn ideal_profile_matches_noiseless() {
    let ideal = SimulatorBackend::new();
    let zeroed = SimulatorBackend::new().with_noise(depolarizing_profile(0.0, 0.0));
    let circuit = bell_roundtrip();

    assert_eq!(
        ideal.probabilities(&circuit).unwrap(),
        zeroed.probabilities(&circuit).unwrap()
    );
}

#[test]
fn channel_order_matters_for_composed_noise() {
    // Amplitude damping after a full depolarization leaves a biased state;
    // the reverse order ends maximally mixed.
    let mut damp_last = NoiseProfile::new();
    damp_last
        .add_all_qubit_error(NoiseModel::depolarizing(1.0, 1), ["x"])
        .unwrap();
    damp_last
        .add_all_qubit_error(NoiseModel::amplitude_damping(0.5), ["x"])
        .unwrap();

    let mut circuit = Circuit::with_size("t", 1, 1);
    circuit
        .x(QubitId(0))
        .unwrap()
        .measure(QubitId(0), ClbitId(0))
        .unwrap();

    let probs = SimulatorBackend::new()
        .with_noise(damp_last)
        .probabilities(&circuit)
        .unwrap();
    assert!((probs["0"] - 0.75).abs() < 1e-12);
}

proptest! {
    #[test]
    fn probabilities_form_a_distribution(p1 in 0.0f64..=1.0, p2 in 0.0f64..=1.0) {
        let backend = SimulatorBackend::new().with_noise(depolarizing_profile(p1, p2));
        let probs = backend.probabilities(&bell_roundtrip()).unwrap();

        let total: f64 = probs.values().sum();
        prop_assert!((total - 1.0).abs() < 1e-9);
        prop_assert!(probs.values().all(|p| *p > 0.0 && *p <= 1.0 + 1e-12));
    }

    #[test]
    fn more_depolarizing_means_lower_success(a in 0.0f64..0.5, b in 0.0f64..0.5) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let circuit = bell_roundtrip();
        let success = |p: f64| {
            SimulatorBackend::new()
                .with_noise(depolarizing_profile(p, p))
                .probabilities(&circuit)
                .unwrap()
                .get("00")
                .copied()
                .unwrap_or(0.0)
        };
        prop_assert!(success(hi) <= success(lo) + 1e-12);
    }
}
