//! Benchmarks for noisy density-matrix execution
//!
//! Run with: cargo bench -p densecode-adapter-sim

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use densecode_adapter_sim::SimulatorBackend;
use densecode_ir::{Circuit, ClbitId, NoiseModel, NoiseProfile, QubitId};

fn ghz(n: u32) -> Circuit {
    let mut circuit = Circuit::with_size("ghz", n, n);
    circuit.h(QubitId(0)).unwrap();
    for i in 0..n - 1 {
        circuit.cx(QubitId(i), QubitId(i + 1)).unwrap();
    }
    for i in 0..n {
        circuit.measure(QubitId(i), ClbitId(i)).unwrap();
    }
    circuit
}

fn noisy_backend() -> SimulatorBackend {
    let mut profile = NoiseProfile::new();
    profile
        .add_all_qubit_error(NoiseModel::depolarizing(0.01, 1), ["h"])
        .unwrap();
    profile
        .add_all_qubit_error(NoiseModel::depolarizing(0.02, 2), ["cx"])
        .unwrap();
    profile
        .add_all_qubit_error(NoiseModel::amplitude_damping(0.01), ["h"])
        .unwrap();
    SimulatorBackend::new().with_noise(profile).with_seed(0)
}

fn bench_probabilities(c: &mut Criterion) {
    let mut group = c.benchmark_group("exact_probabilities");
    let ideal = SimulatorBackend::new();
    let noisy = noisy_backend();

    for n in &[2u32, 3, 4, 5] {
        let circuit = ghz(*n);
        group.bench_with_input(BenchmarkId::new("ideal", n), &circuit, |b, circuit| {
            b.iter(|| ideal.probabilities(black_box(circuit)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("noisy", n), &circuit, |b, circuit| {
            b.iter(|| noisy.probabilities(black_box(circuit)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_probabilities);
criterion_main!(benches);
