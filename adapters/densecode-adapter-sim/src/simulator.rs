//! Simulator backend implementation.

use async_trait::async_trait;
use rand::SeedableRng;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Mutex, PoisonError};
use std::time::Instant;
use tracing::{debug, instrument, trace};
use uuid::Uuid;

use densecode_hal::{
    Backend, BackendAvailability, BackendConfig, BackendFactory, Capabilities, Counts,
    ExecutionResult, HalError, HalResult, Job, JobId, JobStatus, ValidationResult,
};
use densecode_ir::{Circuit, ClbitId, InstructionKind, NoiseProfile, QubitId};

use crate::density::DensityMatrix;

/// Default register limit. A density matrix on `n` qubits holds `4^n` entries.
const DEFAULT_MAX_QUBITS: u32 = 8;

/// Finished jobs kept for `status()`/`result()` lookups. Older ones are
/// evicted first.
pub const MAX_RETAINED_JOBS: usize = 256;

/// Job data for the simulator.
struct SimJob {
    job: Job,
    result: Option<ExecutionResult>,
}

/// Bounded job table in submission order.
#[derive(Default)]
struct JobTable {
    jobs: FxHashMap<String, SimJob>,
    order: VecDeque<String>,
}

impl JobTable {
    fn insert(&mut self, id: String, job: SimJob) {
        while self.jobs.len() >= MAX_RETAINED_JOBS {
            let Some(pos) = self.order.iter().position(|old| {
                self.jobs
                    .get(old)
                    .is_none_or(|j| j.job.status.is_terminal())
            }) else {
                break;
            };
            if let Some(old) = self.order.remove(pos) {
                trace!(job = %old, "evicting finished job");
                self.jobs.remove(&old);
            }
        }
        self.order.push_back(id.clone());
        self.jobs.insert(id, job);
    }

    fn get(&self, id: &JobId) -> HalResult<&SimJob> {
        self.jobs
            .get(&id.0)
            .ok_or_else(|| HalError::JobNotFound(id.0.clone()))
    }

    fn get_mut(&mut self, id: &JobId) -> HalResult<&mut SimJob> {
        self.jobs
            .get_mut(&id.0)
            .ok_or_else(|| HalError::JobNotFound(id.0.clone()))
    }

    fn len(&self) -> usize {
        self.jobs.len()
    }
}

/// Local density-matrix simulator backend with optional gate noise.
///
/// Jobs run to completion inside `submit()`, so `wait()` returns on its
/// first status poll. Measurements must be terminal: once a qubit has been
/// measured no further gate may touch it. At most [`MAX_RETAINED_JOBS`]
/// finished jobs are remembered.
///
/// Outcome bitstrings follow the classical register: the highest classical
/// bit is leftmost and `c0` is rightmost.
pub struct SimulatorBackend {
    config: BackendConfig,
    capabilities: Capabilities,
    noise: NoiseProfile,
    rng: Mutex<StdRng>,
    jobs: Mutex<JobTable>,
    max_qubits: u32,
}

impl SimulatorBackend {
    /// Create a noiseless simulator with an entropy-seeded sampler.
    pub fn new() -> Self {
        Self::build(
            BackendConfig::new("density_matrix_simulator"),
            NoiseProfile::new(),
            None,
            DEFAULT_MAX_QUBITS,
        )
    }

    fn build(
        config: BackendConfig,
        noise: NoiseProfile,
        seed: Option<u64>,
        max_qubits: u32,
    ) -> Self {
        let mut capabilities = Capabilities::simulator(max_qubits).with_name(&config.name);
        if !noise.is_empty() {
            capabilities = capabilities.with_noise_profile(noise.clone());
        }
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self {
            config,
            capabilities,
            noise,
            rng: Mutex::new(rng),
            jobs: Mutex::new(JobTable::default()),
            max_qubits,
        }
    }

    /// Apply `profile` after every matching gate.
    #[must_use]
    pub fn with_noise(self, profile: NoiseProfile) -> Self {
        Self::build(self.config, profile, None, self.max_qubits).with_rng(self.rng)
    }

    /// Make shot sampling reproducible.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            ..self
        }
    }

    /// Create a simulator with a custom register limit.
    #[must_use]
    pub fn with_max_qubits(self, max_qubits: u32) -> Self {
        Self::build(self.config, self.noise, None, max_qubits).with_rng(self.rng)
    }

    fn with_rng(self, rng: Mutex<StdRng>) -> Self {
        Self { rng, ..self }
    }

    /// The gate noise this backend applies.
    pub fn noise_profile(&self) -> &NoiseProfile {
        &self.noise
    }

    /// Number of jobs currently remembered.
    pub fn retained_jobs(&self) -> usize {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn check_circuit(&self, circuit: &Circuit) -> ValidationResult {
        let mut reasons = vec![];

        if circuit.num_qubits() > self.max_qubits as usize {
            reasons.push(format!(
                "Circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.max_qubits
            ));
        }

        let mut measured: FxHashSet<QubitId> = FxHashSet::default();
        for inst in circuit.instructions() {
            match &inst.kind {
                InstructionKind::Gate(gate) => {
                    if !self.capabilities.gate_set.contains(gate.name()) {
                        reasons.push(format!("Unsupported gate '{}'", gate.name()));
                    }
                    if let Some(q) = inst.qubits.iter().find(|q| measured.contains(q)) {
                        reasons.push(format!(
                            "Gate '{}' acts on {q} after it was measured",
                            gate.name()
                        ));
                    }
                }
                InstructionKind::Measure => measured.extend(inst.qubits.iter().copied()),
                InstructionKind::Barrier { .. } => {}
            }
        }

        if reasons.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid { reasons }
        }
    }

    /// Evolve |0...0⟩ through `circuit`, applying gate noise.
    ///
    /// Returns the final state and the measurement map `(qubit, clbit)` in
    /// circuit order.
    fn evolve(&self, circuit: &Circuit) -> (DensityMatrix, Vec<(QubitId, ClbitId)>) {
        let mut state = DensityMatrix::new(circuit.num_qubits());
        let mut measurements = vec![];

        for inst in circuit.instructions() {
            let qubits: Vec<usize> = inst.qubits.iter().map(|q| q.index()).collect();
            match &inst.kind {
                InstructionKind::Gate(gate) => {
                    state.apply_gate(gate, &qubits);
                    for channel in self.noise.errors_for(gate.name()) {
                        trace!(gate = gate.name(), %channel, "applying gate noise");
                        state.apply_noise(channel, &qubits);
                    }
                }
                InstructionKind::Measure => {
                    let pairs = inst.qubits.iter().copied().zip(inst.clbits.iter().copied());
                    measurements.extend(pairs);
                }
                InstructionKind::Barrier { .. } => {}
            }
        }

        (state, measurements)
    }

    /// Exact probability of every classical outcome with nonzero weight.
    ///
    /// Keys are bitstrings over the whole classical register, `c0` rightmost.
    pub fn probabilities(&self, circuit: &Circuit) -> HalResult<BTreeMap<String, f64>> {
        self.check_circuit(circuit).into_result()?;
        let (state, measurements) = self.evolve(circuit);
        Ok(classical_distribution(
            &state,
            &measurements,
            circuit.num_clbits(),
        ))
    }

    /// Run simulation synchronously.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    fn run_simulation(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        let start = Instant::now();
        debug!(
            "Starting simulation: {} qubits, {} shots",
            circuit.num_qubits(),
            shots
        );

        let (state, measurements) = self.evolve(circuit);
        let distribution = classical_distribution(&state, &measurements, circuit.num_clbits());
        let (outcomes, weights): (Vec<_>, Vec<_>) = distribution.into_iter().unzip();

        let sampler = WeightedIndex::new(&weights)
            .map_err(|e| HalError::Backend(format!("Outcome distribution unusable: {e}")))?;

        let mut tallies = vec![0u64; outcomes.len()];
        {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            for _ in 0..shots {
                tallies[sampler.sample(&mut *rng)] += 1;
            }
        }

        let counts: Counts = outcomes
            .into_iter()
            .zip(tallies)
            .filter(|(_, n)| *n > 0)
            .collect();

        let elapsed = start.elapsed();
        debug!("Simulation completed in {:?}", elapsed);

        #[allow(clippy::cast_possible_truncation)]
        let elapsed_ms = elapsed.as_millis() as u64;
        Ok(ExecutionResult::new(counts, shots).with_execution_time(elapsed_ms))
    }
}

/// Marginalize basis-state probabilities onto the classical register.
fn classical_distribution(
    state: &DensityMatrix,
    measurements: &[(QubitId, ClbitId)],
    num_clbits: usize,
) -> BTreeMap<String, f64> {
    let mut distribution = BTreeMap::new();
    for (basis, p) in state.probabilities().into_iter().enumerate() {
        if p == 0.0 {
            continue;
        }
        let mut bits = vec![b'0'; num_clbits];
        for (qubit, clbit) in measurements {
            let bit = (basis >> qubit.index()) & 1;
            bits[num_clbits - 1 - clbit.index()] = if bit == 1 { b'1' } else { b'0' };
        }
        let key = String::from_utf8_lossy(&bits).into_owned();
        *distribution.entry(key).or_insert(0.0) += p;
    }
    distribution
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        Ok(self.check_circuit(circuit))
    }

    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        if shots == 0 {
            return Err(HalError::InvalidShots("shots must be positive".into()));
        }
        if shots > self.capabilities.max_shots {
            return Err(HalError::InvalidShots(format!(
                "{shots} exceeds the limit of {}",
                self.capabilities.max_shots
            )));
        }
        if circuit.num_qubits() > self.max_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.max_qubits
            )));
        }
        self.check_circuit(circuit).into_result()?;

        let job_id = JobId::new(Uuid::new_v4().to_string());
        let mut job = Job::new(job_id.clone(), circuit.name(), shots).with_backend(self.name());
        job.transition(JobStatus::Running);
        self.jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(job_id.0.clone(), SimJob { job, result: None });

        debug!("Submitted job: {}", job_id);

        let outcome = self.run_simulation(circuit, shots);

        let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        if let Ok(sim_job) = jobs.get_mut(&job_id) {
            match outcome {
                Ok(result) => {
                    sim_job.result = Some(result);
                    sim_job.job.transition(JobStatus::Completed);
                }
                Err(e) => sim_job.job.transition(JobStatus::Failed(e.to_string())),
            }
        }

        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        let jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        jobs.get(job_id).map(|j| j.job.status.clone())
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        let sim_job = jobs.get(job_id)?;
        match (&sim_job.job.status, &sim_job.result) {
            (JobStatus::Completed, Some(result)) => Ok(result.clone()),
            (JobStatus::Failed(msg), _) => Err(HalError::JobFailed(msg.clone())),
            (JobStatus::Cancelled, _) => Err(HalError::JobCancelled),
            (status, _) => Err(HalError::Backend(format!(
                "Job {job_id} has no result yet (status: {status})"
            ))),
        }
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        let sim_job = jobs.get_mut(job_id)?;
        sim_job.job.transition(JobStatus::Cancelled);
        Ok(())
    }
}

impl BackendFactory for SimulatorBackend {
    /// Recognized extra keys: `max_qubits`, `seed`, and `noise` (a serialized
    /// [`NoiseProfile`]). Channels whose arity does not match their gate are
    /// rejected.
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let max_qubits = config.get::<u32>("max_qubits")?.unwrap_or(DEFAULT_MAX_QUBITS);
        let seed = config.get::<u64>("seed")?;
        let noise = config.get::<NoiseProfile>("noise")?.unwrap_or_default();
        noise.validate()?;
        Ok(Self::build(config, noise, seed, max_qubits))
    }
}
