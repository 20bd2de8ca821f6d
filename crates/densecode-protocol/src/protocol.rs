//! Running the protocol against the noisy simulator.

use std::collections::BTreeMap;

use tracing::{debug, info, instrument};

use densecode_adapter_sim::SimulatorBackend;
use densecode_hal::Backend;

use crate::circuit::superdense_circuit;
use crate::error::{ProtocolError, ProtocolResult};
use crate::message::Message;
use crate::noise::NoiseParameters;
use crate::record::{ComparisonPoint, ResultRecord};
use crate::report;

/// Superdense coding over a simulator whose gates are all imperfect by the
/// same error angle.
///
/// Every run is recorded by message; running a message again replaces its
/// earlier record.
///
/// ```rust,no_run
/// use densecode_protocol::SuperdenseCoding;
///
/// # async fn demo() -> densecode_protocol::ProtocolResult<()> {
/// let mut sdc = SuperdenseCoding::from_degrees(5.0)?.with_seed(7);
/// let record = sdc.run_protocol("11", 2048).await?;
/// println!("{} -> {:.2}%", record.message, record.success_rate);
/// # Ok(())
/// # }
/// ```
pub struct SuperdenseCoding {
    params: NoiseParameters,
    backend: SimulatorBackend,
    seed: Option<u64>,
    draw_circuits: bool,
    print_reports: bool,
    results: BTreeMap<Message, ResultRecord>,
}

impl SuperdenseCoding {
    /// Set up a run with the given gate-error angle in radians.
    pub fn new(error_angle: f64) -> ProtocolResult<Self> {
        Self::with_params(NoiseParameters::from_error_angle(error_angle)?)
    }

    /// Set up a run with the given gate-error angle in degrees.
    pub fn from_degrees(degrees: f64) -> ProtocolResult<Self> {
        Self::with_params(NoiseParameters::from_degrees(degrees)?)
    }

    fn with_params(params: NoiseParameters) -> ProtocolResult<Self> {
        let backend = SimulatorBackend::new().with_noise(params.to_profile()?);
        Ok(Self {
            params,
            backend,
            seed: None,
            draw_circuits: true,
            print_reports: true,
            results: BTreeMap::new(),
        })
    }

    /// Make shot sampling reproducible.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            backend: self.backend.with_seed(seed),
            seed: Some(seed),
            ..self
        }
    }

    /// Print each circuit before running it.
    #[must_use]
    pub fn with_circuit_drawing(self, draw_circuits: bool) -> Self {
        Self {
            draw_circuits,
            ..self
        }
    }

    /// Print run logs to stdout.
    #[must_use]
    pub fn with_reports(self, print_reports: bool) -> Self {
        Self {
            print_reports,
            ..self
        }
    }

    /// Suppress all console output.
    #[must_use]
    pub fn quiet(self) -> Self {
        self.with_circuit_drawing(false).with_reports(false)
    }

    /// Noise strengths in effect.
    pub fn params(&self) -> &NoiseParameters {
        &self.params
    }

    /// Gate-error angle in degrees.
    pub fn error_angle_deg(&self) -> f64 {
        self.params.error_angle_deg()
    }

    /// The simulator runs are submitted to.
    pub fn backend(&self) -> &SimulatorBackend {
        &self.backend
    }

    /// The latest record for each message run so far.
    pub fn results(&self) -> &BTreeMap<Message, ResultRecord> {
        &self.results
    }

    /// Encode `bits`, send it through the noisy channel and decode it.
    ///
    /// Fails with [`ProtocolError::InvalidMessage`] for anything other than
    /// the four two-bit strings; nothing is recorded in that case.
    pub async fn run_protocol(&mut self, bits: &str, shots: u32) -> ProtocolResult<ResultRecord> {
        let message: Message = bits.parse()?;
        self.run_message(message, shots).await
    }

    /// Run the protocol for an already-parsed message.
    #[instrument(skip(self), fields(angle_deg = self.error_angle_deg()))]
    pub async fn run_message(&mut self, message: Message, shots: u32) -> ProtocolResult<ResultRecord> {
        if shots == 0 {
            return Err(ProtocolError::InvalidShots(shots));
        }

        let circuit = superdense_circuit(message)?;
        if self.draw_circuits {
            report::print_circuit(&circuit, message, self.error_angle_deg());
        }

        let job_id = self.backend.submit(&circuit, shots).await?;
        let result = self.backend.wait(&job_id).await?;
        debug!(job_id = %job_id, elapsed_ms = ?result.execution_time_ms, "job finished");

        let record = ResultRecord::from_counts(message, result.counts, shots);
        info!(
            message = %message,
            success_rate = record.success_rate,
            band = %record.band(),
            "protocol run complete"
        );

        self.results.insert(message, record.clone());
        Ok(record)
    }

    /// Run every message once, in ascending order.
    pub async fn test_all_cases(&mut self, shots: u32) -> ProtocolResult<Vec<ResultRecord>> {
        if self.print_reports {
            report::print_header(&format!(
                "SUPERDENSE CODING - IMPERFECT GATES (Error: {:.2}°)",
                self.error_angle_deg()
            ));
        }

        let mut records = Vec::with_capacity(Message::ALL.len());
        for message in Message::ALL {
            if self.print_reports {
                report::print_section(&format!("Testing input: {message}"));
            }
            let record = self.run_message(message, shots).await?;
            if self.print_reports {
                report::print_run(&record);
            }
            records.push(record);
        }
        Ok(records)
    }

    /// Exact probability that `bits` decodes correctly, with no sampling.
    pub fn success_probability(&self, bits: &str) -> ProtocolResult<f64> {
        let message: Message = bits.parse()?;
        let circuit = superdense_circuit(message)?;
        let distribution = self.backend.probabilities(&circuit)?;
        Ok(distribution.get(message.as_str()).copied().unwrap_or(0.0))
    }

    /// Run `bits` once per angle (degrees), each on a freshly configured
    /// simulator, and collect the outcomes in input order.
    ///
    /// The sweep inherits this instance's seed and report settings but never
    /// draws circuits and does not touch [`Self::results`].
    pub async fn compare_gate_errors(
        &self,
        bits: &str,
        angles_deg: &[f64],
        shots: u32,
    ) -> ProtocolResult<Vec<ComparisonPoint>> {
        self.compare_gate_errors_with(bits, angles_deg, shots, |_| {})
            .await
    }

    /// Like [`Self::compare_gate_errors`], calling `on_point` after each angle.
    pub async fn compare_gate_errors_with<F>(
        &self,
        bits: &str,
        angles_deg: &[f64],
        shots: u32,
        mut on_point: F,
    ) -> ProtocolResult<Vec<ComparisonPoint>>
    where
        F: FnMut(&ComparisonPoint),
    {
        let message: Message = bits.parse()?;
        if self.print_reports {
            report::print_header(&format!("GATE ERROR COMPARISON - Input: {message}"));
        }

        let mut points = Vec::with_capacity(angles_deg.len());
        for &angle_deg in angles_deg {
            let mut run = Self::from_degrees(angle_deg)?.quiet();
            if let Some(seed) = self.seed {
                run = run.with_seed(seed);
            }
            let record = run.run_message(message, shots).await?;
            let point = ComparisonPoint::new(angle_deg, record);
            if self.print_reports {
                report::print_comparison_point(&point);
            }
            on_point(&point);
            points.push(point);
        }
        Ok(points)
    }
}
