//! Per-run outcome summaries.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use densecode_hal::Counts;

use crate::message::Message;

/// Qualitative verdict on a success rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FidelityBand {
    /// At least 90% success.
    Excellent,
    /// At least 75% success.
    Good,
    /// Below 75% success.
    Degraded,
}

impl FidelityBand {
    /// Lower bound (inclusive, percent) for [`FidelityBand::Excellent`].
    pub const EXCELLENT_THRESHOLD: f64 = 90.0;
    /// Lower bound (inclusive, percent) for [`FidelityBand::Good`].
    pub const GOOD_THRESHOLD: f64 = 75.0;

    /// Classify a success rate given in percent.
    pub fn classify(success_rate: f64) -> Self {
        if success_rate >= Self::EXCELLENT_THRESHOLD {
            Self::Excellent
        } else if success_rate >= Self::GOOD_THRESHOLD {
            Self::Good
        } else {
            Self::Degraded
        }
    }

    /// Status-column marker.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Excellent => "✓",
            Self::Good => "⚠",
            Self::Degraded => "✗",
        }
    }

    /// One-line verdict for run logs.
    pub fn verdict(self) -> &'static str {
        match self {
            Self::Excellent => "Good fidelity with imperfect gates",
            Self::Good => "Moderate impact from gate errors",
            Self::Degraded => "Significant degradation from gate imperfections",
        }
    }
}

impl fmt::Display for FidelityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Degraded => "Degraded",
        };
        f.write_str(name)
    }
}

fn percent(count: u64, shots: u32) -> f64 {
    if shots == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let rate = count as f64 / f64::from(shots) * 100.0;
    rate
}

/// Outcome of running the protocol for one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// The message that was sent.
    pub message: Message,
    /// The bitstring a perfect channel would decode; equal to the message.
    pub expected: String,
    /// Raw outcome tallies.
    pub counts: Counts,
    /// Number of shots run.
    pub shots: u32,
    /// Percentage of shots that decoded to `expected`.
    pub success_rate: f64,
    /// Percentage of shots that decoded to anything else.
    pub error_rate: f64,
    /// Tallies of the wrong outcomes, sorted by bitstring.
    pub error_breakdown: BTreeMap<String, u64>,
}

impl ResultRecord {
    /// Summarize `counts` from `shots` runs of `message`.
    pub fn from_counts(message: Message, counts: Counts, shots: u32) -> Self {
        let expected = message.to_string();
        let error_breakdown: BTreeMap<String, u64> = counts
            .iter()
            .filter(|(outcome, _)| **outcome != expected)
            .map(|(outcome, &count)| (outcome.clone(), count))
            .collect();
        let errors: u64 = error_breakdown.values().sum();

        Self {
            message,
            success_rate: percent(counts.get(&expected), shots),
            error_rate: percent(errors, shots),
            expected,
            counts,
            shots,
            error_breakdown,
        }
    }

    /// Verdict for this run.
    pub fn band(&self) -> FidelityBand {
        FidelityBand::classify(self.success_rate)
    }

    /// Percentage of shots that produced `outcome`.
    pub fn outcome_rate(&self, outcome: &str) -> f64 {
        percent(self.counts.get(outcome), self.shots)
    }
}

/// One angle of a gate-error sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonPoint {
    /// Gate-error angle in degrees.
    pub angle_deg: f64,
    /// Raw outcome tallies.
    pub counts: Counts,
    /// Percentage of shots that decoded correctly.
    pub success_rate: f64,
    /// `100 - success_rate`.
    pub error_rate: f64,
}

impl ComparisonPoint {
    /// Summarize one sweep run.
    pub fn new(angle_deg: f64, record: ResultRecord) -> Self {
        Self {
            angle_deg,
            success_rate: record.success_rate,
            error_rate: 100.0 - record.success_rate,
            counts: record.counts,
        }
    }

    /// The angle in radians.
    pub fn angle_rad(&self) -> f64 {
        self.angle_deg.to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(entries: &[(&str, u64)]) -> Counts {
        entries.iter().map(|&(k, v)| (k, v)).collect()
    }

    #[test]
    fn test_band_thresholds() {
        assert_eq!(FidelityBand::classify(100.0), FidelityBand::Excellent);
        assert_eq!(FidelityBand::classify(90.0), FidelityBand::Excellent);
        assert_eq!(FidelityBand::classify(89.99), FidelityBand::Good);
        assert_eq!(FidelityBand::classify(75.0), FidelityBand::Good);
        assert_eq!(FidelityBand::classify(74.99), FidelityBand::Degraded);
        assert_eq!(FidelityBand::classify(0.0), FidelityBand::Degraded);
    }

    #[test]
    fn test_record_rates() {
        let record = ResultRecord::from_counts(
            Message::ONE_ONE,
            counts(&[("11", 150), ("10", 30), ("00", 20)]),
            200,
        );
        assert_eq!(record.expected, "11");
        assert!((record.success_rate - 75.0).abs() < 1e-12);
        assert!((record.error_rate - 25.0).abs() < 1e-12);
        assert!((record.success_rate + record.error_rate - 100.0).abs() < 1e-9);
        assert_eq!(
            record.error_breakdown.keys().collect::<Vec<_>>(),
            ["00", "10"]
        );
        assert_eq!(record.band(), FidelityBand::Good);
        assert!((record.outcome_rate("10") - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_record_without_success() {
        let record = ResultRecord::from_counts(Message::ZERO_ZERO, counts(&[("01", 10)]), 10);
        assert_eq!(record.success_rate, 0.0);
        assert_eq!(record.error_rate, 100.0);
        assert_eq!(record.band(), FidelityBand::Degraded);
    }

    #[test]
    fn test_perfect_record_has_empty_breakdown() {
        let record = ResultRecord::from_counts(Message::ZERO_ONE, counts(&[("01", 64)]), 64);
        assert!(record.error_breakdown.is_empty());
        assert_eq!(record.band(), FidelityBand::Excellent);
    }

    #[test]
    fn test_comparison_point_error_is_complement() {
        let record = ResultRecord::from_counts(
            Message::ONE_ONE,
            counts(&[("11", 3), ("01", 1)]),
            4,
        );
        let point = ComparisonPoint::new(5.0, record);
        assert_eq!(point.success_rate, 75.0);
        assert_eq!(point.error_rate, 25.0);
        assert!((point.angle_rad() - 5f64.to_radians()).abs() < 1e-15);
    }
}
