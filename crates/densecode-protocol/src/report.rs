//! Console reports: run logs, summary tables and sweep listings.
//!
//! Each `*_text` function builds the report as a string; the matching
//! `print_*` function writes it to stdout.

use std::collections::BTreeMap;

use console::style;

use densecode_hal::Counts;
use densecode_ir::Circuit;

use crate::message::Message;
use crate::record::{ComparisonPoint, FidelityBand, ResultRecord};

const HEADER_WIDTH: usize = 70;
const TABLE_WIDTH: usize = 85;

fn styled_band(band: FidelityBand, text: &str) -> String {
    let text = format!("{} {text}", band.symbol());
    match band {
        FidelityBand::Excellent => style(text).green().to_string(),
        FidelityBand::Good => style(text).yellow().to_string(),
        FidelityBand::Degraded => style(text).red().to_string(),
    }
}

/// Counts rendered as `{00: 12, 11: 500}`, keys ascending.
pub fn format_counts(counts: &Counts) -> String {
    let sorted: BTreeMap<&String, &u64> = counts.iter().collect();
    let body = sorted
        .iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{body}}}")
}

/// Print a banner.
pub fn print_header(title: &str) {
    println!("{}", style("=".repeat(HEADER_WIDTH)).cyan());
    println!("{}", style(title).cyan().bold());
    println!("{}", style("=".repeat(HEADER_WIDTH)).cyan());
}

/// Print a section divider.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style("─".repeat(HEADER_WIDTH)).dim());
    println!("{}", style(title).green().bold());
    println!("{}", style("─".repeat(HEADER_WIDTH)).dim());
}

/// Print a success line.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print the diagram of the circuit about to run.
pub fn print_circuit(circuit: &Circuit, message: Message, angle_deg: f64) {
    println!();
    println!("Circuit for encoding '{message}' (gate error: {angle_deg:.2}°):");
    println!("{}", circuit.draw());
}

/// The log block for one protocol run.
pub fn run_text(record: &ResultRecord) -> String {
    let mut text = String::new();
    text.push_str("\nResults:\n");
    text.push_str(&format!("  Expected output: {}\n", record.expected));
    text.push_str(&format!(
        "  Measurement counts: {}\n",
        format_counts(&record.counts)
    ));
    text.push_str(&format!("  Success rate: {:.2}%\n", record.success_rate));
    text.push_str(&format!("  Error rate: {:.2}%\n", record.error_rate));

    if !record.error_breakdown.is_empty() {
        text.push_str("  Error distribution:\n");
        for (outcome, count) in &record.error_breakdown {
            text.push_str(&format!(
                "    {outcome}: {count} ({:.2}%)\n",
                record.outcome_rate(outcome)
            ));
        }
    }

    let band = record.band();
    text.push_str(&format!("  {}", styled_band(band, band.verdict())));
    text
}

/// Print the log block for one protocol run.
pub fn print_run(record: &ResultRecord) {
    println!("{}", run_text(record));
}

/// Summary table over every recorded message, in message order.
pub fn summary_text<'a>(
    records: impl IntoIterator<Item = &'a ResultRecord>,
    angle_deg: f64,
) -> String {
    let mut text = String::new();
    text.push_str(&format!("\n{}\n", "=".repeat(TABLE_WIDTH)));
    text.push_str(&format!(
        "IMPERFECT GATES SUMMARY (Gate Error: {angle_deg:.2}°)\n"
    ));
    text.push_str(&format!("{}\n", "=".repeat(TABLE_WIDTH)));
    text.push_str(&format!(
        "{:<10} {:<10} {:<15} {:<15} {}\n",
        "Input", "Expected", "Success Rate", "Error Rate", "Status"
    ));
    text.push_str(&format!("{}\n", "─".repeat(TABLE_WIDTH)));

    let mut records: Vec<&ResultRecord> = records.into_iter().collect();
    records.sort_by_key(|r| r.message);
    for record in records {
        let band = record.band();
        text.push_str(&format!(
            "{:<10} {:<10} {:>6.2}%{:<8} {:>6.2}%{:<8} {}\n",
            record.message.as_str(),
            record.expected,
            record.success_rate,
            "",
            record.error_rate,
            "",
            styled_band(band, &band.to_string())
        ));
    }
    text.push_str(&"=".repeat(TABLE_WIDTH));
    text
}

/// Print the summary table.
pub fn print_summary<'a>(records: impl IntoIterator<Item = &'a ResultRecord>, angle_deg: f64) {
    println!("{}\n", summary_text(records, angle_deg));
}

/// The log block for one sweep angle.
pub fn comparison_point_text(point: &ComparisonPoint) -> String {
    format!(
        "Gate Error: {}° ({:.4} rad)\n  Success rate: {:.2}%\n  Error rate: {:.2}%",
        point.angle_deg,
        point.angle_rad(),
        point.success_rate,
        point.error_rate
    )
}

/// Print the log block for one sweep angle.
pub fn print_comparison_point(point: &ComparisonPoint) {
    println!();
    println!("{}", comparison_point_text(point));
}

/// Compact table of a finished sweep.
pub fn comparison_text(message: Message, points: &[ComparisonPoint]) -> String {
    let mut text = String::new();
    text.push_str(&format!("Gate error sweep for input {message}\n"));
    text.push_str(&format!(
        "{:>10} {:>14} {:>12}\n",
        "Angle (°)", "Success Rate", "Error Rate"
    ));
    for point in points {
        text.push_str(&format!(
            "{:>10.1} {:>13.2}% {:>11.2}%\n",
            point.angle_deg, point.success_rate, point.error_rate
        ));
    }
    text
}

/// Print the sweep table.
pub fn print_comparison(message: Message, points: &[ComparisonPoint]) {
    println!("{}", comparison_text(message, points));
}
