//! SVG charts of protocol outcomes.
//!
//! Two artifacts are produced: a 2×2 grid of per-message outcome histograms
//! and a line plot of success/error rate against gate-error angle. Both are
//! plain SVG text with no external resources.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ProtocolResult;
use crate::message::Message;
use crate::record::{ComparisonPoint, ResultRecord};

const FONT: &str = "font-family=\"DejaVu Sans, Arial, sans-serif\"";
const EXPECTED_COLOR: &str = "#2ca02c";
const ERROR_COLOR: &str = "#ff7f0e";
const SUCCESS_LINE: &str = "green";
const ERROR_LINE: &str = "red";

/// File name of the histogram grid for a run at `angle_deg`.
pub fn results_grid_filename(angle_deg: f64) -> String {
    format!("superdense_imperfect_{angle_deg:.1}deg.svg")
}

/// File name of the sweep plot for `message`.
pub fn comparison_filename(message: Message) -> String {
    format!("gate_error_comparison_{message}.svg")
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn svg_open(width: u32, height: u32) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
         viewBox=\"0 0 {width} {height}\">\n\
         <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n"
    )
}

fn text(x: f64, y: f64, size: u32, anchor: &str, extra: &str, body: &str) -> String {
    format!(
        "<text x=\"{x:.1}\" y=\"{y:.1}\" font-size=\"{size}\" text-anchor=\"{anchor}\" {FONT} {extra}>{}</text>\n",
        escape(body)
    )
}

/// Round `max` up to a tick step giving about five gridlines.
fn tick_step(max: f64) -> f64 {
    if max <= 0.0 {
        return 1.0;
    }
    let raw = max / 5.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|&s| s >= raw)
        .unwrap_or(10.0 * magnitude);
    step.max(1.0)
}

struct Panel {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

fn histogram_panel(panel: &Panel, message: Message, record: Option<&ResultRecord>) -> String {
    let mut svg = String::new();
    let (left, right, top, bottom) = (60.0, 20.0, 40.0, 50.0);
    let plot_x = panel.x + left;
    let plot_y = panel.y + top;
    let plot_w = panel.width - left - right;
    let plot_h = panel.height - top - bottom;

    svg.push_str(&text(
        panel.x + panel.width / 2.0,
        panel.y + 24.0,
        16,
        "middle",
        "font-weight=\"bold\"",
        &format!("Input: {message}"),
    ));

    let Some(record) = record else {
        svg.push_str(&text(
            plot_x + plot_w / 2.0,
            plot_y + plot_h / 2.0,
            12,
            "middle",
            "fill=\"#888\"",
            "not run",
        ));
        return svg;
    };

    let outcomes: BTreeMap<&String, u64> = record.counts.iter().map(|(k, &v)| (k, v)).collect();
    #[allow(clippy::cast_precision_loss)]
    let max_count = outcomes.values().copied().max().unwrap_or(0) as f64;
    let step = tick_step(max_count * 1.1);
    let y_max = (max_count * 1.1 / step).ceil().max(1.0) * step;
    let scale = |v: f64| plot_y + plot_h - v / y_max * plot_h;

    // gridlines and y ticks
    let mut tick = 0.0;
    while tick <= y_max + 1e-9 {
        let y = scale(tick);
        svg.push_str(&format!(
            "<line x1=\"{plot_x:.1}\" y1=\"{y:.1}\" x2=\"{:.1}\" y2=\"{y:.1}\" stroke=\"#000\" stroke-opacity=\"0.15\"/>\n",
            plot_x + plot_w
        ));
        svg.push_str(&text(plot_x - 6.0, y + 4.0, 11, "end", "", &format!("{tick}")));
        tick += step;
    }

    #[allow(clippy::cast_precision_loss)]
    let slot = plot_w / outcomes.len().max(1) as f64;
    for (i, (outcome, &count)) in outcomes.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let (i, count) = (i as f64, count as f64);
        let bar_w = slot * 0.6;
        let x = plot_x + i * slot + (slot - bar_w) / 2.0;
        let y = scale(count);
        let fill = if **outcome == record.expected {
            EXPECTED_COLOR
        } else {
            ERROR_COLOR
        };
        svg.push_str(&format!(
            "<rect x=\"{x:.1}\" y=\"{y:.1}\" width=\"{bar_w:.1}\" height=\"{:.1}\" fill=\"{fill}\" fill-opacity=\"0.7\" stroke=\"black\"/>\n",
            plot_y + plot_h - y
        ));
        svg.push_str(&text(
            x + bar_w / 2.0,
            plot_y + plot_h + 16.0,
            12,
            "middle",
            "",
            outcome,
        ));
    }

    // axes
    svg.push_str(&format!(
        "<line x1=\"{plot_x:.1}\" y1=\"{plot_y:.1}\" x2=\"{plot_x:.1}\" y2=\"{:.1}\" stroke=\"black\"/>\n",
        plot_y + plot_h
    ));
    svg.push_str(&format!(
        "<line x1=\"{plot_x:.1}\" y1=\"{0:.1}\" x2=\"{1:.1}\" y2=\"{0:.1}\" stroke=\"black\"/>\n",
        plot_y + plot_h,
        plot_x + plot_w
    ));
    svg.push_str(&text(
        plot_x + plot_w / 2.0,
        panel.y + panel.height - 10.0,
        12,
        "middle",
        "",
        "Measurement Outcome",
    ));
    let label_x = panel.x + 16.0;
    let label_y = plot_y + plot_h / 2.0;
    svg.push_str(&text(
        label_x,
        label_y,
        12,
        "middle",
        &format!("transform=\"rotate(-90 {label_x:.1} {label_y:.1})\""),
        "Counts",
    ));

    // metrics box
    let box_w = 120.0;
    let box_x = plot_x + plot_w / 2.0 - box_w / 2.0;
    let box_y = plot_y + 4.0;
    svg.push_str(&format!(
        "<rect x=\"{box_x:.1}\" y=\"{box_y:.1}\" width=\"{box_w:.1}\" height=\"38\" rx=\"6\" fill=\"lightyellow\" fill-opacity=\"0.7\" stroke=\"#999\"/>\n"
    ));
    svg.push_str(&text(
        box_x + box_w / 2.0,
        box_y + 16.0,
        11,
        "middle",
        "font-weight=\"bold\"",
        &format!("Success: {:.1}%", record.success_rate),
    ));
    svg.push_str(&text(
        box_x + box_w / 2.0,
        box_y + 31.0,
        11,
        "middle",
        "font-weight=\"bold\"",
        &format!("Error: {:.1}%", record.error_rate),
    ));

    svg
}

/// Render the 2×2 histogram grid, one panel per message.
///
/// Messages without a record get an empty panel.
pub fn render_results_grid(records: &BTreeMap<Message, ResultRecord>, angle_deg: f64) -> String {
    let (width, height) = (1000u32, 760u32);
    let mut svg = svg_open(width, height);
    svg.push_str(&text(
        f64::from(width) / 2.0,
        34.0,
        20,
        "middle",
        "font-weight=\"bold\"",
        &format!("Superdense Coding with Imperfect Gates (Error: {angle_deg:.2}°)"),
    ));

    for (idx, message) in Message::ALL.into_iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let (row, col) = ((idx / 2) as f64, (idx % 2) as f64);
        let panel = Panel {
            x: col * 500.0,
            y: 50.0 + row * 355.0,
            width: 500.0,
            height: 355.0,
        };
        svg.push_str(&histogram_panel(&panel, message, records.get(&message)));
    }

    svg.push_str("</svg>\n");
    svg
}

/// Render success and error rate against gate-error angle.
pub fn render_comparison(points: &[ComparisonPoint], message: Message) -> String {
    let (width, height) = (800u32, 480u32);
    let (left, right, top, bottom) = (70.0, 30.0, 70.0, 60.0);
    let plot_w = f64::from(width) - left - right;
    let plot_h = f64::from(height) - top - bottom;

    let mut sorted: Vec<&ComparisonPoint> = points.iter().collect();
    sorted.sort_by(|a, b| a.angle_deg.total_cmp(&b.angle_deg));

    let x_min = sorted.first().map_or(0.0, |p| p.angle_deg);
    let mut x_max = sorted.last().map_or(1.0, |p| p.angle_deg);
    if x_max <= x_min {
        x_max = x_min + 1.0;
    }
    let sx = |deg: f64| left + (deg - x_min) / (x_max - x_min) * plot_w;
    let sy = |rate: f64| top + plot_h - rate / 105.0 * plot_h;

    let mut svg = svg_open(width, height);
    svg.push_str(&text(
        f64::from(width) / 2.0,
        28.0,
        18,
        "middle",
        "font-weight=\"bold\"",
        "Impact of Gate Errors on Superdense Coding",
    ));
    svg.push_str(&text(
        f64::from(width) / 2.0,
        50.0,
        15,
        "middle",
        "font-weight=\"bold\"",
        &format!("(Input: {message})"),
    ));

    // grid
    for rate in (0..=100).step_by(20) {
        let y = sy(f64::from(rate));
        svg.push_str(&format!(
            "<line x1=\"{left:.1}\" y1=\"{y:.1}\" x2=\"{:.1}\" y2=\"{y:.1}\" stroke=\"#000\" stroke-opacity=\"0.15\"/>\n",
            left + plot_w
        ));
        svg.push_str(&text(left - 8.0, y + 4.0, 12, "end", "", &rate.to_string()));
    }
    for point in &sorted {
        let x = sx(point.angle_deg);
        svg.push_str(&format!(
            "<line x1=\"{x:.1}\" y1=\"{top:.1}\" x2=\"{x:.1}\" y2=\"{:.1}\" stroke=\"#000\" stroke-opacity=\"0.15\"/>\n",
            top + plot_h
        ));
        svg.push_str(&text(
            x,
            top + plot_h + 18.0,
            12,
            "middle",
            "",
            &format!("{}", point.angle_deg),
        ));
    }

    // series
    let polyline = |rate: fn(&ComparisonPoint) -> f64| -> String {
        sorted
            .iter()
            .map(|p| format!("{:.1},{:.1}", sx(p.angle_deg), sy(rate(p))))
            .collect::<Vec<_>>()
            .join(" ")
    };
    svg.push_str(&format!(
        "<polyline points=\"{}\" fill=\"none\" stroke=\"{SUCCESS_LINE}\" stroke-width=\"2\"/>\n",
        polyline(|p| p.success_rate)
    ));
    svg.push_str(&format!(
        "<polyline points=\"{}\" fill=\"none\" stroke=\"{ERROR_LINE}\" stroke-width=\"2\"/>\n",
        polyline(|p| p.error_rate)
    ));
    for point in &sorted {
        let x = sx(point.angle_deg);
        svg.push_str(&format!(
            "<circle cx=\"{x:.1}\" cy=\"{:.1}\" r=\"5\" fill=\"{SUCCESS_LINE}\"/>\n",
            sy(point.success_rate)
        ));
        let y = sy(point.error_rate);
        svg.push_str(&format!(
            "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"9\" height=\"9\" fill=\"{ERROR_LINE}\"/>\n",
            x - 4.5,
            y - 4.5
        ));
    }

    // axes and labels
    svg.push_str(&format!(
        "<rect x=\"{left:.1}\" y=\"{top:.1}\" width=\"{plot_w:.1}\" height=\"{plot_h:.1}\" fill=\"none\" stroke=\"black\"/>\n"
    ));
    svg.push_str(&text(
        left + plot_w / 2.0,
        f64::from(height) - 14.0,
        13,
        "middle",
        "",
        "Gate Error Angle (degrees)",
    ));
    let label_y = top + plot_h / 2.0;
    svg.push_str(&text(
        22.0,
        label_y,
        13,
        "middle",
        &format!("transform=\"rotate(-90 22 {label_y:.1})\""),
        "Rate (%)",
    ));

    // legend
    let lx = left + plot_w - 150.0;
    let ly = top + 14.0;
    svg.push_str(&format!(
        "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"140\" height=\"50\" fill=\"white\" stroke=\"#ccc\"/>\n",
        lx - 6.0,
        ly - 6.0
    ));
    svg.push_str(&format!(
        "<line x1=\"{lx:.1}\" y1=\"{0:.1}\" x2=\"{1:.1}\" y2=\"{0:.1}\" stroke=\"{SUCCESS_LINE}\" stroke-width=\"2\"/>\n",
        ly + 8.0,
        lx + 24.0
    ));
    svg.push_str(&text(lx + 32.0, ly + 12.0, 11, "start", "", "Success Rate"));
    svg.push_str(&format!(
        "<line x1=\"{lx:.1}\" y1=\"{0:.1}\" x2=\"{1:.1}\" y2=\"{0:.1}\" stroke=\"{ERROR_LINE}\" stroke-width=\"2\"/>\n",
        ly + 30.0,
        lx + 24.0
    ));
    svg.push_str(&text(lx + 32.0, ly + 34.0, 11, "start", "", "Error Rate"));

    svg.push_str("</svg>\n");
    svg
}

/// Write the histogram grid into `dir`.
///
/// Returns `None` without writing anything when there are no records.
pub fn save_results_grid(
    dir: &Path,
    records: &BTreeMap<Message, ResultRecord>,
    angle_deg: f64,
) -> ProtocolResult<Option<PathBuf>> {
    if records.is_empty() {
        return Ok(None);
    }
    let path = dir.join(results_grid_filename(angle_deg));
    std::fs::create_dir_all(dir)?;
    std::fs::write(&path, render_results_grid(records, angle_deg))?;
    info!(path = %path.display(), "wrote results grid");
    Ok(Some(path))
}

/// Write the sweep plot into `dir`.
pub fn save_comparison(
    dir: &Path,
    points: &[ComparisonPoint],
    message: Message,
) -> ProtocolResult<PathBuf> {
    let path = dir.join(comparison_filename(message));
    std::fs::create_dir_all(dir)?;
    std::fs::write(&path, render_comparison(points, message))?;
    info!(path = %path.display(), "wrote comparison plot");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use densecode_hal::Counts;

    fn record(message: Message, entries: &[(&str, u64)]) -> ResultRecord {
        let counts: Counts = entries.iter().map(|&(k, v)| (k, v)).collect();
        let shots = u32::try_from(counts.total_shots()).unwrap();
        ResultRecord::from_counts(message, counts, shots)
    }

    #[test]
    fn test_filenames() {
        assert_eq!(results_grid_filename(5.0), "superdense_imperfect_5.0deg.svg");
        assert_eq!(results_grid_filename(2.864_789), "superdense_imperfect_2.9deg.svg");
        assert_eq!(
            comparison_filename(Message::ONE_ONE),
            "gate_error_comparison_11.svg"
        );
    }

    #[test]
    fn test_tick_step() {
        assert_eq!(tick_step(0.0), 1.0);
        assert_eq!(tick_step(2252.8), 500.0);
        assert_eq!(tick_step(110.0), 25.0);
        assert_eq!(tick_step(3.0), 1.0);
    }

    #[test]
    fn test_grid_highlights_expected_outcome() {
        let mut records = BTreeMap::new();
        records.insert(
            Message::ONE_ZERO,
            record(Message::ONE_ZERO, &[("10", 90), ("11", 10)]),
        );
        let svg = render_results_grid(&records, 5.0);
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("Error: 5.00°"));
        assert!(svg.contains("Input: 10"));
        assert_eq!(svg.matches(EXPECTED_COLOR).count(), 1);
        assert_eq!(svg.matches(ERROR_COLOR).count(), 1);
        assert!(svg.contains("Success: 90.0%"));
        assert_eq!(svg.matches("not run").count(), 3);
    }

    #[test]
    fn test_comparison_plot_series() {
        let points: Vec<_> = [(0.0, 100), (5.0, 57), (1.0, 82)]
            .into_iter()
            .map(|(deg, ok)| {
                ComparisonPoint::new(
                    deg,
                    record(Message::ONE_ONE, &[("11", ok), ("00", 100 - ok)]),
                )
            })
            .collect();
        let svg = render_comparison(&points, Message::ONE_ONE);
        assert_eq!(svg.matches("<polyline").count(), 2);
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains("(Input: 11)"));
        assert!(svg.contains("Gate Error Angle (degrees)"));
    }

    #[test]
    fn test_single_point_plot_does_not_divide_by_zero() {
        let point = ComparisonPoint::new(0.0, record(Message::ZERO_ZERO, &[("00", 1)]));
        let svg = render_comparison(&[point], Message::ZERO_ZERO);
        assert!(!svg.contains("NaN"));
        assert!(!svg.contains("inf"));
    }

    #[test]
    fn test_save_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut records = BTreeMap::new();
        records.insert(Message::ZERO_ZERO, record(Message::ZERO_ZERO, &[("00", 4)]));

        let grid = save_results_grid(dir.path(), &records, 1.0).unwrap().unwrap();
        assert_eq!(grid, dir.path().join("superdense_imperfect_1.0deg.svg"));
        assert!(std::fs::read_to_string(&grid).unwrap().contains("Input: 00"));

        let out = dir.path().join("nested");
        let plot = save_comparison(
            &out,
            &[ComparisonPoint::new(0.0, records[&Message::ZERO_ZERO].clone())],
            Message::ZERO_ZERO,
        )
        .unwrap();
        assert!(plot.exists());
    }

    #[test]
    fn test_empty_grid_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let written = save_results_grid(dir.path(), &BTreeMap::new(), 5.0).unwrap();
        assert!(written.is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
