use crate::types::{DisplayRow, HeadlineCards, MetricRow, VarianceFlag};
use crate::util::{format_int, parse_f64_safe};

pub const LEGEND: [(&str, &str); 3] = [
    ("yellow", "Benchmark"),
    ("green", "Within / Below Benchmark"),
    ("red", "Above Benchmark"),
];

pub const NOTE: [&str; 3] = [
    "'Planned Schedules' and 'Total Drivers' are total sums.",
    "Variance has red background if exceeding benchmark, green background if within or better.",
    "Benchmark is highlighted in yellow.",
];

pub const NO_DATA: &str = "No data available for the selected filters.";

/// A label is percentage-valued when it carries a parenthesised `%`, e.g.
/// `Weekly Off (%)`.
pub fn is_percentage_label(label: &str) -> bool {
    label
        .find('(')
        .map(|open| label[open..].contains("%)"))
        .unwrap_or(false)
}

pub fn format_value(value: Option<f64>, is_percent: bool) -> String {
    match value {
        None => String::new(),
        Some(v) if is_percent => format!("{:.1}%", v),
        Some(v) => format!("{:.0}", v),
    }
}

pub fn format_variance(variance: Option<f64>, is_percent: bool) -> String {
    match variance {
        None => String::new(),
        Some(v) if is_percent => format!("{:+.1}%", v),
        Some(v) => format!("{:+.0}", v),
    }
}

/// Positive is adverse, negative favorable, zero or missing neither.
pub fn classify_variance(variance: Option<f64>) -> VarianceFlag {
    match variance {
        Some(v) if v > 0.0 => VarianceFlag::Adverse,
        Some(v) if v < 0.0 => VarianceFlag::Favorable,
        _ => VarianceFlag::Neutral,
    }
}

pub fn display_row(row: &MetricRow) -> DisplayRow {
    let is_percent = is_percentage_label(row.label);
    DisplayRow {
        metric: row.label.to_string(),
        benchmark: format_value(row.benchmark, is_percent),
        value: format_value(row.value, is_percent),
        variance: format_variance(row.variance, is_percent),
        variance_flag: classify_variance(row.variance),
        benchmark_marker: row.benchmark.is_some(),
    }
}

pub fn display_rows(rows: &[MetricRow]) -> Vec<DisplayRow> {
    rows.iter().map(display_row).collect()
}

/// `(label, display)` pairs for the three headline cards.
pub fn headline_display(cards: &HeadlineCards) -> [(&'static str, String); 3] {
    [
        ("Planned Schedules", format_int(cards.planned_schedules)),
        ("Total Drivers", cards.total_drivers.to_string()),
        ("Drivers/Schedule (%)", ratio_display(cards.drivers_per_schedule)),
    ]
}

/// A zero ratio shows as `0 %`; any other keeps at least one decimal, so a
/// whole ratio reads `2.0 %`.
fn ratio_display(ratio: f64) -> String {
    if ratio == 0.0 {
        "0 %".to_string()
    } else {
        format!("{:?} %", ratio)
    }
}

/// Inverse of the display formatting: `"25.0%"`, `"+2.2%"`, `"1,234"`.
pub fn parse_display_value(s: &str) -> Option<f64> {
    let s = s.trim();
    let s = s.strip_suffix('%').unwrap_or(s).trim_end();
    let s = s.strip_prefix('+').unwrap_or(s);
    parse_f64_safe(Some(s))
}
