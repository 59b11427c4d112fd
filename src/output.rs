use crate::error::Result;
use crate::format::{headline_display, LEGEND, NOTE, NO_DATA};
use crate::report::{DepotReport, RenderOutcome};
use crate::types::{DisplayRow, HeadlineCards, ReportContext};
use serde::Serialize;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

pub fn markdown_table<T>(rows: &[T]) -> String
where
    T: Tabled + Clone,
{
    if rows.is_empty() {
        return "(no rows)".to_string();
    }
    Table::new(rows.to_vec()).with(Style::markdown()).to_string()
}

#[derive(Serialize)]
struct ReportExport<'a> {
    depot: &'a str,
    period: String,
    context: &'a ReportContext,
    cards: &'a HeadlineCards,
    metrics: &'a [DisplayRow],
}

pub fn write_report_json(path: &Path, report: &DepotReport) -> Result<()> {
    let export = ReportExport {
        depot: &report.depot,
        period: report.period.to_string(),
        context: &report.context,
        cards: &report.cards,
        metrics: &report.display,
    };
    write_json(path, &export)
}

/// Full terminal rendering of one outcome.
pub fn render_text(outcome: &RenderOutcome) -> String {
    let report = match outcome {
        RenderOutcome::NoData => return format!("Warning: {}\n", NO_DATA),
        RenderOutcome::Table(report) => report,
    };

    let mut out = String::new();
    out.push_str(&format!("\n{}\n", report.title()));
    out.push_str(&format!("({})\n", report.period));
    out.push_str(&format!("{}\n\n", report.context_line()));
    for (label, value) in headline_display(&report.cards) {
        out.push_str(&format!("  {:<22} {:>12}\n", label, value));
    }
    out.push('\n');
    out.push_str(&markdown_table(&report.display));
    out.push_str("\n\nLegend: ");
    let legend: Vec<String> = LEGEND
        .iter()
        .map(|(color, meaning)| format!("{} = {}", color, meaning))
        .collect();
    out.push_str(&legend.join(", "));
    out.push('\n');
    for line in NOTE {
        out.push_str(&format!("  - {}\n", line));
    }
    out
}
