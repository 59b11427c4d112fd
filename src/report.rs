use crate::benchmarks::{compare, BenchmarkSet};
use crate::error::Result;
use crate::filter::{filter_records, TimePeriod};
use crate::format::display_rows;
use crate::metrics::{aggregate, context, headline_cards};
use crate::source::ActivitySource;
use crate::types::{ActivityRecord, DisplayRow, HeadlineCards, MetricRow, ReportContext};
use tracing::{debug, info};

/// What the user picked for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub depot: String,
    pub period: TimePeriod,
}

#[derive(Debug, Clone)]
pub struct DepotReport {
    pub depot: String,
    pub period: TimePeriod,
    pub context: ReportContext,
    pub cards: HeadlineCards,
    pub rows: Vec<MetricRow>,
    pub display: Vec<DisplayRow>,
}

impl DepotReport {
    pub fn title(&self) -> String {
        format!("Productivity Ratios for {}", self.depot)
    }

    pub fn context_line(&self) -> String {
        let category = self
            .context
            .category
            .as_ref()
            .map(|c| c.to_string())
            .unwrap_or_default();
        format!(
            "Category: {}  |  Days Considered: {}",
            category, self.context.days_considered
        )
    }
}

#[derive(Debug, Clone)]
pub enum RenderOutcome {
    Table(Box<DepotReport>),
    /// Nothing matched the selection; no aggregation was attempted.
    NoData,
}

/// One full filter -> aggregate -> compare -> format pass.
pub fn render(
    records: &[ActivityRecord],
    selection: &Selection,
    benchmarks: &BenchmarkSet,
) -> RenderOutcome {
    let rows = filter_records(records, &selection.depot, &selection.period);
    info!(
        depot = %selection.depot,
        period = %selection.period,
        matched = rows.len(),
        "rendering selection"
    );
    if rows.is_empty() {
        return RenderOutcome::NoData;
    }

    let ctx = context(&rows);
    let table = benchmarks.for_category(ctx.category.as_ref());
    debug!(category = ?ctx.category, thresholds = table.len(), "benchmark table selected");

    let metric_rows = compare(&aggregate(&rows), table);
    let display = display_rows(&metric_rows);
    RenderOutcome::Table(Box::new(DepotReport {
        depot: selection.depot.clone(),
        period: selection.period,
        cards: headline_cards(&rows),
        context: ctx,
        rows: metric_rows,
        display,
    }))
}

/// Fetch a fresh copy of the table and render it. A source failure ends the
/// render with no partial output.
pub fn render_from<S: ActivitySource + ?Sized>(
    source: &S,
    selection: &Selection,
    benchmarks: &BenchmarkSet,
) -> Result<RenderOutcome> {
    let records = source.fetch_all()?;
    Ok(render(&records, selection, benchmarks))
}
