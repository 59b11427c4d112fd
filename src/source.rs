use crate::error::{DashboardError, Result};
use crate::types::{ActivityRecord, Category, RawRow};
use crate::util::{parse_date_safe, parse_f64_safe};
use csv::ReaderBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Anything that can hand over the full activity table for one render.
pub trait ActivitySource {
    fn fetch_all(&self) -> Result<Vec<ActivityRecord>>;
}

impl ActivitySource for Vec<ActivityRecord> {
    fn fetch_all(&self) -> Result<Vec<ActivityRecord>> {
        Ok(self.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub parse_errors: usize,
    pub null_dates: usize,
}

/// CSV export of the `depot_data` table.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and clean every row. The reader lives only for this call.
    pub fn load(&self) -> Result<(Vec<ActivityRecord>, LoadReport)> {
        let mut rdr = ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_path(&self.path)
            .map_err(|source| DashboardError::Source {
                path: self.path.clone(),
                source,
            })?;

        let mut report = LoadReport::default();
        let mut records = Vec::new();

        for result in rdr.deserialize::<RawRow>() {
            report.total_rows += 1;
            let row = match result {
                Ok(r) => r,
                Err(e) => {
                    debug!(row = report.total_rows, error = %e, "skipping unreadable row");
                    report.parse_errors += 1;
                    continue;
                }
            };
            let Some(record) = clean_row(row) else {
                report.parse_errors += 1;
                continue;
            };
            if record.entry_date.is_none() {
                report.null_dates += 1;
            }
            records.push(record);
        }

        report.loaded_rows = records.len();
        if report.parse_errors > 0 {
            warn!(skipped = report.parse_errors, "rows skipped while loading");
        }
        info!(
            path = %self.path.display(),
            total = report.total_rows,
            loaded = report.loaded_rows,
            null_dates = report.null_dates,
            "activity data loaded"
        );
        Ok((records, report))
    }
}

impl ActivitySource for CsvSource {
    fn fetch_all(&self) -> Result<Vec<ActivityRecord>> {
        self.load().map(|(records, _)| records)
    }
}

/// Rows without a depot name cannot be selected and are dropped; every other
/// cell degrades to `None` on its own.
fn clean_row(row: RawRow) -> Option<ActivityRecord> {
    let depot_name = row.depot_name?.trim().to_string();
    if depot_name.is_empty() {
        return None;
    }
    let category = row
        .category
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Category::from);

    Some(ActivityRecord {
        depot_name,
        entry_date: parse_date_safe(row.entry_date.as_deref()),
        category,
        planned_schedules: parse_f64_safe(row.planned_schedules.as_deref()),
        total_drivers: parse_f64_safe(row.total_drivers.as_deref()),
        weekly_off: parse_f64_safe(row.weekly_off.as_deref()),
        special_off: parse_f64_safe(row.special_off.as_deref()),
        others: parse_f64_safe(row.others.as_deref()),
        leave_absent: parse_f64_safe(row.leave_absent.as_deref()),
        sick_leave: parse_f64_safe(row.sick_leave.as_deref()),
        spot_absent: parse_f64_safe(row.spot_absent.as_deref()),
        double_duty: parse_f64_safe(row.double_duty.as_deref()),
        off_cancellation: parse_f64_safe(row.off_cancellation.as_deref()),
        service_driver_check: parse_f64_safe(row.service_driver_check.as_deref()),
    })
}
