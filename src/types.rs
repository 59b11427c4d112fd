use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use tabled::Tabled;

/// One row of the `depot_data` export exactly as it comes off disk.
///
/// Every cell is optional text; cleaning into typed values happens in
/// `source`, so a bad cell costs us one field instead of the whole row.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(default)]
    pub depot_name: Option<String>,
    #[serde(default)]
    pub entry_date: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub planned_schedules: Option<String>,
    #[serde(default)]
    pub total_drivers: Option<String>,
    #[serde(rename = "Day_weekly_off_per", default)]
    pub weekly_off: Option<String>,
    #[serde(rename = "Day_special_off_per", default)]
    pub special_off: Option<String>,
    #[serde(rename = "Day_other_per", default)]
    pub others: Option<String>,
    #[serde(rename = "Day_leave_absent_per", default)]
    pub leave_absent: Option<String>,
    #[serde(rename = "Day_sick_leave_per", default)]
    pub sick_leave: Option<String>,
    #[serde(rename = "Day_spot_absent_per", default)]
    pub spot_absent: Option<String>,
    #[serde(rename = "Day_double_duty_per", default)]
    pub double_duty: Option<String>,
    #[serde(rename = "Mon_off_cancellation_per", default)]
    pub off_cancellation: Option<String>,
    #[serde(rename = "service_driver_check", default)]
    pub service_driver_check: Option<String>,
}

/// Depot classification; selects which benchmark table applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Rural,
    Urban,
    Other(String),
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        match s.trim() {
            "Rural" => Category::Rural,
            "Urban" => Category::Urban,
            other => Category::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Rural => write!(f, "Rural"),
            Category::Urban => write!(f, "Urban"),
            Category::Other(s) => write!(f, "{}", s),
        }
    }
}

/// One depot-day of activity after cleaning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityRecord {
    pub depot_name: String,
    /// `None` when the source date could not be parsed.
    pub entry_date: Option<NaiveDate>,
    pub category: Option<Category>,
    /// Counts are kept as read; only totals are truncated to whole numbers.
    pub planned_schedules: Option<f64>,
    pub total_drivers: Option<f64>,
    pub weekly_off: Option<f64>,
    pub special_off: Option<f64>,
    pub others: Option<f64>,
    pub leave_absent: Option<f64>,
    pub sick_leave: Option<f64>,
    pub spot_absent: Option<f64>,
    pub double_duty: Option<f64>,
    pub off_cancellation: Option<f64>,
    pub service_driver_check: Option<f64>,
}

/// Numeric result of comparing one metric against its benchmark.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub label: &'static str,
    pub benchmark: Option<f64>,
    pub value: Option<f64>,
    pub variance: Option<f64>,
}

/// Direction of a variance, decided from the signed number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceFlag {
    /// Value exceeds the benchmark.
    Adverse,
    /// Value is below the benchmark.
    Favorable,
    Neutral,
}

impl fmt::Display for VarianceFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarianceFlag::Adverse => write!(f, "Above Benchmark"),
            VarianceFlag::Favorable => write!(f, "Within / Below Benchmark"),
            VarianceFlag::Neutral => Ok(()),
        }
    }
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct DisplayRow {
    #[serde(rename = "Metric")]
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[serde(rename = "Benchmark")]
    #[tabled(rename = "Benchmark")]
    pub benchmark: String,
    #[serde(rename = "Value")]
    #[tabled(rename = "Value")]
    pub value: String,
    #[serde(rename = "Variance")]
    #[tabled(rename = "Variance")]
    pub variance: String,
    #[serde(rename = "Status")]
    #[tabled(rename = "Status")]
    pub variance_flag: VarianceFlag,
    #[serde(rename = "BenchmarkMarker")]
    #[tabled(skip)]
    pub benchmark_marker: bool,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ReportContext {
    pub category: Option<Category>,
    pub days_considered: usize,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct HeadlineCards {
    pub planned_schedules: i64,
    pub total_drivers: i64,
    pub drivers_per_schedule: f64,
}
