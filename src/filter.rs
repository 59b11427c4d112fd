use crate::error::{DashboardError, Result};
use crate::types::ActivityRecord;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn month_name(month: u32) -> &'static str {
    match month {
        1..=12 => MONTH_NAMES[month as usize - 1],
        _ => "???",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    /// Inclusive month range.
    pub fn months(self) -> (u32, u32) {
        match self {
            Quarter::Q1 => (1, 3),
            Quarter::Q2 => (4, 6),
            Quarter::Q3 => (7, 9),
            Quarter::Q4 => (10, 12),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Quarter::Q1 => "Q1 (Jan,Feb,Mar)",
            Quarter::Q2 => "Q2 (Apr,May,Jun)",
            Quarter::Q3 => "Q3 (Jul,Aug,Sep)",
            Quarter::Q4 => "Q4 (Oct,Nov,Dec)",
        }
    }
}

impl FromStr for Quarter {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "Q1" | "1" => Ok(Quarter::Q1),
            "Q2" | "2" => Ok(Quarter::Q2),
            "Q3" | "3" => Ok(Quarter::Q3),
            "Q4" | "4" => Ok(Quarter::Q4),
            other => Err(DashboardError::InvalidSelection(format!(
                "unknown quarter '{}', expected Q1..Q4",
                other
            ))),
        }
    }
}

/// Date-range predicate picked by the user for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePeriod {
    Daily(NaiveDate),
    Monthly { year: i32, month: u32 },
    Quarterly { year: i32, start_month: u32, end_month: u32 },
    Yearly(i32),
}

impl TimePeriod {
    pub fn monthly(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(DashboardError::InvalidSelection(format!(
                "month {} is outside 1..=12",
                month
            )));
        }
        Ok(TimePeriod::Monthly { year, month })
    }

    pub fn quarterly(year: i32, quarter: Quarter) -> Self {
        let (start_month, end_month) = quarter.months();
        TimePeriod::Quarterly { year, start_month, end_month }
    }

    /// Null dates never match.
    pub fn matches(&self, date: Option<NaiveDate>) -> bool {
        let Some(date) = date else { return false };
        match *self {
            TimePeriod::Daily(day) => date == day,
            TimePeriod::Monthly { year, month } => date.year() == year && date.month() == month,
            TimePeriod::Quarterly { year, start_month, end_month } => {
                date.year() == year && (start_month..=end_month).contains(&date.month())
            }
            TimePeriod::Yearly(year) => date.year() == year,
        }
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TimePeriod::Daily(day) => write!(f, "Daily: {}", day.format("%Y-%m-%d")),
            TimePeriod::Monthly { year, month } => {
                write!(f, "Monthly: {} {}", month_name(month), year)
            }
            TimePeriod::Quarterly { year, start_month, end_month } => write!(
                f,
                "Quarterly: {}-{} {}",
                month_name(start_month),
                month_name(end_month),
                year
            ),
            TimePeriod::Yearly(year) => write!(f, "Yearly: {}", year),
        }
    }
}

/// Records for exactly `depot` that fall inside `period`.
pub fn filter_records<'a>(
    records: &'a [ActivityRecord],
    depot: &str,
    period: &TimePeriod,
) -> Vec<&'a ActivityRecord> {
    records
        .iter()
        .filter(|r| r.depot_name == depot && period.matches(r.entry_date))
        .collect()
}

/// Sorted distinct depot names.
pub fn depot_names(records: &[ActivityRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.depot_name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Years with dated rows for `depot`, newest first.
pub fn years_for(records: &[ActivityRecord], depot: &str) -> Vec<i32> {
    records
        .iter()
        .filter(|r| r.depot_name == depot)
        .filter_map(|r| r.entry_date.map(|d| d.year()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .collect()
}
