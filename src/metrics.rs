use crate::types::{ActivityRecord, Category, HeadlineCards, ReportContext};
use crate::util::{mean, round_to};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    Sum,
    Mean,
}

/// The fixed, ordered list of reported metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    PlannedSchedules,
    TotalDrivers,
    WeeklyOff,
    SpecialOff,
    Others,
    LongLeaveAbsent,
    SickLeave,
    SpotAbsent,
    DoubleDuty,
    OffCancellation,
    ServicesDriverCheck,
}

impl Metric {
    pub const ALL: [Metric; 11] = [
        Metric::PlannedSchedules,
        Metric::TotalDrivers,
        Metric::WeeklyOff,
        Metric::SpecialOff,
        Metric::Others,
        Metric::LongLeaveAbsent,
        Metric::SickLeave,
        Metric::SpotAbsent,
        Metric::DoubleDuty,
        Metric::OffCancellation,
        Metric::ServicesDriverCheck,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Metric::PlannedSchedules => "Planned Schedules",
            Metric::TotalDrivers => "Total Drivers",
            Metric::WeeklyOff => "Weekly Off (%)",
            Metric::SpecialOff => "Special Off (Night Out/IC, Online) (%)",
            Metric::Others => "Others (%)",
            Metric::LongLeaveAbsent => "Long Leave & Absent (%)",
            Metric::SickLeave => "Sick Leave (%)",
            Metric::SpotAbsent => "Spot Absent (%)",
            Metric::DoubleDuty => "Double Duty (%)",
            Metric::OffCancellation => "Off Cancellation (%)",
            Metric::ServicesDriverCheck => "Services / Driver Check (%)",
        }
    }

    /// Label used to look up benchmarks: the trailing `(%)` marker removed.
    pub fn base_label(self) -> &'static str {
        base_label(self.label())
    }

    pub fn aggregation(self) -> Aggregation {
        match self {
            Metric::PlannedSchedules | Metric::TotalDrivers => Aggregation::Sum,
            _ => Aggregation::Mean,
        }
    }

    fn value_of(self, r: &ActivityRecord) -> Option<f64> {
        match self {
            Metric::PlannedSchedules => r.planned_schedules,
            Metric::TotalDrivers => r.total_drivers,
            Metric::WeeklyOff => r.weekly_off,
            Metric::SpecialOff => r.special_off,
            Metric::Others => r.others,
            Metric::LongLeaveAbsent => r.leave_absent,
            Metric::SickLeave => r.sick_leave,
            Metric::SpotAbsent => r.spot_absent,
            Metric::DoubleDuty => r.double_duty,
            Metric::OffCancellation => r.off_cancellation,
            Metric::ServicesDriverCheck => r.service_driver_check,
        }
    }
}

pub fn base_label(label: &str) -> &str {
    label.strip_suffix("(%)").map(str::trim_end).unwrap_or(label)
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateValue {
    pub metric: Metric,
    pub value: Option<f64>,
}

/// Sum first, then drop the fraction, so `[10.5, 10.5]` totals 21.
fn sum_counts<'a, I>(rows: I, pick: fn(&ActivityRecord) -> Option<f64>) -> i64
where
    I: IntoIterator<Item = &'a ActivityRecord>,
{
    rows.into_iter().filter_map(pick).sum::<f64>().trunc() as i64
}

/// One value per metric, in `Metric::ALL` order. Sums are integral and never
/// null; means are null when no row carries the field.
pub fn aggregate(rows: &[&ActivityRecord]) -> Vec<AggregateValue> {
    Metric::ALL
        .iter()
        .map(|&metric| {
            let value = match metric.aggregation() {
                Aggregation::Sum => Some(
                    rows.iter()
                        .filter_map(|r| metric.value_of(r))
                        .sum::<f64>()
                        .trunc(),
                ),
                Aggregation::Mean => mean(rows.iter().map(|r| metric.value_of(r))),
            };
            AggregateValue { metric, value }
        })
        .collect()
}

pub fn context(rows: &[&ActivityRecord]) -> ReportContext {
    let category: Option<Category> = rows.iter().find_map(|r| r.category.clone());
    let days_considered = rows
        .iter()
        .filter_map(|r| r.entry_date)
        .collect::<HashSet<_>>()
        .len();
    ReportContext { category, days_considered }
}

pub fn headline_cards(rows: &[&ActivityRecord]) -> HeadlineCards {
    let planned_schedules = sum_counts(rows.iter().copied(), |r| r.planned_schedules);
    let total_drivers = sum_counts(rows.iter().copied(), |r| r.total_drivers);
    let drivers_per_schedule = if planned_schedules == 0 {
        0.0
    } else {
        round_to(total_drivers as f64 / planned_schedules as f64, 2)
    };
    HeadlineCards {
        planned_schedules,
        total_drivers,
        drivers_per_schedule,
    }
}
