use crate::error::{DashboardError, Result};
use crate::filter::{years_for, Quarter, TimePeriod};
use crate::report::Selection;
use crate::types::ActivityRecord;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "depot_dashboard", version, about = "Depot productivity dashboard")]
pub struct Cli {
    /// CSV export of the depot activity table
    #[arg(long, env = "DEPOT_DATA", default_value = "depot_data.csv", global = true)]
    pub data: PathBuf,

    /// JSON file replacing the built-in rural/urban benchmark tables
    #[arg(long, env = "DEPOT_BENCHMARKS", global = true)]
    pub benchmarks: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List depot names
    Depots,
    /// List years with data for a depot
    Years {
        #[arg(long)]
        depot: String,
    },
    /// Render the productivity table for one depot and period
    Report(ReportArgs),
    /// Interactive selection session
    Menu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PeriodKind {
    Daily,
    Monthly,
    Quarterly,
    Yearly,
}

impl PeriodKind {
    pub const ALL: [PeriodKind; 4] = [
        PeriodKind::Daily,
        PeriodKind::Monthly,
        PeriodKind::Quarterly,
        PeriodKind::Yearly,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PeriodKind::Daily => "Daily",
            PeriodKind::Monthly => "Monthly",
            PeriodKind::Quarterly => "Quarterly",
            PeriodKind::Yearly => "Yearly",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct PeriodArgs {
    #[arg(long, value_enum, default_value = "monthly")]
    pub period: PeriodKind,
    /// YYYY-MM-DD, daily only (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Defaults to the newest year with data for the depot
    #[arg(long)]
    pub year: Option<i32>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12), default_value_t = 1)]
    pub month: u32,
    #[arg(long, default_value = "Q1")]
    pub quarter: String,
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[arg(long)]
    pub depot: String,
    #[command(flatten)]
    pub period: PeriodArgs,
    /// Also write the metric table as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,
    /// Also write the full report as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,
}

impl PeriodArgs {
    pub fn resolve(&self, records: &[ActivityRecord], depot: &str) -> Result<TimePeriod> {
        let year = || -> Result<i32> {
            match self.year {
                Some(y) => Ok(y),
                None => years_for(records, depot).first().copied().ok_or_else(|| {
                    DashboardError::InvalidSelection(format!(
                        "no dated rows for depot '{}', pass --year",
                        depot
                    ))
                }),
            }
        };
        match self.period {
            PeriodKind::Daily => Ok(TimePeriod::Daily(
                self.date.unwrap_or_else(|| Local::now().date_naive()),
            )),
            PeriodKind::Monthly => TimePeriod::monthly(year()?, self.month),
            PeriodKind::Quarterly => {
                let quarter = self.quarter.parse::<Quarter>()?;
                Ok(TimePeriod::quarterly(year()?, quarter))
            }
            PeriodKind::Yearly => Ok(TimePeriod::Yearly(year()?)),
        }
    }
}

impl ReportArgs {
    pub fn selection(&self, records: &[ActivityRecord]) -> Result<Selection> {
        Ok(Selection {
            depot: self.depot.clone(),
            period: self.period.resolve(records, &self.depot)?,
        })
    }
}
