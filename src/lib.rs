//! Depot productivity dashboard: filters depot activity by period, aggregates
//! the fixed metric list and compares it against category benchmarks.

pub mod benchmarks;
pub mod config;
pub mod error;
pub mod filter;
pub mod format;
pub mod metrics;
pub mod output;
pub mod report;
pub mod source;
pub mod types;
pub mod util;

pub use error::{DashboardError, Result};
