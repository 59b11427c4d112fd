use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("cannot read activity data from {path}: {source}")]
    Source {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("invalid benchmark file {path}: {source}")]
    Benchmarks {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("export failed: {0}")]
    Export(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid selection: {0}")]
    InvalidSelection(String),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
