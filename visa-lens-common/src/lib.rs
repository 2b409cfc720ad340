pub mod config;
pub use config::{Config, OutputConfig, ReportFormat};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisaLensError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("no candidate column for '{field}' found in header (tried: {})", .candidates.join(", "))]
    UnresolvedColumn { field: String, candidates: Vec<String> },
    #[error("malformed row {row}: need at least {needed} columns, found {found}")]
    MalformedRow { row: u64, needed: usize, found: usize },
    #[error("cannot compute percentages for '{field}': no rows matched the conditions")]
    ZeroDenominator { field: String },
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, VisaLensError>;
