//! Error types for loading and analyzing sales data.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the loader, the aggregator, and derived views.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The input file is missing, unreadable, or does not match the schema.
    #[error("Failed to load {}: {reason}", .path.display())]
    DataLoad { path: PathBuf, reason: String },

    /// The aggregator was given data it cannot summarize.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A literal channel label required by a derived view is absent.
    #[error("Channel '{label}' not found in sales by channel")]
    MissingChannel { label: String },
}

impl DashboardError {
    pub fn data_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::DataLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
