use thiserror::Error;

/// Failures that cross the dashboard boundary.
///
/// A selection matching no rows is not an error: it produces a summary whose
/// tables are all empty.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The report label is not one of the recognised modes.
    #[error("unrecognised report type {0:?}")]
    InvalidSelection(String),
    /// The dataset could not be fetched or parsed at startup.
    #[error("dataset unavailable from {origin}: {reason}")]
    DatasetUnavailable { origin: String, reason: String },
}
