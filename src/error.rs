//! Error types for content model conversion.

use thiserror::Error;

/// Errors surfaced by the conversion entry points.
///
/// Malformed styling never produces an error: format handlers absorb
/// unparsable CSS locally and leave the corresponding field unset. Only
/// structural violations in a model handed to the writer are reported.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid table structure: {0}")]
    InvalidTable(String),

    #[error("invalid model structure: {0}")]
    InvalidModel(String),
}

pub type Result<T> = std::result::Result<T, Error>;
