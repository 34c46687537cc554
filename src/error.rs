//! Error types for parsing and propagation.

use thiserror::Error;

/// Errors produced while parsing user-entered text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Malformed dimension: {0:?}")]
    Malformed(String),
    #[error("Malformed aspect ratio: {0:?} (expected <w>:<h>)")]
    MalformedRatio(String),
}

/// Errors that reject a single edit. The snapshot is left unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(&'static str),
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
    #[error("{0} is not enabled in this calculator")]
    Unsupported(&'static str),
}

impl EngineError {
    /// True when the edit was rejected because its text could not be parsed.
    pub fn is_parse(&self) -> bool {
        matches!(self, EngineError::Parse(_))
    }
}
