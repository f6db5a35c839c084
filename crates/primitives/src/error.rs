//! Error types for parsing primitive values.

/// Errors that can occur while parsing a primitive from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Unknown period granularity.
    #[error("unknown granularity: {0}")]
    Granularity(String),

    /// Unknown segmentation scheme.
    #[error("unknown segment scheme: {0}")]
    Scheme(String),

    /// Unknown display scaling unit.
    #[error("unknown scale unit: {0}")]
    ScaleUnit(String),
}
