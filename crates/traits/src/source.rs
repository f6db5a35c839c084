//! Wide-table source trait definitions.

use polars::prelude::*;
use scr_primitives::SegmentScheme;

/// Errors that can occur while loading a wide table.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// No table is stored for the scheme.
    #[error("no table available for scheme {0}")]
    NotFound(SegmentScheme),

    /// I/O error while reading persisted data.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error.
    #[error("data processing error: {0}")]
    Polars(#[from] PolarsError),

    /// Persisted data does not have the expected layout.
    #[error("malformed table: {0}")]
    Malformed(String),
}

impl SourceError {
    /// Returns whether this error is recoverable.
    ///
    /// A missing scheme leaves other schemes usable.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Supplier of persisted wide tables, one per segmentation scheme.
///
/// Implementations return a tidy table with a `Date` period column, a state
/// column, the scheme's segment column and one `Float64` column per value
/// field.
pub trait WideTableSource {
    /// Load the table for a segmentation scheme.
    ///
    /// # Errors
    /// Returns `SourceError` if the table is absent or cannot be read.
    fn load(&self, scheme: SegmentScheme) -> Result<DataFrame, SourceError>;

    /// Returns a short description of where tables come from.
    fn describe(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_error_is_recoverable() {
        assert!(SourceError::NotFound(SegmentScheme::Modality).is_recoverable());
        assert!(!SourceError::Malformed("no period column".to_string()).is_recoverable());
    }

    #[test]
    fn source_error_display() {
        let err = SourceError::NotFound(SegmentScheme::SizeBracket);
        assert_eq!(err.to_string(), "no table available for scheme porte");
    }
}
