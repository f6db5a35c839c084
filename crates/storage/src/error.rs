//! Error types for table storage.

use scr_primitives::SegmentScheme;
use scr_traits::SourceError;

/// Errors that can occur while loading tables into a store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The source failed to load the table.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A key column is absent.
    #[error("table {scheme} is missing column {column}")]
    MissingColumn {
        /// Scheme of the table.
        scheme: SegmentScheme,
        /// Name of the absent column.
        column: String,
    },

    /// The period column is not a date column.
    #[error("table {scheme}: period column {column} has type {dtype}, expected date")]
    InvalidPeriod {
        /// Scheme of the table.
        scheme: SegmentScheme,
        /// Name of the period column.
        column: String,
        /// Type found instead.
        dtype: String,
    },
}

impl StorageError {
    /// Returns whether this error is recoverable.
    ///
    /// Only an absent table is; other schemes stay usable.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Source(err) => err.is_recoverable(),
            _ => false,
        }
    }
}
