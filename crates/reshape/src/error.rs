//! Error types for segment reshaping.

use scr_period::PeriodError;

/// Errors that can occur while reshaping a table.
#[derive(Debug, thiserror::Error)]
pub enum ReshapeError {
    /// Period resampling error.
    #[error("resampling error: {0}")]
    Period(#[from] PeriodError),

    /// Polars error.
    #[error("data processing error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Missing key column.
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// Requested value field is not a column of the table.
    #[error("unknown value field: {0}")]
    UnknownField(String),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ReshapeError {
    /// Returns whether this error stems from the caller's configuration
    /// rather than from processing the data.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::MissingColumn(_) | Self::UnknownField(_) | Self::InvalidConfig(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ReshapeError::UnknownField("carteira_vencida".to_string());
        assert_eq!(err.to_string(), "unknown value field: carteira_vencida");
    }

    #[test]
    fn error_is_config_error() {
        assert!(ReshapeError::UnknownField("x".to_string()).is_config_error());
        assert!(ReshapeError::InvalidConfig("x".to_string()).is_config_error());

        let err = ReshapeError::Period(PeriodError::InvalidParameter("x".to_string()));
        assert!(!err.is_config_error());
    }
}
