//! Error types for period resampling.

/// Errors that can occur during resampling.
#[derive(Debug, thiserror::Error)]
pub enum PeriodError {
    /// Polars error.
    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Missing column.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// Invalid parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PeriodError::MissingColumn("ano_mes".to_string());
        assert!(err.to_string().contains("ano_mes"));
    }
}
