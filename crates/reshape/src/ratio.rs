//! Delinquency-rate derivation.

use polars::prelude::*;
use scr_primitives::{ACTIVE_PORTFOLIO, DELINQUENCY_RATE, DELINQUENT_PORTFOLIO};

/// Delinquency rate in percent: `100 * delinquent / active`.
///
/// A zero active balance yields NaN rather than an infinite rate.
#[must_use]
pub fn delinquency_rate(delinquent_col: &str, active_col: &str) -> Expr {
    when(col(active_col).eq(lit(0.0)))
        .then(lit(f64::NAN))
        .otherwise(lit(100.0) * col(delinquent_col) / col(active_col))
}

/// Append the [`DELINQUENCY_RATE`] column computed from the standard
/// portfolio columns.
#[must_use]
pub fn with_delinquency_rate(lf: LazyFrame) -> LazyFrame {
    lf.with_column(delinquency_rate(DELINQUENT_PORTFOLIO, ACTIVE_PORTFOLIO).alias(DELINQUENCY_RATE))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn rate_is_percentage() {
        let df = df! {
            ACTIVE_PORTFOLIO => &[200.0, 50.0],
            DELINQUENT_PORTFOLIO => &[10.0, 50.0],
        }
        .unwrap();

        let result = with_delinquency_rate(df.lazy()).collect().unwrap();
        let rate = result.column(DELINQUENCY_RATE).unwrap().f64().unwrap();

        assert_relative_eq!(rate.get(0).unwrap(), 5.0);
        assert_relative_eq!(rate.get(1).unwrap(), 100.0);
    }

    #[test]
    fn zero_denominator_is_nan() {
        let df = df! {
            ACTIVE_PORTFOLIO => &[0.0, 0.0],
            DELINQUENT_PORTFOLIO => &[3.0, 0.0],
        }
        .unwrap();

        let result = with_delinquency_rate(df.lazy()).collect().unwrap();
        let rate = result.column(DELINQUENCY_RATE).unwrap().f64().unwrap();

        assert!(rate.get(0).unwrap().is_nan());
        assert!(rate.get(1).unwrap().is_nan());
    }
}
