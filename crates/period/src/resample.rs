//! Monthly to quarterly resampling.

use polars::prelude::*;
use scr_primitives::{Date, Granularity};
use serde::{Deserialize, Serialize};

use crate::{PeriodError, date_from_days, days_from_date, quarter_start, trim_bounds};

/// Configuration for period resampling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResampleConfig {
    /// Output granularity.
    pub granularity: Granularity,
    /// Drop months of incomplete quarters at both ends before resampling.
    pub drop_incomplete_quarters: bool,
}

/// Period resampler.
///
/// Sums additive value columns into calendar-quarter buckets keyed by the
/// quarter's first day. Monthly granularity passes the table through.
#[derive(Debug, Clone, Default)]
pub struct Resampler {
    config: ResampleConfig,
}

impl Resampler {
    /// Create a new resampler with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new resampler with custom configuration.
    #[must_use]
    pub const fn with_config(config: ResampleConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &ResampleConfig {
        &self.config
    }

    /// Resample a table. See [`resample`].
    ///
    /// # Errors
    /// Returns `PeriodError` if a column is missing or the period column is
    /// not a date.
    pub fn apply(
        &self,
        df: &DataFrame,
        period_col: &str,
        keys: &[&str],
        values: &[&str],
    ) -> Result<DataFrame, PeriodError> {
        resample(df, period_col, keys, values, &self.config)
    }
}

/// First and last period of a table.
///
/// # Returns
/// `None` for a table without periods.
///
/// # Errors
/// Returns `PeriodError` if the column is missing or not a date.
pub fn period_bounds(df: &DataFrame, period_col: &str) -> Result<Option<(Date, Date)>, PeriodError> {
    let days = period_days(df, period_col)?;
    let bounds = match (days.min(), days.max()) {
        (Some(first), Some(last)) => date_from_days(first).zip(date_from_days(last)),
        _ => None,
    };
    Ok(bounds)
}

/// Resample a month-start table to the configured granularity.
///
/// With quarterly granularity, rows are grouped by the quarter of their
/// period and by `keys`, and each of `values` is summed per group. When
/// `drop_incomplete_quarters` is set, leading and trailing months outside a
/// complete quarter are removed first; if no complete quarter remains the
/// result is an empty table with the input schema.
///
/// # Arguments
/// * `df` - Gap-free monthly table
/// * `period_col` - Date column holding month starts
/// * `keys` - Columns identifying a series (e.g. state and segment)
/// * `values` - Additive columns to sum
/// * `config` - Granularity and trimming
///
/// # Returns
/// The resampled table, sorted by period.
///
/// # Errors
/// Returns `PeriodError` if a column is missing or the period column is not
/// a date.
pub fn resample(
    df: &DataFrame,
    period_col: &str,
    keys: &[&str],
    values: &[&str],
    config: &ResampleConfig,
) -> Result<DataFrame, PeriodError> {
    for &name in keys.iter().chain(values) {
        if df.column(name).is_err() {
            return Err(PeriodError::MissingColumn(name.to_string()));
        }
    }

    let bounds = period_bounds(df, period_col)?;
    if config.granularity == Granularity::Monthly {
        return Ok(df.clone());
    }
    let Some((first, last)) = bounds else {
        return Ok(df.clone());
    };

    let mut bucketed = if config.drop_incomplete_quarters {
        let Some((start, end)) = trim_bounds(first, last) else {
            tracing::debug!(%first, %last, "no complete quarter in series");
            return Ok(df.clear());
        };
        tracing::debug!(%first, %last, %start, %end, "trimmed incomplete quarters");

        df.clone()
            .lazy()
            .filter(
                col(period_col)
                    .gt_eq(date_lit(start))
                    .and(col(period_col).lt_eq(date_lit(end))),
            )
            .collect()?
    } else {
        df.clone()
    };

    let quarters = quarter_column(&bucketed, period_col)?;
    bucketed.with_column(quarters)?;

    let group_exprs: Vec<Expr> =
        std::iter::once(period_col).chain(keys.iter().copied()).map(|c| col(c)).collect();
    let agg_exprs: Vec<Expr> = values.iter().map(|&v| col(v).sum()).collect();

    let result = bucketed
        .lazy()
        .group_by_stable(group_exprs)
        .agg(agg_exprs)
        .sort([period_col], SortMultipleOptions::new().with_maintain_order(true))
        .collect()?;

    Ok(result)
}

fn date_lit(date: Date) -> Expr {
    lit(days_from_date(date)).cast(DataType::Date)
}

fn period_days(df: &DataFrame, period_col: &str) -> Result<Int32Chunked, PeriodError> {
    let column =
        df.column(period_col).map_err(|_| PeriodError::MissingColumn(period_col.to_string()))?;
    if column.dtype() != &DataType::Date {
        return Err(PeriodError::InvalidParameter(format!(
            "column {period_col} has type {}, expected date",
            column.dtype()
        )));
    }
    Ok(column.cast(&DataType::Int32)?.i32()?.clone())
}

/// Replace each month start with the start of its quarter.
fn quarter_column(df: &DataFrame, period_col: &str) -> Result<Column, PeriodError> {
    let days = period_days(df, period_col)?;
    let quarters: Vec<Option<i32>> = days
        .into_iter()
        .map(|d| d.and_then(date_from_days).map(|date| days_from_date(quarter_start(date))))
        .collect();

    Ok(Column::new(period_col.into(), quarters).cast(&DataType::Date)?)
}
