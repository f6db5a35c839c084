//! Long-format output table.

use std::collections::HashSet;

use polars::prelude::*;
use scr_primitives::{DELINQUENCY_RATE, Granularity, ScaleUnit, Uf};

use crate::{ReshapeError, with_delinquency_rate};

/// Long-format table of `(period, state, segment)` rows.
///
/// Holds one column per value field and, when both portfolio balances are
/// present, the derived delinquency rate. The period column is named after
/// the granularity (`ano_mes` or `trimestre`).
#[derive(Debug, Clone)]
pub struct LongTable {
    frame: DataFrame,
    granularity: Granularity,
    state_col: String,
    segment_col: String,
    fields: Vec<String>,
    has_rate: bool,
}

impl LongTable {
    pub(crate) const fn new(
        frame: DataFrame,
        granularity: Granularity,
        state_col: String,
        segment_col: String,
        fields: Vec<String>,
        has_rate: bool,
    ) -> Self {
        Self { frame, granularity, state_col, segment_col, fields, has_rate }
    }

    /// Underlying data frame.
    #[must_use]
    pub const fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Consume the table, returning the data frame.
    #[must_use]
    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    /// Period granularity.
    #[must_use]
    pub const fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Name of the period column.
    #[must_use]
    pub const fn period_column(&self) -> &'static str {
        self.granularity.column_name()
    }

    /// Name of the state column.
    #[must_use]
    pub fn state_column(&self) -> &str {
        &self.state_col
    }

    /// Name of the segment column.
    #[must_use]
    pub fn segment_column(&self) -> &str {
        &self.segment_col
    }

    /// Value fields, in request order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns whether the delinquency rate column is present.
    #[must_use]
    pub const fn has_rate(&self) -> bool {
        self.has_rate
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Returns whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Distinct states in order of first appearance.
    ///
    /// # Errors
    /// Returns `ReshapeError` if the state column is not a string column.
    pub fn states(&self) -> Result<Vec<Uf>, ReshapeError> {
        let names = self.frame.column(&self.state_col)?.str()?;
        let mut seen = HashSet::new();
        Ok(names.into_iter().flatten().filter(|s| seen.insert(*s)).map(Uf::new).collect())
    }

    /// States ordered by descending total of `field`, with the "other
    /// states" bucket always last.
    ///
    /// # Errors
    /// Returns `ReshapeError::UnknownField` if `field` is not in the table.
    pub fn state_order(&self, field: &str) -> Result<Vec<Uf>, ReshapeError> {
        self.require_field(field)?;

        let totals = self
            .frame
            .clone()
            .lazy()
            .group_by_stable([col(self.state_col.as_str())])
            .agg([col(field).sum()])
            .sort(
                [field],
                SortMultipleOptions::new().with_order_descending(true).with_maintain_order(true),
            )
            .collect()?;

        let names = totals.column(&self.state_col)?.str()?;
        let (mut order, other): (Vec<Uf>, Vec<Uf>) =
            names.into_iter().flatten().map(Uf::new).partition(|uf| !uf.is_other());
        order.extend(other);
        Ok(order)
    }

    /// Rows of one state sorted by period and segment.
    ///
    /// # Errors
    /// Returns `ReshapeError` if polars fails to evaluate the plan.
    pub fn state_series(&self, state: &Uf) -> Result<DataFrame, ReshapeError> {
        let series = self
            .frame
            .clone()
            .lazy()
            .filter(col(self.state_col.as_str()).eq(lit(state.as_str())))
            .sort(
                [self.period_column(), self.segment_col.as_str()],
                SortMultipleOptions::new().with_maintain_order(true),
            )
            .collect()?;
        Ok(series)
    }

    /// Per-(period, state) totals summed over segments.
    ///
    /// The delinquency rate, when present, is recomputed from the totals.
    ///
    /// # Errors
    /// Returns `ReshapeError` if polars fails to evaluate the plan.
    pub fn totals_by_state(&self) -> Result<DataFrame, ReshapeError> {
        let sums: Vec<Expr> = self.fields.iter().map(|f| col(f.as_str()).sum()).collect();
        let totals = self
            .frame
            .clone()
            .lazy()
            .group_by_stable([col(self.period_column()), col(self.state_col.as_str())])
            .agg(sums)
            .sort([self.period_column()], SortMultipleOptions::new().with_maintain_order(true));

        let totals = if self.has_rate { with_delinquency_rate(totals) } else { totals };
        Ok(totals.collect()?)
    }

    /// Copy of the table with value fields divided by the unit's divisor.
    ///
    /// The delinquency rate is a ratio and is left unscaled.
    ///
    /// # Errors
    /// Returns `ReshapeError` if polars fails to evaluate the plan.
    pub fn scaled(&self, unit: ScaleUnit) -> Result<Self, ReshapeError> {
        let divisor = unit.divisor();
        let scaled: Vec<Expr> =
            self.fields.iter().map(|f| (col(f.as_str()) / lit(divisor)).alias(f.as_str())).collect();
        let frame = self.frame.clone().lazy().with_columns(scaled).collect()?;
        Ok(Self {
            frame,
            granularity: self.granularity,
            state_col: self.state_col.clone(),
            segment_col: self.segment_col.clone(),
            fields: self.fields.clone(),
            has_rate: self.has_rate,
        })
    }

    fn require_field(&self, field: &str) -> Result<(), ReshapeError> {
        if self.fields.iter().any(|f| f == field) || (self.has_rate && field == DELINQUENCY_RATE) {
            Ok(())
        } else {
            Err(ReshapeError::UnknownField(field.to_string()))
        }
    }
}
