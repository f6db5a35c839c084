//! Top-state selection.

use polars::prelude::*;
use scr_primitives::{NATIONWIDE, Uf};

use crate::ReshapeError;

/// States kept individually in the long table.
///
/// Ordered by descending total value, with the nationwide aggregate (when
/// kept) last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopStates {
    states: Vec<Uf>,
    folded: Vec<Uf>,
}

impl TopStates {
    /// Kept states, in rank order.
    #[must_use]
    pub fn states(&self) -> &[Uf] {
        &self.states
    }

    /// Ranked states that fall outside the top set and are folded into the
    /// "other states" bucket.
    #[must_use]
    pub fn folded(&self) -> &[Uf] {
        &self.folded
    }

    /// Returns whether a state is kept.
    #[must_use]
    pub fn contains(&self, state: &str) -> bool {
        self.states.iter().any(|s| s.as_str() == state)
    }

    /// Number of kept states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns whether no state is kept.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Kept states as a string series, for membership expressions.
    #[must_use]
    pub fn to_series(&self, name: &str) -> Series {
        let values: Vec<&str> = self.states.iter().map(Uf::as_str).collect();
        Series::new(name.into(), values)
    }
}

/// Rank states by total value and select the top set.
///
/// The total of a state is the sum of all `fields` over every period and
/// segment. The nationwide aggregate never takes part in the ranking; it is
/// appended to the top set when present and `drop_nationwide` is false.
/// Ties keep the order in which states first appear in `df`. Missing (null
/// or NaN) values count as zero; rows without a state are never ranked.
///
/// # Arguments
/// * `df` - Table with a state column and numeric value columns
/// * `state_col` - State column name
/// * `fields` - Value columns summed into the ranking total
/// * `top_n` - Number of states kept; `None` keeps all
/// * `drop_nationwide` - Leave the nationwide aggregate out of the set
///
/// # Errors
/// Returns `ReshapeError` if a column is missing or not numeric.
pub fn rank_states(
    df: &DataFrame,
    state_col: &str,
    fields: &[&str],
    top_n: Option<usize>,
    drop_nationwide: bool,
) -> Result<TopStates, ReshapeError> {
    let sums: Vec<Expr> = fields
        .iter()
        .map(|&f| col(f).cast(DataType::Float64).fill_nan(lit(NULL)).sum())
        .collect();
    let totals = df.clone().lazy().group_by_stable([col(state_col)]).agg(sums).collect()?;

    let mut row_totals = vec![0.0; totals.height()];
    for &field in fields {
        let values = totals.column(field)?.f64()?;
        for (acc, value) in row_totals.iter_mut().zip(values.into_iter()) {
            *acc += value.unwrap_or(0.0);
        }
    }

    let names = totals.column(state_col)?.str()?;
    let mut has_nationwide = false;
    let mut ranked: Vec<(Uf, f64)> = Vec::with_capacity(totals.height());
    for (name, total) in names.into_iter().zip(row_totals) {
        match name {
            Some(NATIONWIDE) => has_nationwide = true,
            Some(name) => ranked.push((Uf::new(name), total)),
            None => {}
        }
    }

    // Stable sort keeps first-appearance order among equal totals
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let keep = top_n.unwrap_or(ranked.len()).min(ranked.len());
    let folded: Vec<Uf> = ranked.split_off(keep).into_iter().map(|(uf, _)| uf).collect();
    let mut states: Vec<Uf> = ranked.into_iter().map(|(uf, _)| uf).collect();
    if has_nationwide && !drop_nationwide {
        states.push(Uf::new(NATIONWIDE));
    }

    tracing::debug!(
        kept = ?states.iter().map(Uf::as_str).collect::<Vec<_>>(),
        folded = folded.len(),
        "ranked states"
    );

    Ok(TopStates { states, folded })
}
