//! Folding of states outside the top set.

use polars::prelude::*;
use scr_primitives::OTHER_STATES;

use crate::{ReshapeError, TopStates};

/// Fold every state outside `top` into one "other states" row per period
/// and segment.
///
/// Rows of top states pass through unchanged. The remaining rows are summed
/// per `(period, segment)` and emitted with the state [`OTHER_STATES`]. A
/// period in which every row belongs to a top state gets no synthetic row.
///
/// # Arguments
/// * `df` - Long table keyed by `(period, state, segment)`
/// * `keys` - Period, state and segment column names
/// * `top` - States kept individually
/// * `fields` - Value columns to carry and sum
///
/// # Returns
/// Long table sorted by period; within a period, top-state rows keep their
/// input order and are followed by the synthetic rows.
///
/// # Errors
/// Returns `ReshapeError` if polars fails to evaluate the plan.
pub fn fold_other_states(
    df: &DataFrame,
    keys: [&str; 3],
    top: &TopStates,
    fields: &[&str],
) -> Result<DataFrame, ReshapeError> {
    let [period, state, segment] = keys;
    // Rows without a state fold into the bucket
    let in_top = col(state).is_in(lit(top.to_series(state))).fill_null(lit(false));

    let mut kept_cols = vec![col(period), col(state), col(segment)];
    kept_cols.extend(fields.iter().map(|&f| col(f)));
    let kept = df.clone().lazy().filter(in_top.clone()).select(kept_cols.clone());

    let other = df
        .clone()
        .lazy()
        .filter(in_top.not())
        .group_by_stable([col(period), col(segment)])
        .agg(fields.iter().map(|&f| col(f).sum()).collect::<Vec<_>>())
        .with_column(lit(OTHER_STATES).alias(state))
        .select(kept_cols);

    let folded = concat([kept, other], UnionArgs::default())?
        .sort([period], SortMultipleOptions::new().with_maintain_order(true))
        .collect()?;

    Ok(folded)
}
