//! Segment reshaping pipeline.

use polars::prelude::*;
use scr_period::resample;
use scr_primitives::NATIONWIDE;

use crate::{
    LongTable, ReshapeConfig, ReshapeError, fold_other_states, rank_states, with_delinquency_rate,
};

/// Segment reshaper.
///
/// Turns a tidy `(period, state, segment, value fields...)` table into a
/// [`LongTable`] with the top states kept individually and every other state
/// folded into one bucket per segment and period.
#[derive(Debug, Clone, Default)]
pub struct SegmentReshaper {
    config: ReshapeConfig,
}

impl SegmentReshaper {
    /// Create a new reshaper with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new reshaper with custom configuration.
    #[must_use]
    pub const fn with_config(config: ReshapeConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &ReshapeConfig {
        &self.config
    }

    /// Reshape a table. See [`reshape`].
    ///
    /// # Errors
    /// Returns `ReshapeError` on configuration errors or processing failure.
    pub fn reshape(&self, df: &DataFrame) -> Result<LongTable, ReshapeError> {
        reshape(df, &self.config)
    }
}

/// Reshape a tidy SCR table into a long table.
///
/// Steps, in order: segment relabeling (colliding labels are summed),
/// period resampling, top-state ranking over the resampled range, removal
/// of the nationwide rows when requested, folding of the remaining states
/// into the "other states" bucket, and derivation of the delinquency rate
/// when both portfolio balances are requested.
///
/// The input is never modified.
///
/// # Errors
/// Returns a configuration error (`InvalidConfig`, `MissingColumn`,
/// `UnknownField`) before any processing if the configuration does not fit
/// the table, and `Period` or `Polars` errors if processing fails.
pub fn reshape(df: &DataFrame, config: &ReshapeConfig) -> Result<LongTable, ReshapeError> {
    config.validate()?;

    let keys = config.columns.keys();
    let [period, state, segment] = keys;
    let fields = config.fields();

    for key in keys {
        if df.column(key).is_err() {
            return Err(ReshapeError::MissingColumn(key.to_string()));
        }
    }
    for &field in &fields {
        if df.column(field).is_err() {
            return Err(ReshapeError::UnknownField(field.to_string()));
        }
    }

    let mut projection = vec![
        col(period),
        col(state).cast(DataType::String),
        col(segment).cast(DataType::String),
    ];
    // NaN marks a missing value; nulls are skipped by sums
    projection.extend(fields.iter().map(|&f| col(f).cast(DataType::Float64).fill_nan(lit(NULL))));
    let mut lf = df.clone().lazy().select(projection);

    if let Some(labels) = config.segment_labels.as_ref().filter(|labels| !labels.is_empty()) {
        lf = lf
            .with_column(labels.relabel_expr(segment))
            .group_by_stable([col(period), col(state), col(segment)])
            .agg(fields.iter().map(|&f| col(f).sum()).collect::<Vec<_>>());
    }
    let table = lf.collect()?;

    let resampled = resample(&table, period, &[state, segment], &fields, &config.resample)?;

    let top = rank_states(&resampled, state, &fields, config.top_n_states, config.drop_nationwide)?;

    let resampled = if config.drop_nationwide {
        resampled.lazy().filter(col(state).neq_missing(lit(NATIONWIDE))).collect()?
    } else {
        resampled
    };

    let folded = fold_other_states(&resampled, keys, &top, &fields)?;

    let granularity = config.resample.granularity;
    let mut output = vec![col(period).alias(granularity.column_name()), col(state), col(segment)];
    output.extend(fields.iter().map(|&f| col(f)));
    let mut lf = folded.lazy().select(output);

    let has_rate = config.derives_rate();
    if has_rate {
        lf = with_delinquency_rate(lf);
    }
    let frame = lf.collect()?;

    tracing::debug!(
        rows_in = df.height(),
        rows_out = frame.height(),
        %granularity,
        top_states = top.len(),
        folded_states = top.folded().len(),
        "reshaped table"
    );

    Ok(LongTable::new(
        frame,
        granularity,
        state.to_string(),
        segment.to_string(),
        config.value_fields.clone(),
        has_rate,
    ))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use chrono::Months;
    use scr_period::ResampleConfig;
    use scr_primitives::{
        ACTIVE_PORTFOLIO, DELINQUENCY_RATE, DELINQUENT_PORTFOLIO, Date, Granularity, OTHER_STATES,
    };

    use super::*;
    use crate::SegmentLabels;

    fn month(i: u32) -> Date {
        Date::from_ymd_opt(2023, 1, 1).unwrap() + Months::new(i)
    }

    /// Three months of SP, RJ, MG and BR over two modalities.
    fn sample() -> DataFrame {
        let mut periods = Vec::new();
        let mut states = Vec::new();
        let mut segments = Vec::new();
        let mut active = Vec::new();
        let mut delinquent = Vec::new();

        for m in 0..3 {
            for (uf, base) in [("SP", 100.0), ("RJ", 10.0), ("MG", 5.0), ("BR", 1000.0)] {
                for (segment, share) in [("PF - Veículos", 1.0), ("PF - Habitacional", 0.5)] {
                    periods.push(month(m));
                    states.push(uf);
                    segments.push(segment);
                    active.push(base * share);
                    delinquent.push(base * share / 10.0);
                }
            }
        }

        DataFrame::new(vec![
            Column::new("ano_mes".into(), periods),
            Column::new("uf".into(), states),
            Column::new("modalidade".into(), segments),
            Column::new(ACTIVE_PORTFOLIO.into(), active),
            Column::new(DELINQUENT_PORTFOLIO.into(), delinquent),
        ])
        .unwrap()
    }

    fn monthly(top_n_states: Option<usize>, drop_nationwide: bool) -> ReshapeConfig {
        ReshapeConfig {
            top_n_states,
            drop_nationwide,
            resample: ResampleConfig { granularity: Granularity::Monthly, ..Default::default() },
            ..Default::default()
        }
    }

    fn column_strs(df: &DataFrame, name: &str) -> Vec<String> {
        df.column(name).unwrap().str().unwrap().into_no_null_iter().map(String::from).collect()
    }

    #[test]
    fn reshape_keeps_top_and_folds_rest() {
        let long = reshape(&sample(), &monthly(Some(1), true)).unwrap();
        let frame = long.frame();

        // Per month: SP x2 segments + other x2 segments
        assert_eq!(frame.height(), 12);
        let states = column_strs(frame, "uf");
        assert!(states.iter().all(|s| s == "SP" || s == OTHER_STATES));

        let active = frame.column(ACTIVE_PORTFOLIO).unwrap().f64().unwrap();
        // RJ + MG in the vehicles modality
        assert_relative_eq!(active.get(2).unwrap(), 15.0);
        assert_relative_eq!(active.get(3).unwrap(), 7.5);
    }

    #[test]
    fn reshape_keeps_nationwide_last_when_not_dropped() {
        let long = reshape(&sample(), &monthly(Some(1), false)).unwrap();
        let states: Vec<String> = long.states().unwrap().iter().map(|s| s.to_string()).collect();
        assert_eq!(states, vec!["SP", "BR", OTHER_STATES]);
    }

    #[test]
    fn reshape_names_period_by_granularity() {
        let long = reshape(&sample(), &ReshapeConfig::default()).unwrap();
        assert_eq!(long.period_column(), "trimestre");
        assert!(long.frame().column("trimestre").is_ok());
        assert!(long.frame().column("ano_mes").is_err());

        let long = reshape(&sample(), &monthly(None, false)).unwrap();
        assert!(long.frame().column("ano_mes").is_ok());
    }

    #[test]
    fn reshape_quarterly_sums_months() {
        let config = ReshapeConfig { top_n_states: Some(1), drop_nationwide: true, ..Default::default() };
        let long = reshape(&sample(), &config).unwrap();

        // One quarter: SP x2 + other x2
        assert_eq!(long.height(), 4);
        let active = long.frame().column(ACTIVE_PORTFOLIO).unwrap().f64().unwrap();
        assert_relative_eq!(active.get(0).unwrap(), 300.0);
    }

    #[test]
    fn reshape_derives_rate() {
        let long = reshape(&sample(), &monthly(Some(2), true)).unwrap();
        assert!(long.has_rate());

        let rate = long.frame().column(DELINQUENCY_RATE).unwrap().f64().unwrap();
        assert!(rate.into_no_null_iter().all(|r| (r - 10.0).abs() < 1e-9));
    }

    #[test]
    fn reshape_without_rate_for_single_field() {
        let config = ReshapeConfig {
            value_fields: vec![DELINQUENT_PORTFOLIO.to_string()],
            ..monthly(Some(2), true)
        };
        let long = reshape(&sample(), &config).unwrap();
        assert!(!long.has_rate());
        assert!(long.frame().column(DELINQUENCY_RATE).is_err());
    }

    #[test]
    fn reshape_rejects_unknown_field_immediately() {
        let config = ReshapeConfig {
            value_fields: vec![ACTIVE_PORTFOLIO.to_string(), "carteira_vencida".to_string()],
            ..Default::default()
        };
        let err = reshape(&sample(), &config).unwrap_err();
        assert!(matches!(&err, ReshapeError::UnknownField(f) if f == "carteira_vencida"));
        assert!(err.is_config_error());
    }

    #[test]
    fn reshape_rejects_missing_key_column() {
        let df = sample().drop("modalidade").unwrap();
        assert!(matches!(
            reshape(&df, &ReshapeConfig::default()),
            Err(ReshapeError::MissingColumn(c)) if c == "modalidade"
        ));
    }

    #[test]
    fn reshape_relabels_and_merges_segments() {
        let labels = SegmentLabels::new()
            .with("PF - Veículos", "PF")
            .with("PF - Habitacional", "PF");
        let config = ReshapeConfig { segment_labels: Some(labels), ..monthly(None, true) };

        let long = reshape(&sample(), &config).unwrap();

        let segments = column_strs(long.frame(), "modalidade");
        assert!(segments.iter().all(|s| s == "PF"));
        // 3 months x 3 states, one merged segment each
        assert_eq!(long.height(), 9);
        let active = long.frame().column(ACTIVE_PORTFOLIO).unwrap().f64().unwrap();
        assert_relative_eq!(active.get(0).unwrap(), 150.0);
    }

    #[test]
    fn reshape_trimmed_to_nothing_is_empty() {
        let df = sample()
            .lazy()
            .filter(col("ano_mes").lt(lit(scr_period::days_from_date(month(2))).cast(DataType::Date)))
            .collect()
            .unwrap();
        let config = ReshapeConfig {
            resample: ResampleConfig { granularity: Granularity::Quarterly, drop_incomplete_quarters: true },
            ..Default::default()
        };

        let long = reshape(&df, &config).unwrap();

        assert!(long.is_empty());
        assert!(long.frame().column(DELINQUENCY_RATE).is_ok());
    }

    #[test]
    fn reshape_leaves_input_untouched() {
        let df = sample();
        let before = df.clone();
        let reshaper = SegmentReshaper::with_config(monthly(Some(1), true));
        reshaper.reshape(&df).unwrap();
        assert!(df.equals(&before));
    }
}
