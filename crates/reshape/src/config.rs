//! Reshaping configuration.

use std::collections::HashSet;

use scr_period::ResampleConfig;
use scr_primitives::{ACTIVE_PORTFOLIO, ColumnMap, DELINQUENT_PORTFOLIO};
use serde::{Deserialize, Serialize};

use crate::{ReshapeError, SegmentLabels};

/// Configuration for segment reshaping.
///
/// Every field takes part in the cache key of [`crate::ReshapeCache`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReshapeConfig {
    /// Value fields to carry into the long table.
    pub value_fields: Vec<String>,
    /// Number of states kept individually; `None` keeps every state.
    pub top_n_states: Option<usize>,
    /// Remove the nationwide `BR` rows instead of keeping them.
    pub drop_nationwide: bool,
    /// Period granularity and trimming.
    pub resample: ResampleConfig,
    /// Segment relabeling applied before aggregation.
    pub segment_labels: Option<SegmentLabels>,
    /// Key column names of the input table.
    pub columns: ColumnMap,
}

impl Default for ReshapeConfig {
    fn default() -> Self {
        Self {
            value_fields: vec![ACTIVE_PORTFOLIO.to_string(), DELINQUENT_PORTFOLIO.to_string()],
            top_n_states: Some(5),
            drop_nationwide: false,
            resample: ResampleConfig::default(),
            segment_labels: None,
            columns: ColumnMap::default(),
        }
    }
}

impl ReshapeConfig {
    /// Value fields as string slices.
    #[must_use]
    pub fn fields(&self) -> Vec<&str> {
        self.value_fields.iter().map(String::as_str).collect()
    }

    /// Returns whether the delinquency rate is derived, i.e. both the
    /// active and the delinquent portfolio are requested.
    #[must_use]
    pub fn derives_rate(&self) -> bool {
        let has = |name: &str| self.value_fields.iter().any(|f| f == name);
        has(ACTIVE_PORTFOLIO) && has(DELINQUENT_PORTFOLIO)
    }

    /// Check the configuration independently of any table.
    ///
    /// # Errors
    /// Returns `ReshapeError::InvalidConfig` for an empty, blank, duplicated
    /// or key-shadowing value field, or for clashing key column names.
    pub fn validate(&self) -> Result<(), ReshapeError> {
        if self.value_fields.is_empty() {
            return Err(ReshapeError::InvalidConfig("no value fields requested".to_string()));
        }

        let keys = self.columns.keys();
        if keys.iter().collect::<HashSet<_>>().len() != keys.len() {
            return Err(ReshapeError::InvalidConfig(format!(
                "key columns must be distinct, got {keys:?}"
            )));
        }

        let mut seen = HashSet::new();
        for field in &self.value_fields {
            if field.trim().is_empty() {
                return Err(ReshapeError::InvalidConfig("blank value field name".to_string()));
            }
            if keys.contains(&field.as_str()) {
                return Err(ReshapeError::InvalidConfig(format!(
                    "value field {field} shadows a key column"
                )));
            }
            if !seen.insert(field.as_str()) {
                return Err(ReshapeError::InvalidConfig(format!("duplicate value field {field}")));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use scr_primitives::Granularity;

    use super::*;

    #[test]
    fn reshape_config_defaults() {
        let config = ReshapeConfig::default();
        assert_eq!(config.fields(), vec![ACTIVE_PORTFOLIO, DELINQUENT_PORTFOLIO]);
        assert_eq!(config.top_n_states, Some(5));
        assert!(!config.drop_nationwide);
        assert_eq!(config.resample.granularity, Granularity::Quarterly);
        assert!(config.segment_labels.is_none());
        assert!(config.derives_rate());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rate_requires_both_portfolios() {
        let config = ReshapeConfig {
            value_fields: vec![DELINQUENT_PORTFOLIO.to_string()],
            ..Default::default()
        };
        assert!(!config.derives_rate());
    }

    #[test]
    fn validate_rejects_bad_fields() {
        let cases = [vec![], vec![" ".to_string()], vec!["uf".to_string()], vec![
            "a".to_string(),
            "a".to_string(),
        ]];
        for value_fields in cases {
            let config = ReshapeConfig { value_fields, ..Default::default() };
            assert!(matches!(config.validate(), Err(ReshapeError::InvalidConfig(_))));
        }
    }

    #[test]
    fn validate_rejects_clashing_keys() {
        let config =
            ReshapeConfig { columns: ColumnMap::new("uf", "uf", "modalidade"), ..Default::default() };
        assert!(config.validate().is_err());
    }
}
