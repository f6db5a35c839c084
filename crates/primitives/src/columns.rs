//! Column and value-field names.

use serde::{Deserialize, Serialize};

use crate::SegmentScheme;

/// Active credit portfolio balance ("carteira ativa").
pub const ACTIVE_PORTFOLIO: &str = "carteira_ativa";

/// Delinquent ("carried") portfolio balance ("carteira inadimplida arrastada").
pub const DELINQUENT_PORTFOLIO: &str = "carteira_inadimplida_arrastada";

/// Derived delinquency rate, in percent.
pub const DELINQUENCY_RATE: &str = "inadimplencia";

/// Names of the key columns of an input table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnMap {
    /// Month-start period column.
    pub period: String,
    /// State code column.
    pub state: String,
    /// Segment column.
    pub segment: String,
}

impl ColumnMap {
    /// Create a column map.
    #[must_use]
    pub fn new(
        period: impl Into<String>,
        state: impl Into<String>,
        segment: impl Into<String>,
    ) -> Self {
        Self { period: period.into(), state: state.into(), segment: segment.into() }
    }

    /// Default period and state columns with the scheme's segment column.
    #[must_use]
    pub fn for_scheme(scheme: SegmentScheme) -> Self {
        Self { segment: scheme.segment_column().to_string(), ..Self::default() }
    }

    /// Returns the key columns in (period, state, segment) order.
    #[must_use]
    pub fn keys(&self) -> [&str; 3] {
        [self.period.as_str(), self.state.as_str(), self.segment.as_str()]
    }
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self::new("ano_mes", "uf", "modalidade")
    }
}
