//! Period granularity of a time series.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Time granularity of the reshaped output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// One row per calendar month.
    Monthly,
    /// One row per calendar quarter, keyed by the quarter's first day.
    #[default]
    Quarterly,
}

impl Granularity {
    /// Name of the period column in tables at this granularity.
    #[must_use]
    pub const fn column_name(&self) -> &'static str {
        match self {
            Self::Monthly => "ano_mes",
            Self::Quarterly => "trimestre",
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Quarterly => write!(f, "quarterly"),
        }
    }
}

impl FromStr for Granularity {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" | "ano_mes" | "mes" => Ok(Self::Monthly),
            "quarterly" | "quarter" | "trimestre" => Ok(Self::Quarterly),
            other => Err(ParseError::Granularity(other.to_string())),
        }
    }
}
