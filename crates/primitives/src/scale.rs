//! Display scaling units for monetary values.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Unit in which monetary values are displayed.
///
/// Scaling is a display concern only: pipeline outputs are always in
/// unscaled currency units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleUnit {
    /// No scaling.
    #[default]
    Unit,
    /// Millions ("milhão").
    Million,
    /// Billions ("bilhão").
    Billion,
    /// Trillions ("trilhão").
    Trillion,
}

impl ScaleUnit {
    /// Divisor applied to values displayed in this unit.
    #[must_use]
    pub const fn divisor(&self) -> f64 {
        match self {
            Self::Unit => 1.0,
            Self::Million => 1e6,
            Self::Billion => 1e9,
            Self::Trillion => 1e12,
        }
    }

    /// Portuguese label used in axis titles.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Unit => "",
            Self::Million => "milhão",
            Self::Billion => "bilhão",
            Self::Trillion => "trilhão",
        }
    }

    /// Parse a unit label, falling back to [`ScaleUnit::Unit`] when the label
    /// is not recognized.
    #[must_use]
    pub fn from_label_or_unit(label: &str) -> Self {
        label.parse().unwrap_or_else(|err| {
            tracing::warn!(%err, label, "unrecognized scale unit, using 1");
            Self::Unit
        })
    }
}

impl FromStr for ScaleUnit {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "unit" | "1" => Ok(Self::Unit),
            "milhão" | "milhao" | "million" => Ok(Self::Million),
            "bilhão" | "bilhao" | "billion" => Ok(Self::Billion),
            "trilhão" | "trilhao" | "trillion" => Ok(Self::Trillion),
            other => Err(ParseError::ScaleUnit(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("milhão", 1e6)]
    #[case("bilhão", 1e9)]
    #[case("trilhao", 1e12)]
    #[case("", 1.0)]
    fn scale_unit_divisors(#[case] label: &str, #[case] divisor: f64) {
        let unit: ScaleUnit = label.parse().unwrap();
        assert!((unit.divisor() - divisor).abs() < f64::EPSILON);
    }

    #[test]
    fn scale_unit_falls_back_to_unit() {
        assert_eq!(ScaleUnit::from_label_or_unit("quatrilhão"), ScaleUnit::Unit);
        assert_eq!(ScaleUnit::from_label_or_unit("bilhão"), ScaleUnit::Billion);
    }
}
