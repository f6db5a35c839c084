//! Segmentation schemes ("recortes") of the SCR tables.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Breakdown along which non-state values are split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentScheme {
    /// Credit modality (e.g. `PF - Veículos`).
    Modality,
    /// Borrower occupation.
    Occupation,
    /// Borrower size bracket.
    SizeBracket,
}

impl SegmentScheme {
    /// All schemes, in display order.
    pub const ALL: [Self; 3] = [Self::Modality, Self::Occupation, Self::SizeBracket];

    /// Name of the segment column for tables of this scheme.
    #[must_use]
    pub const fn segment_column(&self) -> &'static str {
        match self {
            Self::Modality => "modalidade",
            Self::Occupation => "ocupacao",
            Self::SizeBracket => "porte",
        }
    }

    /// File stem under which the persisted table of this scheme is stored.
    #[must_use]
    pub const fn file_stem(&self) -> &'static str {
        match self {
            Self::Modality => "scr_modalidade",
            Self::Occupation => "scr_ocupacao",
            Self::SizeBracket => "scr_porte",
        }
    }
}

impl std::fmt::Display for SegmentScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.segment_column())
    }
}

impl FromStr for SegmentScheme {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "modalidade" | "modality" => Ok(Self::Modality),
            "ocupacao" | "ocupação" | "occupation" => Ok(Self::Occupation),
            "porte" | "size" | "size_bracket" => Ok(Self::SizeBracket),
            other => Err(ParseError::Scheme(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_round_trips_through_display() {
        for scheme in SegmentScheme::ALL {
            assert_eq!(scheme.to_string().parse::<SegmentScheme>().unwrap(), scheme);
        }
    }

    #[test]
    fn scheme_file_stems_are_distinct() {
        let stems: std::collections::HashSet<_> =
            SegmentScheme::ALL.iter().map(SegmentScheme::file_stem).collect();
        assert_eq!(stems.len(), SegmentScheme::ALL.len());
    }
}
