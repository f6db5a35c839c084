//! Segment relabeling and label formatting.

use std::collections::BTreeMap;

use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Mapping from source segment names to display labels.
///
/// Several names may map to the same label; their values are summed when
/// the mapping is applied by the reshaper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentLabels(BTreeMap<String, String>);

impl SegmentLabels {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acronyms of the individual-borrower ("PF") credit modalities.
    #[must_use]
    pub fn acronyms() -> Self {
        [
            ("PF - Cartão de crédito", "CC"),
            ("PF - Empréstimo com consignação em folha", "ECCF"),
            ("PF - Empréstimo sem consignação em folha", "ESCF"),
            ("PF - Habitacional", "H"),
            ("PF - Outros créditos", "OC"),
            ("PF - Rural e agroindustrial", "RA"),
            ("PF - Veículos", "V"),
        ]
        .into_iter()
        .fold(Self::new(), |labels, (from, to)| labels.with(from, to))
    }

    /// Add a mapping.
    #[must_use]
    pub fn with(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.0.insert(from.into(), to.into());
        self
    }

    /// Label for a segment name, if mapped.
    #[must_use]
    pub fn get(&self, segment: &str) -> Option<&str> {
        self.0.get(segment).map(String::as_str)
    }

    /// Number of mapped names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether no name is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Expression replacing mapped names in `segment_col`; unmapped names
    /// pass through.
    #[must_use]
    pub fn relabel_expr(&self, segment_col: &str) -> Expr {
        self.0
            .iter()
            .fold(col(segment_col), |acc, (from, to)| {
                when(col(segment_col).eq(lit(from.as_str())))
                    .then(lit(to.as_str()))
                    .otherwise(acc)
            })
            .alias(segment_col)
    }
}

/// Break a long label after its third word.
///
/// Labels of three words or fewer are returned unchanged.
#[must_use]
pub fn wrap_label(label: &str) -> String {
    let words: Vec<&str> = label.split_whitespace().collect();
    if words.len() > 3 {
        format!("{}\n{}", words[..3].join(" "), words[3..].join(" "))
    } else {
        label.to_string()
    }
}
