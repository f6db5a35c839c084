//! In-memory table source.

use std::collections::HashMap;

use polars::prelude::DataFrame;
use scr_primitives::SegmentScheme;
use scr_traits::{SourceError, WideTableSource};

/// Source over preloaded tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryTableSource {
    tables: HashMap<SegmentScheme, DataFrame>,
}

impl MemoryTableSource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the table of a scheme.
    #[must_use]
    pub fn with_table(mut self, scheme: SegmentScheme, df: DataFrame) -> Self {
        self.tables.insert(scheme, df);
        self
    }

    /// Set the table of a scheme, returning the previous one.
    pub fn insert(&mut self, scheme: SegmentScheme, df: DataFrame) -> Option<DataFrame> {
        self.tables.insert(scheme, df)
    }
}

impl WideTableSource for MemoryTableSource {
    fn load(&self, scheme: SegmentScheme) -> Result<DataFrame, SourceError> {
        self.tables.get(&scheme).cloned().ok_or(SourceError::NotFound(scheme))
    }

    fn describe(&self) -> String {
        format!("{} in-memory tables", self.tables.len())
    }
}
