//! Session table store.

use std::{collections::HashMap, sync::Arc};

use polars::prelude::*;
use scr_primitives::{ColumnMap, SegmentScheme, TableId};
use scr_traits::WideTableSource;

use crate::StorageError;

/// A loaded wide table with its identity and key columns.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    id: TableId,
    scheme: SegmentScheme,
    columns: ColumnMap,
    frame: Arc<DataFrame>,
}

impl LoadedTable {
    /// Identity of the table for this session.
    #[must_use]
    pub const fn id(&self) -> TableId {
        self.id
    }

    /// Segmentation scheme of the table.
    #[must_use]
    pub const fn scheme(&self) -> SegmentScheme {
        self.scheme
    }

    /// Key columns of the table.
    #[must_use]
    pub const fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    /// Table contents.
    #[must_use]
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Shared handle to the table contents.
    #[must_use]
    pub fn shared(&self) -> Arc<DataFrame> {
        Arc::clone(&self.frame)
    }
}

/// Loads each scheme's table at most once and hands out shared handles.
///
/// Tables are immutable once loaded. Evicting a scheme and loading it again
/// yields a fresh [`TableId`], so caches keyed by identity never serve
/// results computed from the old contents.
#[derive(Debug)]
pub struct TableStore<S> {
    source: S,
    columns: ColumnMap,
    tables: HashMap<SegmentScheme, LoadedTable>,
    next_id: u64,
}

impl<S: WideTableSource> TableStore<S> {
    /// Create a store with the default period and state columns.
    pub fn new(source: S) -> Self {
        Self::with_columns(source, ColumnMap::default())
    }

    /// Create a store with custom period and state columns.
    ///
    /// The segment column always follows the scheme.
    pub fn with_columns(source: S, columns: ColumnMap) -> Self {
        Self { source, columns, tables: HashMap::new(), next_id: 0 }
    }

    /// Get the source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Return the table of a scheme, loading it on first use.
    ///
    /// # Errors
    /// Returns `StorageError` if the source fails or the table lacks a key
    /// column or a date period column.
    pub fn get(&mut self, scheme: SegmentScheme) -> Result<LoadedTable, StorageError> {
        if let Some(table) = self.tables.get(&scheme) {
            return Ok(table.clone());
        }

        let frame = self.source.load(scheme)?;
        let columns = ColumnMap { segment: scheme.segment_column().to_string(), ..self.columns.clone() };
        validate(&frame, scheme, &columns)?;

        let id = TableId::new(self.next_id);
        self.next_id += 1;
        tracing::info!(
            %scheme,
            %id,
            rows = frame.height(),
            source = %self.source.describe(),
            "loaded wide table"
        );

        let table = LoadedTable { id, scheme, columns, frame: Arc::new(frame) };
        self.tables.insert(scheme, table.clone());
        Ok(table)
    }

    /// Load every scheme the source has, skipping absent ones.
    ///
    /// # Errors
    /// Returns the first non-recoverable `StorageError`.
    pub fn load_available(&mut self) -> Result<Vec<LoadedTable>, StorageError> {
        let mut loaded = Vec::new();
        for scheme in SegmentScheme::ALL {
            match self.get(scheme) {
                Ok(table) => loaded.push(table),
                Err(err) if err.is_recoverable() => {
                    tracing::warn!(%scheme, %err, "skipping scheme");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(loaded)
    }

    /// Returns whether the scheme's table is loaded.
    pub fn is_loaded(&self, scheme: SegmentScheme) -> bool {
        self.tables.contains_key(&scheme)
    }

    /// Forget the scheme's table, returning its identity.
    pub fn evict(&mut self, scheme: SegmentScheme) -> Option<TableId> {
        self.tables.remove(&scheme).map(|table| table.id)
    }
}

fn validate(df: &DataFrame, scheme: SegmentScheme, columns: &ColumnMap) -> Result<(), StorageError> {
    for key in columns.keys() {
        let Ok(column) = df.column(key) else {
            return Err(StorageError::MissingColumn { scheme, column: key.to_string() });
        };
        if key == columns.period && column.dtype() != &DataType::Date {
            return Err(StorageError::InvalidPeriod {
                scheme,
                column: key.to_string(),
                dtype: column.dtype().to_string(),
            });
        }
    }
    Ok(())
}
