//! CSV-backed table source.

use std::path::{Path, PathBuf};

use polars::prelude::*;
use scr_primitives::{ColumnMap, SegmentScheme};
use scr_traits::{SourceError, WideTableSource};

/// Format of persisted periods.
pub const PERIOD_FORMAT: &str = "%Y-%m-%d";

/// Reads the table of each scheme from `<dir>/<stem>.csv`.
///
/// Periods are stored as ISO dates ([`PERIOD_FORMAT`]) and parsed to `Date`
/// on load.
#[derive(Debug, Clone)]
pub struct CsvTableSource {
    dir: PathBuf,
    period_col: String,
}

impl CsvTableSource {
    /// Create a source reading from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), period_col: ColumnMap::default().period }
    }

    /// Set the name of the period column to parse.
    #[must_use]
    pub fn with_period_column(mut self, period_col: impl Into<String>) -> Self {
        self.period_col = period_col.into();
        self
    }

    /// Directory holding the files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file for a scheme.
    #[must_use]
    pub fn path_for(&self, scheme: SegmentScheme) -> PathBuf {
        self.dir.join(format!("{}.csv", scheme.file_stem()))
    }
}

impl WideTableSource for CsvTableSource {
    fn load(&self, scheme: SegmentScheme) -> Result<DataFrame, SourceError> {
        let path = self.path_for(scheme);
        if !path.is_file() {
            return Err(SourceError::NotFound(scheme));
        }

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path))?
            .finish()?;

        parse_period(df, &self.period_col)
    }

    fn describe(&self) -> String {
        format!("csv files in {}", self.dir.display())
    }
}

fn parse_period(df: DataFrame, period_col: &str) -> Result<DataFrame, SourceError> {
    let dtype = match df.column(period_col) {
        Ok(column) => column.dtype().clone(),
        Err(_) => return Err(SourceError::Malformed(format!("missing period column {period_col}"))),
    };

    match dtype {
        DataType::Date => Ok(df),
        DataType::String => {
            let options = StrptimeOptions {
                format: Some(PERIOD_FORMAT.into()),
                strict: true,
                ..Default::default()
            };
            Ok(df.lazy().with_column(col(period_col).str().to_date(options)).collect()?)
        }
        other => Err(SourceError::Malformed(format!("period column {period_col} has type {other}"))),
    }
}
