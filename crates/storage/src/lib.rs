#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/scr-painel/scr-painel/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod csv_source;
pub use csv_source::{CsvTableSource, PERIOD_FORMAT};

mod memory;
pub use memory::MemoryTableSource;

mod store;
pub use store::{LoadedTable, TableStore};

mod error;
pub use error::StorageError;
