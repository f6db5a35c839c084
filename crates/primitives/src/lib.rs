#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/scr-painel/scr-painel/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod state;
pub use state::{NATIONWIDE, OTHER_STATES, Uf};

mod scheme;
pub use scheme::SegmentScheme;

mod granularity;
pub use granularity::Granularity;

mod columns;
pub use columns::{ACTIVE_PORTFOLIO, ColumnMap, DELINQUENCY_RATE, DELINQUENT_PORTFOLIO};

mod table;
pub use table::TableId;

mod scale;
pub use scale::ScaleUnit;

mod error;
pub use error::ParseError;

/// Re-export common date type.
pub type Date = chrono::NaiveDate;
