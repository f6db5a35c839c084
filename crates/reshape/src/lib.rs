#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/scr-painel/scr-painel/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod config;
pub use config::ReshapeConfig;

mod labels;
pub use labels::{SegmentLabels, wrap_label};

mod rank;
pub use rank::{TopStates, rank_states};

mod fold;
pub use fold::fold_other_states;

mod ratio;
pub use ratio::{delinquency_rate, with_delinquency_rate};

mod long;
pub use long::LongTable;

mod reshaper;
pub use reshaper::{SegmentReshaper, reshape};

mod cache;
pub use cache::{CacheStats, ReshapeCache};

mod error;
pub use error::ReshapeError;

/// Re-export commonly used types.
pub mod prelude {
    pub use scr_period::ResampleConfig;
    pub use scr_primitives::{ColumnMap, Granularity, ScaleUnit, TableId, Uf};

    pub use super::{LongTable, ReshapeCache, ReshapeConfig, ReshapeError, SegmentReshaper};
}
