#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/scr-painel/scr-painel/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod quarter;
pub use quarter::{date_from_days, days_from_date, quarter_start, trim_bounds};

mod resample;
pub use resample::{ResampleConfig, Resampler, period_bounds, resample};

mod error;
pub use error::PeriodError;
