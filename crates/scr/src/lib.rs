#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/scr-painel/scr-painel/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "primitives")]
#[doc(inline)]
pub use scr_primitives as primitives;
#[cfg(feature = "traits")]
#[doc(inline)]
pub use scr_traits as traits;
#[cfg(feature = "period")]
#[doc(inline)]
pub use scr_period as period;
#[cfg(feature = "reshape")]
#[doc(inline)]
pub use scr_reshape as reshape;
#[cfg(feature = "storage")]
#[doc(inline)]
pub use scr_storage as storage;

// Used by the `painel` binary only.
#[cfg(feature = "cli")]
use polars as _;
#[cfg(feature = "cli")]
use tracing as _;
#[cfg(feature = "cli")]
use tracing_subscriber as _;
