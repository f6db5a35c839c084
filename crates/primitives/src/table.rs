//! Table identity.

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Identity of a loaded wide table.
///
/// Tables are immutable once loaded, so the identity stands in for the
/// table's content in cache keys.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into, Serialize, Deserialize,
)]
pub struct TableId(pub u64);

impl TableId {
    /// Create a new table identity.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}
