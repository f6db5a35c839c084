//! Federative unit (state) codes.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Code of the nationwide aggregate row in SCR tables.
pub const NATIONWIDE: &str = "BR";

/// Label of the synthetic bucket that folds every state outside the top set.
pub const OTHER_STATES: &str = "demais UFs";

/// Federative unit code, e.g. `SP`, `RJ` or the nationwide `BR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
pub struct Uf(pub String);

impl Uf {
    /// Create a new state code.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the state code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether this is the nationwide aggregate code.
    #[must_use]
    pub fn is_nationwide(&self) -> bool {
        self.0 == NATIONWIDE
    }

    /// Returns whether this is the folded "other states" bucket.
    #[must_use]
    pub fn is_other(&self) -> bool {
        self.0 == OTHER_STATES
    }
}

impl From<&str> for Uf {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Uf {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uf_from_str() {
        let uf: Uf = "SP".into();
        assert_eq!(uf.as_str(), "SP");
        assert_eq!(uf.to_string(), "SP");
    }

    #[test]
    fn uf_special_codes() {
        assert!(Uf::new(NATIONWIDE).is_nationwide());
        assert!(Uf::new(OTHER_STATES).is_other());
        assert!(!Uf::new("MG").is_nationwide());
        assert!(!Uf::new("MG").is_other());
    }
}
