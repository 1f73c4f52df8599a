//! Preference Value Object
//!
//! News and movie preferences are opaque to the service: any non-empty
//! string is stored and returned as-is.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-empty opaque preference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preference(String);

impl Preference {
    /// Returns `None` for an empty value
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() { None } else { Some(Self(value)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preference() {
        assert_eq!(Preference::new("scifi").unwrap().as_str(), "scifi");
        assert!(Preference::new("").is_none());
    }
}
