//! Collection identity

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a collection
///
/// Raw tier records carry the id of the collection they belong to, so every
/// tier of one collection shares the same `CollectionId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionId(u32);

impl CollectionId {
    /// Wrap a raw collection id
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for CollectionId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Collection_{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(CollectionId::new(7).to_string(), "Collection_7");
    }

    #[test]
    fn test_serde_transparent() {
        let id: CollectionId = serde_json::from_str("12").unwrap();
        assert_eq!(id, CollectionId::new(12));
        assert_eq!(serde_json::to_string(&id).unwrap(), "12");
    }
}
