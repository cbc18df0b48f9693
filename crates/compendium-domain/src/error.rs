//! Load-time data errors

use crate::{Category, CollectionKind};
use thiserror::Error;

/// Errors raised while resolving a raw tier record
///
/// All of these are fatal at load: a collection containing a record that
/// fails to resolve must not be used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// Rarity code outside the rarity table
    #[error("Unknown rarity code: {0}")]
    UnknownRarity(i32),

    /// Group key outside the category table
    #[error("Unknown category key: {0:?}")]
    UnknownCategory(String),

    /// Type key outside the kind table
    #[error("Unknown collection kind key: {0:?}")]
    UnknownKind(String),

    /// Stat key outside the stat table
    #[error("Unknown stat key: {0:?}")]
    UnknownStat(String),

    /// Required level below zero
    #[error("Required level must be non-negative, got {0}")]
    NegativeRequirement(i32),

    /// Kind does not belong to the declared category
    #[error("Kind {kind:?} does not belong to category {category:?}")]
    CategoryMismatch {
        /// Declared category
        category: Category,
        /// Declared kind
        kind: CollectionKind,
    },
}
