//! Trait definitions for external interactions
//!
//! These traits define the boundaries between progression logic and the game.
//! Reference implementations live in `compendium-store`.

use crate::{CollectionId, CollectionKind, Rarity};

/// Trait for querying owned item levels
///
/// Implemented by whatever owns the player's equipment and skills.
pub trait ConditionSource {
    /// Levels of every owned item of `rarity` that counts toward `kind`
    ///
    /// Returns an empty vector when nothing matches; never fails.
    fn levels_for(&self, rarity: Rarity, kind: CollectionKind) -> Vec<u32>;
}

/// Trait for persisting collection progress
///
/// Implemented by the infrastructure layer (compendium-store)
pub trait ProgressStore {
    /// Error type for store operations
    type Error;

    /// Record the tier a collection has reached
    fn save(&mut self, collection: CollectionId, level: u32) -> Result<(), Self::Error>;

    /// Load the tier a collection reached previously, if any
    fn load(&self, collection: CollectionId) -> Result<Option<u32>, Self::Error>;
}
