//! Compendium Domain Layer
//!
//! This crate contains the data model for collection progression: the tiers a
//! collection is made of, the codes they are authored with, and the trait
//! interfaces the progression engine uses to reach the outside world.
//!
//! ## Key Concepts
//!
//! - **Collection**: A progression ladder made of ordered tiers
//! - **Tier**: One rung of the ladder, with a rarity/kind requirement and a reward
//! - **Rarity**: Ordered item classification (common → mythic)
//! - **Category**: Equipment or Skill; also names the broadcast channel a tier listens on
//! - **Kind**: Weapon/Armor for equipment, Active/Passive for skills
//!
//! ## Architecture
//!
//! - Pure data and validation only, no I/O
//! - Raw codes are resolved once, at load, through exhaustive lookup tables
//! - Trait definitions for the level provider and progress persistence

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod collection;
pub mod error;
pub mod item;
pub mod rarity;
pub mod stat;
pub mod tier;
pub mod traits;

// Re-exports for convenience
pub use category::{Category, CollectionKind, ItemKind};
pub use collection::CollectionId;
pub use error::DataError;
pub use item::{ChangeNotice, ItemId, OwnedItem};
pub use rarity::Rarity;
pub use stat::{RewardStat, StatKind, StatMagnitude};
pub use tier::{RawTierRecord, TierDefinition};
