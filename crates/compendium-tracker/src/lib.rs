//! Compendium Tracker
//!
//! Progression engine for tiered collections.
//!
//! # Overview
//!
//! A [`ProgressionTracker`] follows one collection through its tiers. It
//! decides whether the next tier is earned, listens on the broadcast channel
//! that carries changes relevant to that tier, and reports:
//! - **Eligibility changes**: only when the "can upgrade" flag flips
//! - **Advances**: once per applied advance, with the caller's source id
//!
//! A [`CollectionRegistry`] owns the trackers of one session together with the
//! level source and the progress store, and routes change notices to the
//! trackers subscribed to their channel.
//!
//! ## Eligibility
//!
//! | Situation | Eligible |
//! |-----------|----------|
//! | At the last tier | never |
//! | Every matching item at or above the next tier's required level | yes |
//! | No matching item owned at all | yes |
//! | Any matching item below the required level | no |
//!
//! ## Subscription
//!
//! | Tracker state | Channel |
//! |---------------|---------|
//! | Not eligible, not at the last tier | category of the next tier |
//! | Eligible | none (until the advance is applied) |
//! | At the last tier | none |
//!
//! # Configuration
//!
//! Trackers can be configured via TOML:
//!
//! ```toml
//! terminal_advance = "reject"   # or "ignore"
//! restore_progress = true
//! persist_on_advance = true
//! ```
//!
//! # Usage
//!
//! ```
//! use compendium_domain::{ItemKind, RawTierRecord, Rarity};
//! use compendium_store::{Inventory, MemoryProgressStore};
//! use compendium_tracker::{CollectionRegistry, TrackerConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut inventory = Inventory::new();
//! inventory.add_item(ItemKind::ActiveSkill, Rarity::Epic, 4);
//! inventory.add_item(ItemKind::BuffSkill, Rarity::Epic, 4);
//!
//! let records = (0..2).map(|level| RawTierRecord {
//!     id: 3,
//!     level,
//!     group_key: "Skill".to_string(),
//!     type_key: "Active".to_string(),
//!     rarity_raw: 3,
//!     required_level: 4,
//!     stat_type_key: "CRIT_CH".to_string(),
//!     stat_raw_value: 150,
//! });
//!
//! let mut registry =
//!     CollectionRegistry::new(inventory, MemoryProgressStore::new(), TrackerConfig::default());
//! registry.load_records(records)?;
//! registry.initialize_all()?;
//!
//! for id in registry.upgradeable() {
//!     registry.apply_advance(id, 0)?;
//! }
//! println!("{}", registry.metrics().summary());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod events;
mod metrics;
mod registry;
mod subscription;
mod tracker;

pub use config::{ConfigError, TerminalAdvancePolicy, TrackerConfig};
pub use error::TrackerError;
pub use metrics::TrackerMetrics;
pub use registry::CollectionRegistry;
pub use subscription::Subscription;
pub use tracker::{IgnoreReason, NoticeOutcome, ProgressionTracker, TrackerSnapshot};
