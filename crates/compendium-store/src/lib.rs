//! Compendium Store
//!
//! Reference implementations of the collaborator traits from
//! `compendium_domain::traits`:
//!
//! - [`Inventory`]: owned equipment and skills; answers level queries and
//!   produces the change notices to broadcast after every mutation
//! - [`MemoryProgressStore`]: in-memory progress, for tests and short sessions
//! - [`JsonProgressStore`]: progress persisted to a JSON file

#![warn(missing_docs)]

mod error;
mod inventory;
mod progress;

pub use error::StoreError;
pub use inventory::Inventory;
pub use progress::{JsonProgressStore, MemoryProgressStore};
