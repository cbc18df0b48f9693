//! Error types for tracker operations

use compendium_domain::{CollectionId, DataError};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while building or driving a tracker
#[derive(Error, Debug)]
pub enum TrackerError {
    /// A tier record failed to resolve
    #[error("Invalid tier data in {collection}: {source}")]
    Data {
        /// Collection being initialized
        collection: CollectionId,
        /// Underlying resolution error
        #[source]
        source: DataError,
    },

    /// No tier records were added before initialization
    #[error("{0} has no tiers")]
    EmptyCollection(CollectionId),

    /// Tier levels are duplicated or have a gap
    #[error("{collection}: expected tier level {expected}, found {found}")]
    NonContiguousLevels {
        /// Collection being initialized
        collection: CollectionId,
        /// Level expected at this position
        expected: u32,
        /// Level actually found
        found: u32,
    },

    /// A record for another collection was added
    #[error("{collection}: tier record belongs to {found}")]
    ForeignTier {
        /// Collection receiving the record
        collection: CollectionId,
        /// Collection named by the record
        found: CollectionId,
    },

    /// Tier list is frozen once initialized
    #[error("{0} is already initialized")]
    AlreadyInitialized(CollectionId),

    /// Operation requires a successful initialization first
    #[error("{0} is not initialized")]
    NotInitialized(CollectionId),

    /// Advance requested at the last tier
    #[error("{collection} is already at max level {level}")]
    TerminalState {
        /// Collection that was asked to advance
        collection: CollectionId,
        /// Its (maximum) level
        level: u32,
    },

    /// Restored progress points past the last tier
    #[error("{collection}: restored level {level} exceeds max level {max_level}")]
    RestoredLevelOutOfRange {
        /// Collection being restored
        collection: CollectionId,
        /// Level read from the store
        level: u32,
        /// Highest valid level
        max_level: u32,
    },

    /// Progress store failure
    #[error("Store error: {0}")]
    Store(String),

    /// No tracker registered under this id
    #[error("Unknown collection: {0}")]
    UnknownCollection(CollectionId),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
