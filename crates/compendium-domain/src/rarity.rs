//! Rarity module - ordered item classification

use serde::{Deserialize, Serialize};

/// Rarity of an item or skill
///
/// Ordered from most to least common. Tier tables author rarity as a small
/// integer code; [`Rarity::from_code`] is the only way a code becomes a rarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    /// Code 0
    Common,

    /// Code 1
    Uncommon,

    /// Code 2
    Rare,

    /// Code 3
    Epic,

    /// Code 4
    Legendary,

    /// Code 5
    Mythic,
}

impl Rarity {
    /// All rarities in ascending order
    pub const ALL: [Rarity; 6] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Mythic,
    ];

    /// Resolve a table code into a rarity
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Rarity::Common),
            1 => Some(Rarity::Uncommon),
            2 => Some(Rarity::Rare),
            3 => Some(Rarity::Epic),
            4 => Some(Rarity::Legendary),
            5 => Some(Rarity::Mythic),
            _ => None,
        }
    }

    /// The table code for this rarity
    pub fn code(&self) -> i32 {
        match self {
            Rarity::Common => 0,
            Rarity::Uncommon => 1,
            Rarity::Rare => 2,
            Rarity::Epic => 3,
            Rarity::Legendary => 4,
            Rarity::Mythic => 5,
        }
    }

    /// Get the rarity name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
            Rarity::Mythic => "mythic",
        }
    }
}
