//! Categories and kinds
//!
//! A tier is authored with a category (`group_key`) and a kind (`type_key`).
//! The category picks the broadcast channel a tracker listens on; the kind
//! picks which owned items count toward the requirement.

use serde::{Deserialize, Serialize};

/// Collection category, one per broadcast channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Weapons and armor
    Equipment,

    /// Active, buff and passive skills
    Skill,
}

impl Category {
    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Equipment => "Equipment",
            Category::Skill => "Skill",
        }
    }

    /// Parse a table group key
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "Equipment" => Some(Category::Equipment),
            "Skill" => Some(Category::Skill),
            _ => None,
        }
    }
}

/// What a tier counts toward its requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectionKind {
    /// Weapons of the tier's rarity
    Weapon,

    /// Armor of the tier's rarity
    Armor,

    /// Active-like skills (active and buff) of the tier's rarity
    Active,

    /// Passive skills of the tier's rarity
    Passive,
}

impl CollectionKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::Weapon => "Weapon",
            CollectionKind::Armor => "Armor",
            CollectionKind::Active => "Active",
            CollectionKind::Passive => "Passive",
        }
    }

    /// Parse a table type key
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "Weapon" => Some(CollectionKind::Weapon),
            "Armor" => Some(CollectionKind::Armor),
            "Active" => Some(CollectionKind::Active),
            "Passive" => Some(CollectionKind::Passive),
            _ => None,
        }
    }

    /// The category whose channel carries changes for this kind
    pub fn category(&self) -> Category {
        match self {
            CollectionKind::Weapon | CollectionKind::Armor => Category::Equipment,
            CollectionKind::Active | CollectionKind::Passive => Category::Skill,
        }
    }

    /// Whether an owned item of `item` kind counts toward this collection kind
    pub fn matches(&self, item: ItemKind) -> bool {
        match self {
            CollectionKind::Weapon => item == ItemKind::Weapon,
            CollectionKind::Armor => item == ItemKind::Armor,
            CollectionKind::Active => item.is_active_like(),
            CollectionKind::Passive => item == ItemKind::PassiveSkill,
        }
    }
}

/// Kind of an owned item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Equipment: weapon
    Weapon,

    /// Equipment: armor
    Armor,

    /// Skill: triggered ability
    ActiveSkill,

    /// Skill: timed buff, grouped with active skills
    BuffSkill,

    /// Skill: always-on effect
    PassiveSkill,
}

impl ItemKind {
    /// Active and buff skills share one collection filter
    pub fn is_active_like(&self) -> bool {
        matches!(self, ItemKind::ActiveSkill | ItemKind::BuffSkill)
    }

    /// The category (and broadcast channel) this item belongs to
    pub fn category(&self) -> Category {
        match self {
            ItemKind::Weapon | ItemKind::Armor => Category::Equipment,
            ItemKind::ActiveSkill | ItemKind::BuffSkill | ItemKind::PassiveSkill => {
                Category::Skill
            }
        }
    }
}
