//! Tier module - one rung of a collection ladder

use crate::{
    Category, CollectionId, CollectionKind, DataError, Rarity, RewardStat, StatKind,
};
use serde::{Deserialize, Serialize};

/// A tier exactly as authored in the data tables
///
/// Codes are left unresolved; [`TierDefinition::from_raw`] validates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTierRecord {
    /// Collection this tier belongs to
    pub id: u32,

    /// Position within the collection (0-based)
    pub level: u32,

    /// Category key (`Equipment`, `Skill`)
    pub group_key: String,

    /// Kind key (`Weapon`, `Armor`, `Active`, `Passive`)
    pub type_key: String,

    /// Rarity code
    pub rarity_raw: i32,

    /// Minimum level every matching item must reach
    pub required_level: i32,

    /// Stat key (`ATK`, `CRIT_CH`, ...)
    pub stat_type_key: String,

    /// Stat value before scaling
    pub stat_raw_value: i64,
}

/// A validated, immutable tier
#[derive(Debug, Clone, PartialEq)]
pub struct TierDefinition {
    collection_id: CollectionId,
    level: u32,
    category: Category,
    kind: CollectionKind,
    rarity: Rarity,
    required_level: u32,
    reward: RewardStat,
}

impl TierDefinition {
    /// Resolve a raw record into a tier
    ///
    /// The record is only read, so resolving it again yields an identical
    /// tier and never scales the reward twice.
    ///
    /// # Errors
    ///
    /// Returns [`DataError`] when any code is outside its table, when the
    /// required level is negative, or when the kind does not belong to the
    /// declared category.
    ///
    /// # Examples
    ///
    /// ```
    /// use compendium_domain::{RawTierRecord, Rarity, StatMagnitude, TierDefinition};
    ///
    /// let raw = RawTierRecord {
    ///     id: 1,
    ///     level: 0,
    ///     group_key: "Equipment".to_string(),
    ///     type_key: "Weapon".to_string(),
    ///     rarity_raw: 2,
    ///     required_level: 5,
    ///     stat_type_key: "ATK_SPD".to_string(),
    ///     stat_raw_value: 550,
    /// };
    ///
    /// let tier = TierDefinition::from_raw(&raw).unwrap();
    /// assert_eq!(tier.rarity(), Rarity::Rare);
    /// assert_eq!(tier.reward().magnitude, StatMagnitude::Rate(5.5));
    /// ```
    pub fn from_raw(raw: &RawTierRecord) -> Result<Self, DataError> {
        let rarity =
            Rarity::from_code(raw.rarity_raw).ok_or(DataError::UnknownRarity(raw.rarity_raw))?;
        let category = Category::parse(&raw.group_key)
            .ok_or_else(|| DataError::UnknownCategory(raw.group_key.clone()))?;
        let kind = CollectionKind::parse(&raw.type_key)
            .ok_or_else(|| DataError::UnknownKind(raw.type_key.clone()))?;
        let stat = StatKind::parse(&raw.stat_type_key)
            .ok_or_else(|| DataError::UnknownStat(raw.stat_type_key.clone()))?;

        if kind.category() != category {
            return Err(DataError::CategoryMismatch { category, kind });
        }

        let required_level = u32::try_from(raw.required_level)
            .map_err(|_| DataError::NegativeRequirement(raw.required_level))?;

        Ok(Self {
            collection_id: CollectionId::new(raw.id),
            level: raw.level,
            category,
            kind,
            rarity,
            required_level,
            reward: RewardStat::from_raw(stat, raw.stat_raw_value),
        })
    }

    /// Collection this tier belongs to
    pub fn collection_id(&self) -> CollectionId {
        self.collection_id
    }

    /// Position within the collection
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Channel that governs this tier
    pub fn category(&self) -> Category {
        self.category
    }

    /// Item filter for this tier
    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    /// Rarity items must match
    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    /// Minimum level every matching item must reach
    pub fn required_level(&self) -> u32 {
        self.required_level
    }

    /// Reward granted by this tier
    pub fn reward(&self) -> RewardStat {
        self.reward
    }

    /// Whether every level meets the requirement
    ///
    /// An empty slice is satisfied: owning no matching item does not block
    /// the tier.
    pub fn is_satisfied_by(&self, levels: &[u32]) -> bool {
        levels.iter().all(|&level| level >= self.required_level)
    }
}
