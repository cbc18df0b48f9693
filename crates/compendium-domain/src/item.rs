//! Owned items and the change notices broadcast about them

use crate::{Category, CollectionKind, ItemKind, Rarity};
use serde::{Deserialize, Serialize};

/// Identifier of an owned item
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

/// An item (equipment piece or skill) the player owns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedItem {
    /// Item identity
    pub id: ItemId,

    /// Weapon, armor or skill sub-kind
    pub kind: ItemKind,

    /// Rarity of the item
    pub rarity: Rarity,

    /// Enhancement level (equipment) or skill level
    pub level: u32,
}

/// A change broadcast on one channel
///
/// Carries every owned item of `rarity` on `channel` as of the change, so a
/// listener can evaluate against the notice alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeNotice {
    /// Channel the notice was published on
    pub channel: Category,

    /// Rarity whose items changed
    pub rarity: Rarity,

    /// Current items of that rarity on that channel
    pub items: Vec<OwnedItem>,
}

impl ChangeNotice {
    /// Create a notice for the equipment channel
    pub fn equipment(rarity: Rarity, items: Vec<OwnedItem>) -> Self {
        Self {
            channel: Category::Equipment,
            rarity,
            items,
        }
    }

    /// Create a notice for the skill channel
    pub fn skill(rarity: Rarity, items: Vec<OwnedItem>) -> Self {
        Self {
            channel: Category::Skill,
            rarity,
            items,
        }
    }

    /// Levels of the carried items that count toward `kind`
    pub fn levels_matching(&self, kind: CollectionKind) -> Vec<u32> {
        self.items
            .iter()
            .filter(|item| item.rarity == self.rarity && kind.matches(item.kind))
            .map(|item| item.level)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, kind: ItemKind, level: u32) -> OwnedItem {
        OwnedItem {
            id: ItemId(id),
            kind,
            rarity: Rarity::Rare,
            level,
        }
    }

    #[test]
    fn test_levels_matching_filters_by_kind() {
        let notice = ChangeNotice::skill(
            Rarity::Rare,
            vec![
                item(1, ItemKind::ActiveSkill, 3),
                item(2, ItemKind::BuffSkill, 4),
                item(3, ItemKind::PassiveSkill, 9),
            ],
        );

        assert_eq!(notice.levels_matching(CollectionKind::Active), vec![3, 4]);
        assert_eq!(notice.levels_matching(CollectionKind::Passive), vec![9]);
        assert!(notice.levels_matching(CollectionKind::Weapon).is_empty());
    }

    #[test]
    fn test_levels_matching_skips_other_rarities() {
        let mut epic = item(4, ItemKind::Weapon, 10);
        epic.rarity = Rarity::Epic;
        let notice =
            ChangeNotice::equipment(Rarity::Rare, vec![item(1, ItemKind::Weapon, 2), epic]);

        assert_eq!(notice.levels_matching(CollectionKind::Weapon), vec![2]);
    }
}
