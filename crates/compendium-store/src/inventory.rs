//! Owned items, queryable as a condition source

use compendium_domain::traits::ConditionSource;
use compendium_domain::{
    Category, ChangeNotice, CollectionKind, ItemId, ItemKind, OwnedItem, Rarity,
};
use std::collections::BTreeMap;

/// The player's equipment and skills
///
/// Every mutation returns the [`ChangeNotice`] describing the affected
/// channel and rarity; publishing it is up to the caller.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    items: BTreeMap<ItemId, OwnedItem>,
    next_id: u64,
}

impl Inventory {
    /// Create an empty inventory
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item and return its id
    pub fn add_item(&mut self, kind: ItemKind, rarity: Rarity, level: u32) -> ItemId {
        self.next_id += 1;
        let id = ItemId(self.next_id);
        self.items.insert(
            id,
            OwnedItem {
                id,
                kind,
                rarity,
                level,
            },
        );
        id
    }

    /// Set an item's level
    ///
    /// Returns `None` when the item does not exist.
    pub fn set_level(&mut self, id: ItemId, level: u32) -> Option<ChangeNotice> {
        let item = self.items.get_mut(&id)?;
        item.level = level;
        let (channel, rarity) = (item.kind.category(), item.rarity);
        Some(self.notice(channel, rarity))
    }

    /// Raise an item's level by one
    pub fn level_up(&mut self, id: ItemId) -> Option<ChangeNotice> {
        let level = self.items.get(&id)?.level.saturating_add(1);
        self.set_level(id, level)
    }

    /// Remove an item
    pub fn remove_item(&mut self, id: ItemId) -> Option<ChangeNotice> {
        let item = self.items.remove(&id)?;
        Some(self.notice(item.kind.category(), item.rarity))
    }

    /// Look up an item
    pub fn get(&self, id: ItemId) -> Option<&OwnedItem> {
        self.items.get(&id)
    }

    /// All items in id order
    pub fn items(&self) -> impl Iterator<Item = &OwnedItem> {
        self.items.values()
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the inventory is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Notice carrying every item of `rarity` on `channel`
    pub fn notice(&self, channel: Category, rarity: Rarity) -> ChangeNotice {
        let items = self
            .items
            .values()
            .filter(|item| item.kind.category() == channel && item.rarity == rarity)
            .copied()
            .collect();

        ChangeNotice {
            channel,
            rarity,
            items,
        }
    }
}

impl ConditionSource for Inventory {
    fn levels_for(&self, rarity: Rarity, kind: CollectionKind) -> Vec<u32> {
        self.items
            .values()
            .filter(|item| item.rarity == rarity && kind.matches(item.kind))
            .map(|item| item.level)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stocked() -> Inventory {
        let mut inventory = Inventory::new();
        inventory.add_item(ItemKind::Weapon, Rarity::Rare, 3);
        inventory.add_item(ItemKind::Weapon, Rarity::Rare, 7);
        inventory.add_item(ItemKind::Armor, Rarity::Rare, 1);
        inventory.add_item(ItemKind::Weapon, Rarity::Epic, 9);
        inventory.add_item(ItemKind::ActiveSkill, Rarity::Rare, 2);
        inventory.add_item(ItemKind::BuffSkill, Rarity::Rare, 4);
        inventory.add_item(ItemKind::PassiveSkill, Rarity::Rare, 6);
        inventory
    }

    #[test]
    fn test_levels_for_filters_rarity_and_kind() {
        let inventory = stocked();

        assert_eq!(inventory.levels_for(Rarity::Rare, CollectionKind::Weapon), vec![3, 7]);
        assert_eq!(inventory.levels_for(Rarity::Rare, CollectionKind::Armor), vec![1]);
        assert_eq!(inventory.levels_for(Rarity::Epic, CollectionKind::Weapon), vec![9]);
        assert_eq!(inventory.levels_for(Rarity::Rare, CollectionKind::Active), vec![2, 4]);
        assert_eq!(inventory.levels_for(Rarity::Rare, CollectionKind::Passive), vec![6]);
        assert!(inventory
            .levels_for(Rarity::Mythic, CollectionKind::Weapon)
            .is_empty());
    }

    #[test]
    fn test_set_level_returns_channel_notice() {
        let mut inventory = stocked();
        let first = ItemId(1);

        let notice = inventory.set_level(first, 5).unwrap();

        assert_eq!(notice.channel, Category::Equipment);
        assert_eq!(notice.rarity, Rarity::Rare);
        // weapons and armor of that rarity, nothing else
        assert_eq!(notice.items.len(), 3);
        assert_eq!(inventory.get(first).unwrap().level, 5);
    }

    #[test]
    fn test_level_up() {
        let mut inventory = stocked();
        let buff = ItemId(6);

        let notice = inventory.level_up(buff).unwrap();

        assert_eq!(notice.channel, Category::Skill);
        assert_eq!(notice.levels_matching(CollectionKind::Active), vec![2, 5]);
    }

    #[test]
    fn test_missing_item() {
        let mut inventory = Inventory::new();
        assert!(inventory.set_level(ItemId(42), 1).is_none());
        assert!(inventory.level_up(ItemId(42)).is_none());
        assert!(inventory.remove_item(ItemId(42)).is_none());
    }

    #[test]
    fn test_remove_item() {
        let mut inventory = stocked();

        let notice = inventory.remove_item(ItemId(7)).unwrap();

        assert_eq!(notice.channel, Category::Skill);
        assert!(notice.levels_matching(CollectionKind::Passive).is_empty());
        assert_eq!(inventory.len(), 6);
    }
}
