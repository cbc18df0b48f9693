//! Registry of trackers sharing one level source and one progress store

use crate::{
    NoticeOutcome, ProgressionTracker, TrackerConfig, TrackerError, TrackerMetrics,
    TrackerSnapshot,
};
use compendium_domain::traits::{ConditionSource, ProgressStore};
use compendium_domain::{Category, ChangeNotice, CollectionId, RawTierRecord};
use std::collections::BTreeMap;
use std::fmt::Display;
use tracing::{debug, info};

/// Owns every collection tracker of a player session
///
/// The registry is the broadcast hub: [`publish`](Self::publish) delivers a
/// notice to each tracker subscribed to the notice's channel. Trackers are
/// visited in collection id order.
///
/// # Examples
///
/// ```
/// use compendium_domain::{ItemKind, RawTierRecord, Rarity};
/// use compendium_store::{Inventory, MemoryProgressStore};
/// use compendium_tracker::{CollectionRegistry, TrackerConfig};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let records = (0..3).map(|level| RawTierRecord {
///     id: 7,
///     level,
///     group_key: "Equipment".to_string(),
///     type_key: "Armor".to_string(),
///     rarity_raw: 1,
///     required_level: (level * 5) as i32,
///     stat_type_key: "DEF".to_string(),
///     stat_raw_value: 20,
/// });
///
/// let mut inventory = Inventory::new();
/// let plate = inventory.add_item(ItemKind::Armor, Rarity::Uncommon, 2);
///
/// let mut registry =
///     CollectionRegistry::new(inventory, MemoryProgressStore::new(), TrackerConfig::default());
/// registry.load_records(records)?;
/// registry.initialize_all()?;
/// assert!(registry.upgradeable().is_empty());
///
/// let notice = registry.source_mut().set_level(plate, 5).expect("item exists");
/// let changed = registry.publish(&notice);
/// assert_eq!(changed.len(), 1);
/// assert_eq!(registry.upgradeable().len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct CollectionRegistry<C, P> {
    config: TrackerConfig,
    source: C,
    store: P,
    trackers: BTreeMap<CollectionId, ProgressionTracker>,
    metrics: TrackerMetrics,
}

impl<C, P> CollectionRegistry<C, P>
where
    C: ConditionSource,
    P: ProgressStore,
    P::Error: Display,
{
    /// Create an empty registry
    pub fn new(source: C, store: P, config: TrackerConfig) -> Self {
        Self {
            config,
            source,
            store,
            trackers: BTreeMap::new(),
            metrics: TrackerMetrics::new(),
        }
    }

    /// Add raw records, creating a tracker per collection id
    ///
    /// Returns the number of records added.
    pub fn load_records<I>(&mut self, records: I) -> Result<usize, TrackerError>
    where
        I: IntoIterator<Item = RawTierRecord>,
    {
        let mut added = 0;
        for record in records {
            let id = CollectionId::new(record.id);
            let config = &self.config;
            let tracker = self
                .trackers
                .entry(id)
                .or_insert_with(|| ProgressionTracker::new(id, config.clone()));
            tracker.add_tier(record)?;
            added += 1;
        }

        debug!(
            "Loaded {} tier records across {} collections",
            added,
            self.trackers.len()
        );
        Ok(added)
    }

    /// Initialize every tracker that is not initialized yet
    ///
    /// Stops at the first failure.
    pub fn initialize_all(&mut self) -> Result<(), TrackerError> {
        for tracker in self.trackers.values_mut() {
            let before = tracker.is_eligible();
            tracker.initialize(&self.source, &self.store)?;
            if tracker.is_eligible() != before {
                self.metrics.record_flip();
            }
        }

        info!(
            "Initialized {} collections ({} upgradeable)",
            self.trackers.len(),
            self.upgradeable().len()
        );
        Ok(())
    }

    /// Deliver a notice to every tracker subscribed to its channel
    ///
    /// Returns the collections whose eligibility changed.
    pub fn publish(&mut self, notice: &ChangeNotice) -> Vec<CollectionId> {
        let mut changed = Vec::new();

        for id in self.subscribers(notice.channel) {
            let Some(tracker) = self.trackers.get_mut(&id) else {
                continue;
            };

            match tracker.handle_notice(notice) {
                NoticeOutcome::Ignored(reason) => {
                    self.metrics.record_notice(true);
                    debug!("{} ignored notice: {:?}", id, reason);
                }
                NoticeOutcome::Evaluated { changed: flipped, .. } => {
                    self.metrics.record_notice(false);
                    if flipped {
                        self.metrics.record_flip();
                        changed.push(id);
                    }
                }
            }
        }

        changed
    }

    /// Re-evaluate one collection against the source
    pub fn recheck(&mut self, id: CollectionId) -> Result<bool, TrackerError> {
        let tracker = self
            .trackers
            .get_mut(&id)
            .ok_or(TrackerError::UnknownCollection(id))?;

        let before = tracker.is_eligible();
        let eligible = tracker.recheck_eligibility(&self.source)?;
        self.metrics.record_recheck();
        if before != eligible {
            self.metrics.record_flip();
        }
        Ok(eligible)
    }

    /// Re-evaluate every collection
    pub fn recheck_all(&mut self) -> Result<(), TrackerError> {
        let ids: Vec<CollectionId> = self.trackers.keys().copied().collect();
        for id in ids {
            self.recheck(id)?;
        }
        Ok(())
    }

    /// Advance one collection; see [`ProgressionTracker::apply_advance`]
    pub fn apply_advance(&mut self, id: CollectionId, source_id: u32) -> Result<u32, TrackerError> {
        let tracker = self
            .trackers
            .get_mut(&id)
            .ok_or(TrackerError::UnknownCollection(id))?;

        let (before, was_eligible) = (tracker.level(), tracker.is_eligible());
        let level = tracker.apply_advance(source_id, &self.source, &mut self.store)?;
        if level != before {
            self.metrics.record_advance(id);
        }
        if tracker.is_eligible() != was_eligible {
            self.metrics.record_flip();
        }
        Ok(level)
    }

    /// Remove a collection, tearing down its subscription
    pub fn remove(&mut self, id: CollectionId) -> Option<ProgressionTracker> {
        let mut tracker = self.trackers.remove(&id)?;
        tracker.teardown();
        Some(tracker)
    }

    /// Collections subscribed to `channel`
    pub fn subscribers(&self, channel: Category) -> Vec<CollectionId> {
        self.trackers
            .iter()
            .filter(|(_, tracker)| tracker.subscription() == Some(channel))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Collections whose next tier can be applied
    pub fn upgradeable(&self) -> Vec<CollectionId> {
        self.trackers
            .iter()
            .filter(|(_, tracker)| tracker.is_eligible())
            .map(|(id, _)| *id)
            .collect()
    }

    /// Snapshots of every initialized tracker
    pub fn snapshots(&self) -> Vec<TrackerSnapshot> {
        self.trackers
            .values()
            .filter_map(ProgressionTracker::snapshot)
            .collect()
    }

    /// Look up a tracker
    pub fn tracker(&self, id: CollectionId) -> Option<&ProgressionTracker> {
        self.trackers.get(&id)
    }

    /// Look up a tracker mutably (e.g. to register listeners)
    pub fn tracker_mut(&mut self, id: CollectionId) -> Option<&mut ProgressionTracker> {
        self.trackers.get_mut(&id)
    }

    /// Number of collections
    pub fn len(&self) -> usize {
        self.trackers.len()
    }

    /// Whether no collection is registered
    pub fn is_empty(&self) -> bool {
        self.trackers.is_empty()
    }

    /// The level source
    pub fn source(&self) -> &C {
        &self.source
    }

    /// The level source, mutably, so callers can change items then publish
    pub fn source_mut(&mut self) -> &mut C {
        &mut self.source
    }

    /// The progress store
    pub fn store(&self) -> &P {
        &self.store
    }

    /// Counters collected so far
    pub fn metrics(&self) -> &TrackerMetrics {
        &self.metrics
    }
}
