//! Progression tracker - the per-collection state machine

use crate::config::{TerminalAdvancePolicy, TrackerConfig};
use crate::events::Listeners;
use crate::subscription::Subscription;
use crate::TrackerError;
use compendium_domain::traits::{ConditionSource, ProgressStore};
use compendium_domain::{Category, ChangeNotice, CollectionId, RawTierRecord, TierDefinition};
use serde::Serialize;
use std::fmt::Display;
use tracing::{debug, info, warn};

/// Why a delivered notice did not trigger an evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The tracker does not listen on the notice's channel
    NotSubscribed,

    /// The notice is about a different rarity than the tier being evaluated
    RarityMismatch,
}

/// Result of delivering a notice to a tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeOutcome {
    /// The notice was dropped before evaluation
    Ignored(IgnoreReason),

    /// Eligibility was recomputed from the notice
    Evaluated {
        /// Eligibility after the evaluation
        eligible: bool,
        /// Whether it differs from before
        changed: bool,
    },
}

/// Point-in-time view of a tracker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackerSnapshot {
    /// Collection identity
    pub collection_id: CollectionId,
    /// Current tier index
    pub level: u32,
    /// Last tier index
    pub max_level: u32,
    /// Whether the next tier can be applied
    pub eligible: bool,
    /// Channel currently listened on
    pub subscription: Option<Category>,
}

/// Tracks one collection's progress through its tiers
///
/// A tracker is built in two steps: raw tier records are added, then
/// [`initialize`](Self::initialize) validates and resolves them, restores
/// progress, evaluates eligibility and subscribes to the channel of the tier
/// being evaluated. From then on it reacts to [`ChangeNotice`]s and to
/// explicit advances.
///
/// The tier under evaluation is always the *next* tier: both the
/// subscription and notice filtering key on it. The tracker is subscribed to
/// exactly one channel while it is neither eligible nor at its last tier, and
/// to none otherwise.
///
/// # Examples
///
/// ```
/// use compendium_domain::traits::ConditionSource;
/// use compendium_domain::{CollectionId, CollectionKind, RawTierRecord, Rarity};
/// use compendium_store::MemoryProgressStore;
/// use compendium_tracker::{ProgressionTracker, TrackerConfig};
///
/// struct Owned(Vec<u32>);
///
/// impl ConditionSource for Owned {
///     fn levels_for(&self, _rarity: Rarity, _kind: CollectionKind) -> Vec<u32> {
///         self.0.clone()
///     }
/// }
///
/// let mut tracker = ProgressionTracker::new(CollectionId::new(1), TrackerConfig::default());
/// for (level, required) in [(0, 0), (1, 5)] {
///     tracker
///         .add_tier(RawTierRecord {
///             id: 1,
///             level,
///             group_key: "Equipment".to_string(),
///             type_key: "Weapon".to_string(),
///             rarity_raw: 2,
///             required_level: required,
///             stat_type_key: "ATK".to_string(),
///             stat_raw_value: 10,
///         })
///         .unwrap();
/// }
///
/// let mut store = MemoryProgressStore::new();
/// tracker.initialize(&Owned(vec![5, 6]), &store).unwrap();
/// assert!(tracker.is_eligible());
///
/// tracker.apply_advance(42, &Owned(vec![5, 6]), &mut store).unwrap();
/// assert_eq!(tracker.level(), 1);
/// assert!(!tracker.is_eligible());
/// ```
#[derive(Debug)]
pub struct ProgressionTracker {
    collection_id: CollectionId,
    config: TrackerConfig,
    pending: Vec<RawTierRecord>,
    tiers: Vec<TierDefinition>,
    current: usize,
    restore_level: Option<u32>,
    eligible: bool,
    subscription: Subscription,
    eligibility_listeners: Listeners<bool>,
    advance_listeners: Listeners<u32>,
}

impl ProgressionTracker {
    /// Create an empty, uninitialized tracker
    pub fn new(collection_id: CollectionId, config: TrackerConfig) -> Self {
        Self {
            collection_id,
            config,
            pending: Vec::new(),
            tiers: Vec::new(),
            current: 0,
            restore_level: None,
            eligible: false,
            subscription: Subscription::default(),
            eligibility_listeners: Listeners::default(),
            advance_listeners: Listeners::default(),
        }
    }

    /// Create a tracker with default configuration
    pub fn default_config(collection_id: CollectionId) -> Self {
        Self::new(collection_id, TrackerConfig::default())
    }

    /// Add a raw tier record
    ///
    /// Records may arrive in any order; they are sorted on initialization.
    pub fn add_tier(&mut self, record: RawTierRecord) -> Result<(), TrackerError> {
        if self.is_initialized() {
            return Err(TrackerError::AlreadyInitialized(self.collection_id));
        }

        let owner = CollectionId::new(record.id);
        if owner != self.collection_id {
            return Err(TrackerError::ForeignTier {
                collection: self.collection_id,
                found: owner,
            });
        }

        self.pending.push(record);
        Ok(())
    }

    /// Start from `level` instead of 0 or the stored progress
    ///
    /// Only honored by the next [`initialize`](Self::initialize).
    pub fn restore_level(&mut self, level: u32) {
        self.restore_level = Some(level);
    }

    /// Register a handler for eligibility transitions
    pub fn on_eligibility_changed(&mut self, handler: impl FnMut(bool) + 'static) {
        self.eligibility_listeners.add(handler);
    }

    /// Register a handler for applied advances; receives the caller's source id
    pub fn on_advanced(&mut self, handler: impl FnMut(u32) + 'static) {
        self.advance_listeners.add(handler);
    }

    /// Validate tiers, restore progress, evaluate and subscribe
    ///
    /// Calling this again after it succeeded does nothing. When it fails the
    /// tracker stays uninitialized and keeps its records.
    ///
    /// # Errors
    ///
    /// - [`TrackerError::EmptyCollection`] when no tier was added
    /// - [`TrackerError::NonContiguousLevels`] when levels are not exactly `0..=N`
    /// - [`TrackerError::Data`] when a record fails to resolve
    /// - [`TrackerError::Store`] when stored progress cannot be read
    /// - [`TrackerError::RestoredLevelOutOfRange`] when restored progress is past the last tier
    pub fn initialize<C, P>(&mut self, source: &C, store: &P) -> Result<(), TrackerError>
    where
        C: ConditionSource + ?Sized,
        P: ProgressStore + ?Sized,
        P::Error: Display,
    {
        if self.is_initialized() {
            return Ok(());
        }
        if self.pending.is_empty() {
            return Err(TrackerError::EmptyCollection(self.collection_id));
        }

        let mut records = self.pending.clone();
        records.sort_by_key(|record| record.level);

        for (expected, record) in (0u32..).zip(records.iter()) {
            if record.level != expected {
                return Err(TrackerError::NonContiguousLevels {
                    collection: self.collection_id,
                    expected,
                    found: record.level,
                });
            }
        }

        let tiers = records
            .iter()
            .map(TierDefinition::from_raw)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| TrackerError::Data {
                collection: self.collection_id,
                source,
            })?;

        let max_level = (tiers.len() - 1) as u32;
        let level = self.starting_level(store)?;
        if level > max_level {
            return Err(TrackerError::RestoredLevelOutOfRange {
                collection: self.collection_id,
                level,
                max_level,
            });
        }

        self.tiers = tiers;
        self.pending.clear();
        self.current = level as usize;

        info!(
            "{} initialized at level {}/{}",
            self.collection_id, level, max_level
        );

        if let Some(channel) = self.next_category() {
            self.subscribe(channel);
        }
        self.recheck_eligibility(source)?;

        Ok(())
    }

    fn starting_level<P>(&self, store: &P) -> Result<u32, TrackerError>
    where
        P: ProgressStore + ?Sized,
        P::Error: Display,
    {
        if let Some(level) = self.restore_level {
            return Ok(level);
        }
        if !self.config.restore_progress {
            return Ok(0);
        }

        let saved = store
            .load(self.collection_id)
            .map_err(|e| TrackerError::Store(format!("Failed to load progress: {}", e)))?;
        Ok(saved.unwrap_or(0))
    }

    /// Whether [`initialize`](Self::initialize) has succeeded
    pub fn is_initialized(&self) -> bool {
        !self.tiers.is_empty()
    }

    /// Collection identity
    pub fn collection_id(&self) -> CollectionId {
        self.collection_id
    }

    /// Configuration in effect
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Current tier index
    pub fn level(&self) -> u32 {
        self.current as u32
    }

    /// Last tier index (`tiers.len() - 1`)
    pub fn max_level(&self) -> u32 {
        self.tiers.len().saturating_sub(1) as u32
    }

    /// Whether the tracker sits on its last tier
    pub fn is_max_level(&self) -> bool {
        self.is_initialized() && self.current + 1 >= self.tiers.len()
    }

    /// Whether the next tier can be applied
    pub fn is_eligible(&self) -> bool {
        self.eligible
    }

    /// Channel currently listened on
    pub fn subscription(&self) -> Option<Category> {
        self.subscription.channel()
    }

    /// Resolved tiers in level order; empty before initialization
    pub fn tiers(&self) -> &[TierDefinition] {
        &self.tiers
    }

    /// Tier at the current index
    pub fn current_tier(&self) -> Result<&TierDefinition, TrackerError> {
        self.tiers
            .get(self.current)
            .ok_or(TrackerError::NotInitialized(self.collection_id))
    }

    /// Tier after the current one, or the current tier at the last level
    pub fn next_tier(&self) -> Result<&TierDefinition, TrackerError> {
        self.tiers
            .get(self.current + 1)
            .or_else(|| self.tiers.get(self.current))
            .ok_or(TrackerError::NotInitialized(self.collection_id))
    }

    fn next_category(&self) -> Option<Category> {
        self.tiers
            .get(self.current + 1)
            .map(TierDefinition::category)
    }

    /// Pull current levels from `source` and re-evaluate eligibility
    ///
    /// Fires eligibility-changed only when the value flips.
    pub fn recheck_eligibility<C>(&mut self, source: &C) -> Result<bool, TrackerError>
    where
        C: ConditionSource + ?Sized,
    {
        if !self.is_initialized() {
            return Err(TrackerError::NotInitialized(self.collection_id));
        }

        let levels = match self.tiers.get(self.current + 1) {
            Some(next) => source.levels_for(next.rarity(), next.kind()),
            None => Vec::new(),
        };

        Ok(self.evaluate(&levels))
    }

    /// React to a broadcast notice
    ///
    /// The notice is evaluated against the levels it carries, so the result
    /// reflects the source as of the notice. A notice carries every item of
    /// its channel and rarity: when none of them match the kind, nothing of
    /// that kind is owned and the tier is satisfied vacuously.
    pub fn handle_notice(&mut self, notice: &ChangeNotice) -> NoticeOutcome {
        if !self.subscription.is_subscribed_to(notice.channel) {
            return NoticeOutcome::Ignored(IgnoreReason::NotSubscribed);
        }

        // Subscribed implies a next tier exists
        let (rarity, kind) = match self.tiers.get(self.current + 1) {
            Some(next) => (next.rarity(), next.kind()),
            None => return NoticeOutcome::Ignored(IgnoreReason::NotSubscribed),
        };

        if notice.rarity != rarity {
            debug!(
                "{} ignored {:?} notice for {} items",
                self.collection_id,
                notice.channel,
                notice.rarity.as_str()
            );
            return NoticeOutcome::Ignored(IgnoreReason::RarityMismatch);
        }

        let levels = notice.levels_matching(kind);
        let before = self.eligible;
        let eligible = self.evaluate(&levels);
        NoticeOutcome::Evaluated {
            eligible,
            changed: before != eligible,
        }
    }

    fn evaluate(&mut self, levels: &[u32]) -> bool {
        let eligible = match self.tiers.get(self.current + 1) {
            Some(next) => next.is_satisfied_by(levels),
            None => false,
        };

        self.set_eligible(eligible);
        self.sync_subscription();
        eligible
    }

    fn set_eligible(&mut self, eligible: bool) {
        if self.eligible == eligible {
            return;
        }
        self.eligible = eligible;

        if eligible {
            info!("{} is ready for upgrade!", self.collection_id);
        } else {
            debug!("{} is no longer upgradeable", self.collection_id);
        }
        self.eligibility_listeners.emit(eligible);
    }

    fn sync_subscription(&mut self) {
        let wanted = if self.eligible {
            None
        } else {
            self.next_category()
        };

        match wanted {
            Some(channel) => self.subscribe(channel),
            None => self.unsubscribe(),
        }
    }

    fn subscribe(&mut self, channel: Category) {
        let previous = self.subscription.channel();
        if self.subscription.subscribe(channel) {
            debug!(
                "{} subscribed to {} channel (was {:?})",
                self.collection_id,
                channel.as_str(),
                previous
            );
        }
    }

    fn unsubscribe(&mut self) {
        if let Some(channel) = self.subscription.unsubscribe() {
            debug!(
                "{} unsubscribed from {} channel",
                self.collection_id,
                channel.as_str()
            );
        }
    }

    /// Move to the next tier
    ///
    /// Increments the level by exactly one, fires tier-advanced with
    /// `source_id`, points the subscription at the new tier under evaluation,
    /// saves progress and rechecks eligibility. A failed save is logged and
    /// otherwise ignored. Eligibility is not required: the caller decides
    /// when an advance is earned.
    ///
    /// Returns the new level.
    ///
    /// # Errors
    ///
    /// At the last tier, returns [`TrackerError::TerminalState`] under the
    /// `Reject` policy; under `Ignore` it returns the unchanged level.
    pub fn apply_advance<C, P>(
        &mut self,
        source_id: u32,
        source: &C,
        store: &mut P,
    ) -> Result<u32, TrackerError>
    where
        C: ConditionSource + ?Sized,
        P: ProgressStore + ?Sized,
        P::Error: Display,
    {
        if !self.is_initialized() {
            return Err(TrackerError::NotInitialized(self.collection_id));
        }

        if self.is_max_level() {
            return match self.config.terminal_advance {
                TerminalAdvancePolicy::Reject => Err(TrackerError::TerminalState {
                    collection: self.collection_id,
                    level: self.level(),
                }),
                TerminalAdvancePolicy::Ignore => {
                    debug!(
                        "{} is at max level, ignoring advance from source {}",
                        self.collection_id, source_id
                    );
                    Ok(self.level())
                }
            };
        }

        self.current += 1;
        let level = self.level();
        info!(
            "{} advanced to level {}/{} (source {})",
            self.collection_id,
            level,
            self.max_level(),
            source_id
        );
        self.advance_listeners.emit(source_id);

        if let Some(channel) = self.next_category() {
            self.subscribe(channel);
        }

        if self.config.persist_on_advance {
            if let Err(e) = store.save(self.collection_id, level) {
                warn!(
                    "Failed to save progress for {} at level {}: {}",
                    self.collection_id, level, e
                );
            }
        }

        self.recheck_eligibility(source)?;
        Ok(level)
    }

    /// Drop the subscription; safe to call repeatedly
    pub fn teardown(&mut self) {
        self.unsubscribe();
    }

    /// Point-in-time view, or `None` before initialization
    pub fn snapshot(&self) -> Option<TrackerSnapshot> {
        if !self.is_initialized() {
            return None;
        }
        Some(TrackerSnapshot {
            collection_id: self.collection_id,
            level: self.level(),
            max_level: self.max_level(),
            eligible: self.eligible,
            subscription: self.subscription(),
        })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use compendium_domain::{CollectionKind, Rarity};
    use proptest::prelude::*;

    struct Levels(Vec<u32>);

    impl ConditionSource for Levels {
        fn levels_for(&self, _rarity: Rarity, _kind: CollectionKind) -> Vec<u32> {
            self.0.clone()
        }
    }

    struct NullStore;

    impl ProgressStore for NullStore {
        type Error = String;

        fn save(&mut self, _collection: CollectionId, _level: u32) -> Result<(), Self::Error> {
            Ok(())
        }

        fn load(&self, _collection: CollectionId) -> Result<Option<u32>, Self::Error> {
            Ok(None)
        }
    }

    fn tracker_with(requirements: &[u32], config: TrackerConfig) -> ProgressionTracker {
        let mut tracker = ProgressionTracker::new(CollectionId::new(5), config);
        for (level, required) in requirements.iter().enumerate() {
            tracker
                .add_tier(RawTierRecord {
                    id: 5,
                    level: level as u32,
                    group_key: "Equipment".to_string(),
                    type_key: "Armor".to_string(),
                    rarity_raw: 1,
                    required_level: *required as i32,
                    stat_type_key: "DEF".to_string(),
                    stat_raw_value: 3,
                })
                .unwrap();
        }
        tracker
    }

    proptest! {
        /// Property: k advances move the level by exactly min(k, max_level)
        #[test]
        fn test_advances_are_single_steps(tier_count in 1usize..8, k in 0usize..12) {
            let requirements: Vec<u32> = (0..tier_count as u32).collect();
            let mut tracker = tracker_with(&requirements, TrackerConfig::lenient());
            let source = Levels(vec![100]);
            tracker.initialize(&source, &NullStore).unwrap();

            let mut previous = tracker.level();
            for _ in 0..k {
                let level = tracker.apply_advance(0, &source, &mut NullStore).unwrap();
                prop_assert!(level == previous || level == previous + 1);
                previous = level;
            }

            let expected = k.min(tier_count - 1) as u32;
            prop_assert_eq!(tracker.level(), expected);
            prop_assert_eq!(tracker.max_level(), tier_count as u32 - 1);
        }

        /// Property: eligibility is exactly "every level meets the requirement"
        #[test]
        fn test_eligibility_matches_snapshot(
            required in 0u32..20,
            levels in proptest::collection::vec(0u32..30, 0..6),
        ) {
            let mut tracker = tracker_with(&[0, required], TrackerConfig::ephemeral());
            let source = Levels(levels.clone());
            tracker.initialize(&source, &NullStore).unwrap();

            let expected = levels.iter().all(|&level| level >= required);
            prop_assert_eq!(tracker.is_eligible(), expected);
            prop_assert_eq!(tracker.subscription().is_none(), expected);
        }

        /// Property: lowering one level below the requirement revokes eligibility
        #[test]
        fn test_single_drop_revokes(
            required in 1u32..20,
            count in 1usize..6,
            index in 0usize..6,
        ) {
            let mut tracker = tracker_with(&[0, required], TrackerConfig::ephemeral());
            let mut source = Levels(vec![required; count]);
            tracker.initialize(&source, &NullStore).unwrap();
            prop_assert!(tracker.is_eligible());

            source.0[index % count] = required - 1;
            prop_assert!(!tracker.recheck_eligibility(&source).unwrap());
        }
    }
}
