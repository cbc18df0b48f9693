//! Metrics collection for registry operations

use compendium_domain::CollectionId;
use std::collections::BTreeMap;

/// Counters collected while routing notices and driving trackers
#[derive(Debug, Clone, Default)]
pub struct TrackerMetrics {
    /// Notices delivered to a subscribed tracker
    pub notices_received: usize,

    /// Delivered notices the tracker found irrelevant
    pub notices_ignored: usize,

    /// Explicit eligibility rechecks
    pub rechecks: usize,

    /// Eligibility transitions (either direction)
    pub eligibility_flips: usize,

    /// Advances applied per collection
    pub advances: BTreeMap<CollectionId, usize>,
}

impl TrackerMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one delivered notice
    pub fn record_notice(&mut self, ignored: bool) {
        self.notices_received += 1;
        if ignored {
            self.notices_ignored += 1;
        }
    }

    /// Record an explicit recheck
    pub fn record_recheck(&mut self) {
        self.rechecks += 1;
    }

    /// Record an eligibility transition
    pub fn record_flip(&mut self) {
        self.eligibility_flips += 1;
    }

    /// Record an applied advance
    pub fn record_advance(&mut self, collection: CollectionId) {
        *self.advances.entry(collection).or_insert(0) += 1;
    }

    /// Total advances across all collections
    pub fn total_advances(&self) -> usize {
        self.advances.values().sum()
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Collection Metrics Summary".to_string(),
            "==========================".to_string(),
            format!(
                "Notices: {} received, {} ignored",
                self.notices_received, self.notices_ignored
            ),
            format!("Rechecks: {}", self.rechecks),
            format!("Eligibility changes: {}", self.eligibility_flips),
        ];

        if !self.advances.is_empty() {
            lines.push(String::new());
            lines.push("Advances by collection:".to_string());
            for (collection, count) in &self.advances {
                lines.push(format!("  {}: {}", collection, count));
            }
            lines.push(format!("  Total: {}", self.total_advances()));
        }

        lines.join("\n")
    }
}
