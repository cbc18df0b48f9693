//! Broadcast channel subscription slot
//!
//! Each tracker listens on at most one channel. The registry delivers a
//! notice only to trackers whose slot names the notice's channel.

use compendium_domain::Category;

/// The single channel a tracker is subscribed to, if any
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Subscription {
    channel: Option<Category>,
}

impl Subscription {
    /// Subscribed channel
    pub fn channel(&self) -> Option<Category> {
        self.channel
    }

    /// Whether notices on `channel` reach this slot
    pub fn is_subscribed_to(&self, channel: Category) -> bool {
        self.channel == Some(channel)
    }

    /// Point the slot at `channel`, dropping any other channel first
    ///
    /// Returns `true` when the slot changed.
    pub fn subscribe(&mut self, channel: Category) -> bool {
        if self.channel == Some(channel) {
            return false;
        }
        self.channel = Some(channel);
        true
    }

    /// Clear the slot; a no-op when already clear
    ///
    /// Returns the channel that was dropped.
    pub fn unsubscribe(&mut self) -> Option<Category> {
        self.channel.take()
    }
}
