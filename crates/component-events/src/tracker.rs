//! # Subscription Tracker
//!
//! Per-instance record of what the resolver registered on the bus, so that
//! teardown removes exactly those callbacks and nothing else.

use shared_bus::Callback;
use std::collections::HashMap;

/// Where an instance is in its subscription lifecycle.
///
/// ```text
/// Uninitialized ──(handlers declared)──► Tracking ──► TornDown
///       │                                                ▲
///       └─────────────(no handlers)──────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Created; nothing subscribed yet.
    Uninitialized,
    /// Declared handlers are registered on the bus.
    Tracking,
    /// Destroyed; every tracked subscription was removed.
    TornDown,
}

/// Event name → bound callback currently registered for one instance.
#[derive(Debug, Default)]
pub struct SubscriptionTracker {
    entries: HashMap<String, Callback>,
}

impl SubscriptionTracker {
    /// Empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `callback` as the subscription for `event`.
    pub fn track(&mut self, event: &str, callback: Callback) {
        self.entries.insert(event.to_owned(), callback);
    }

    /// Callback tracked for `event`, if subscribed.
    pub fn get(&self, event: &str) -> Option<&Callback> {
        self.entries.get(event)
    }

    /// Whether `event` has a tracked subscription.
    pub fn contains(&self, event: &str) -> bool {
        self.entries.contains_key(event)
    }

    /// Number of tracked subscriptions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tracked names, sorted.
    pub fn events(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Take every entry out, leaving the tracker empty.
    pub fn drain(&mut self) -> impl Iterator<Item = (String, Callback)> + '_ {
        self.entries.drain()
    }
}
