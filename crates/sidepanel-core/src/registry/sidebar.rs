// ── Side panel service ──
//
// The shared registry every settings page and toolbar view mutates.
// State lives behind a single lock; observers live in a `DashMap` so
// subscriptions can come and go while a notification is in flight.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use super::ItemRegistry;
use super::subscription::{SidebarObserver, Subscription, SubscriptionId};
use crate::error::RegistryError;
use crate::model::{BuiltInItemType, SidebarItem, default_items};

/// Point-in-time copy of both sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SidebarSnapshot {
    /// Visible items, in panel order.
    pub items: Vec<SidebarItem>,
    /// Hidden built-in items, in the order they were hidden.
    pub hidden: Vec<SidebarItem>,
}

impl SidebarSnapshot {
    fn validate(&self) -> Result<(), RegistryError> {
        let mut seen = HashSet::new();
        for item in self.items.iter().chain(&self.hidden) {
            if !seen.insert(item.built_in_item_type) {
                return Err(RegistryError::DuplicateItem {
                    kind: item.built_in_item_type,
                });
            }
        }
        Ok(())
    }
}

/// Ordered collection of side panel items.
///
/// Cheaply cloneable; all clones share the same state and observers.
/// An item kind is always in exactly one of the two sequences, or in
/// neither if it was never registered.
///
/// Each call takes the lock on its own, so an index returned by
/// [`find_visible`](Self::find_visible) is only good until the next
/// mutation. Mutations must stay on one sequence of calls (one task or
/// thread at a time); concurrent writers through different clones can
/// shift indices between a lookup and a removal.
#[derive(Clone)]
pub struct SidebarService {
    inner: Arc<SidebarInner>,
}

pub(crate) struct SidebarInner {
    state: RwLock<SidebarSnapshot>,
    observers: DashMap<SubscriptionId, Arc<dyn SidebarObserver>>,
    next_subscription: AtomicU64,
    snapshot: watch::Sender<Arc<SidebarSnapshot>>,
    last_changed: watch::Sender<Option<DateTime<Utc>>>,
}

impl SidebarInner {
    pub(crate) fn unregister(&self, id: SubscriptionId) {
        if self.observers.remove(&id).is_some() {
            debug!(subscription = id.0, "sidebar observer removed");
        }
    }
}

impl SidebarService {
    /// A registry with every built-in item visible in canonical order.
    pub fn new() -> Self {
        Self::with_snapshot(SidebarSnapshot {
            items: default_items(),
            hidden: Vec::new(),
        })
    }

    /// Build a registry from explicit sequences.
    ///
    /// Rejects any kind that appears more than once across both.
    pub fn from_parts(
        items: Vec<SidebarItem>,
        hidden: Vec<SidebarItem>,
    ) -> Result<Self, RegistryError> {
        let snapshot = SidebarSnapshot { items, hidden };
        snapshot.validate()?;
        Ok(Self::with_snapshot(snapshot))
    }

    fn with_snapshot(state: SidebarSnapshot) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(state.clone()));
        let (last_changed, _) = watch::channel(None);

        Self {
            inner: Arc::new(SidebarInner {
                state: RwLock::new(state),
                observers: DashMap::new(),
                next_subscription: AtomicU64::new(1),
                snapshot,
                last_changed,
            }),
        }
    }

    /// Whether two handles point at the same registry.
    pub fn same_service(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Visible items, in panel order.
    pub fn items(&self) -> Vec<SidebarItem> {
        self.read(|s| s.items.clone())
    }

    /// Hidden built-in items.
    pub fn hidden_items(&self) -> Vec<SidebarItem> {
        self.read(|s| s.hidden.clone())
    }

    /// Position and value of the visible item of `kind`, if any.
    pub fn find_visible(&self, kind: BuiltInItemType) -> Option<(usize, SidebarItem)> {
        self.read(|s| {
            s.items
                .iter()
                .position(|item| item.is(kind))
                .and_then(|index| s.items.get(index).map(|item| (index, item.clone())))
        })
    }

    /// The hidden item of `kind`, if any.
    pub fn find_hidden(&self, kind: BuiltInItemType) -> Option<SidebarItem> {
        self.read(|s| s.hidden.iter().find(|item| item.is(kind)).cloned())
    }

    pub fn contains_hidden(&self, kind: BuiltInItemType) -> bool {
        self.read(|s| s.hidden.iter().any(|item| item.is(kind)))
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Append `item` to the visible sequence, taking it out of the hidden
    /// one if it was there. Returns the new visible index.
    pub fn add_item(&self, item: SidebarItem) -> Result<usize, RegistryError> {
        let kind = item.built_in_item_type;
        let index = {
            let mut state = self.write();
            if state.items.iter().any(|existing| existing.is(kind)) {
                return Err(RegistryError::AlreadyVisible { kind });
            }
            state.hidden.retain(|hidden| !hidden.is(kind));
            state.items.push(item.clone());
            self.publish(&state);
            state.items.len() - 1
        };

        debug!(%kind, index, "sidebar item added");
        for observer in self.observers() {
            observer.on_item_added(&item, index);
        }
        Ok(index)
    }

    /// Move the visible item at `index` to the end of the hidden sequence.
    pub fn remove_item_at(&self, index: usize) -> Result<SidebarItem, RegistryError> {
        let removed = {
            let mut state = self.write();
            let len = state.items.len();
            if index >= len {
                return Err(RegistryError::IndexOutOfRange { index, len });
            }
            let removed = state.items.remove(index);
            state.hidden.push(removed.clone());
            self.publish(&state);
            removed
        };

        debug!(kind = %removed.built_in_item_type, index, "sidebar item removed");
        for observer in self.observers() {
            observer.on_item_removed(&removed, index);
        }
        Ok(removed)
    }

    // ── Observers ────────────────────────────────────────────────────

    /// Register `observer` for add/remove notifications until the returned
    /// handle is dropped.
    pub fn observe(&self, observer: Arc<dyn SidebarObserver>) -> Subscription {
        let id = SubscriptionId(self.inner.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.inner.observers.insert(id, observer);
        debug!(subscription = id.0, "sidebar observer added");

        Subscription {
            id,
            registry: Arc::downgrade(&self.inner),
        }
    }

    pub fn observer_count(&self) -> usize {
        self.inner.observers.len()
    }

    // ── Snapshots ────────────────────────────────────────────────────

    /// Current state of both sequences (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<SidebarSnapshot> {
        self.inner.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub fn watch(&self) -> watch::Receiver<Arc<SidebarSnapshot>> {
        self.inner.snapshot.subscribe()
    }

    /// When a mutation last landed, or `None` if the registry is untouched.
    pub fn last_changed(&self) -> Option<DateTime<Utc>> {
        *self.inner.last_changed.borrow()
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn read<R>(&self, f: impl FnOnce(&SidebarSnapshot) -> R) -> R {
        let state = self.inner.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, SidebarSnapshot> {
        self.inner.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Broadcast the new state to `watch` subscribers.
    fn publish(&self, state: &SidebarSnapshot) {
        // `send_modify` updates unconditionally, even with zero receivers.
        self.inner
            .snapshot
            .send_modify(|snap| *snap = Arc::new(state.clone()));
        self.inner
            .last_changed
            .send_modify(|at| *at = Some(Utc::now()));
    }

    /// Observers in registration order, cloned out so callbacks run
    /// without holding any registry lock.
    fn observers(&self) -> Vec<Arc<dyn SidebarObserver>> {
        let mut entries: Vec<(SubscriptionId, Arc<dyn SidebarObserver>)> = self
            .inner
            .observers
            .iter()
            .map(|entry| (*entry.key(), Arc::clone(entry.value())))
            .collect();
        entries.sort_by_key(|(id, _)| *id);
        entries.into_iter().map(|(_, observer)| observer).collect()
    }
}

impl Default for SidebarService {
    fn default() -> Self {
        Self::new()
    }
}

// ── Controller-facing steps ──────────────────────────────────────────

impl ItemRegistry for SidebarService {
    fn find_visible(&self, kind: BuiltInItemType) -> Option<(usize, SidebarItem)> {
        SidebarService::find_visible(self, kind)
    }

    fn find_hidden(&self, kind: BuiltInItemType) -> Option<SidebarItem> {
        SidebarService::find_hidden(self, kind)
    }

    fn add_item(&self, item: SidebarItem) -> Result<usize, RegistryError> {
        SidebarService::add_item(self, item)
    }

    fn remove_item_at(&self, index: usize) -> Result<SidebarItem, RegistryError> {
        SidebarService::remove_item_at(self, index)
    }
}
