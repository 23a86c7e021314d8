// ── Registry observers and subscription handles ──

use std::fmt;
use std::sync::Weak;

use crate::model::SidebarItem;

use super::sidebar::SidebarInner;

/// Receives membership transitions from a [`SidebarService`](super::SidebarService).
///
/// Callbacks run synchronously inside the mutating call, after the
/// registry has released its state lock, so implementations may query the
/// registry but must not assume any particular observer ordering.
pub trait SidebarObserver: Send + Sync {
    /// An item moved into the visible sequence at `index`.
    fn on_item_added(&self, _item: &SidebarItem, _index: usize) {}

    /// The item previously visible at `index` moved to the hidden sequence.
    fn on_item_removed(&self, _item: &SidebarItem, _index: usize) {}
}

/// Opaque identifier of one registered observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);

/// Live registration of an observer. Dropping it unregisters the observer.
///
/// Holds only a weak reference, so an outstanding subscription never keeps
/// a replaced registry alive.
pub struct Subscription {
    pub(crate) id: SubscriptionId,
    pub(crate) registry: Weak<SidebarInner>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Whether the registry this subscription points at still exists.
    pub fn is_live(&self) -> bool {
        self.registry.strong_count() > 0
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.registry.upgrade() {
            inner.unregister(self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("live", &self.is_live())
            .finish()
    }
}
