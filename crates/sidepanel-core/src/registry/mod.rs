// ── Side panel registry ──
//
// Ordered visible/hidden item sequences with synchronous observer
// notification and a `watch`-based snapshot feed.

mod sidebar;
mod subscription;

pub use sidebar::{SidebarService, SidebarSnapshot};
pub use subscription::{SidebarObserver, Subscription, SubscriptionId};

use crate::error::RegistryError;
use crate::model::{BuiltInItemType, SidebarItem};

/// The lookups and moves the visibility controller performs on a registry.
///
/// Indices are positions in the visible sequence at the time of the call.
pub trait ItemRegistry {
    fn find_visible(&self, kind: BuiltInItemType) -> Option<(usize, SidebarItem)>;

    fn find_hidden(&self, kind: BuiltInItemType) -> Option<SidebarItem>;

    /// Make `item` visible, taking it out of the hidden sequence.
    fn add_item(&self, item: SidebarItem) -> Result<usize, RegistryError>;

    /// Hide the visible item at `index`.
    fn remove_item_at(&self, index: usize) -> Result<SidebarItem, RegistryError>;
}
