// ── Profile session ──
//
// Binds one side panel registry to one preference store. Controllers
// receive a session explicitly and are re-bound when the profile changes.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::{BuiltInItemType, SidebarItem, default_items};
use crate::prefs::{PrefService, names};
use crate::registry::{SidebarObserver, SidebarService, SidebarSnapshot, Subscription};

/// The registry and preferences of one browser profile.
pub struct Session {
    registry: SidebarService,
    prefs: Arc<PrefService>,
    persistence: Option<Subscription>,
}

impl Session {
    /// Pair an existing registry with a preference store. Registry changes
    /// are not written back to preferences.
    pub fn new(registry: SidebarService, prefs: Arc<PrefService>) -> Self {
        Self {
            registry,
            prefs,
            persistence: None,
        }
    }

    /// Restore the side panel layout from preferences and keep the
    /// `sidebar.*` preferences in sync with every later change.
    ///
    /// Without stored layout every built-in item starts visible. When only
    /// the hidden list is stored, the remaining built-ins are visible in
    /// canonical order.
    pub fn open(prefs: Arc<PrefService>) -> Result<Self, CoreError> {
        let hidden = kinds_from_pref(&prefs.get(names::SIDEBAR_HIDDEN_ITEMS)?)
            .unwrap_or_default();
        let visible = kinds_from_pref(&prefs.get(names::SIDEBAR_VISIBLE_ITEMS)?).unwrap_or_else(
            || {
                default_items()
                    .into_iter()
                    .map(|item| item.built_in_item_type)
                    .filter(|kind| !hidden.contains(kind))
                    .collect()
            },
        );

        let registry = SidebarService::from_parts(
            visible.into_iter().map(SidebarItem::built_in).collect(),
            hidden.into_iter().map(SidebarItem::built_in).collect(),
        )?;
        debug!(
            visible = registry.items().len(),
            hidden = registry.hidden_items().len(),
            "side panel layout restored"
        );

        let persistence = registry.observe(Arc::new(LayoutPersistence {
            snapshot: registry.watch(),
            prefs: Arc::clone(&prefs),
        }));

        Ok(Self {
            registry,
            prefs,
            persistence: Some(persistence),
        })
    }

    pub fn registry(&self) -> &SidebarService {
        &self.registry
    }

    pub fn prefs(&self) -> &Arc<PrefService> {
        &self.prefs
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SidebarService::new(), Arc::new(PrefService::in_memory()))
    }
}

// ── Layout persistence ───────────────────────────────────────────────

/// Mirrors both sequences into preferences after every transition.
///
/// Reads the registry through its `watch` feed rather than a registry
/// handle, so the observer never keeps the registry alive.
struct LayoutPersistence {
    snapshot: watch::Receiver<Arc<SidebarSnapshot>>,
    prefs: Arc<PrefService>,
}

impl LayoutPersistence {
    fn write_back(&self) {
        let snap = self.snapshot.borrow().clone();
        let result = self
            .prefs
            .set_value(names::SIDEBAR_VISIBLE_ITEMS, kinds_to_pref(&snap.items))
            .and_then(|()| {
                self.prefs
                    .set_value(names::SIDEBAR_HIDDEN_ITEMS, kinds_to_pref(&snap.hidden))
            });
        if let Err(e) = result {
            warn!(error = %e, "failed to persist side panel layout");
        }
    }
}

impl SidebarObserver for LayoutPersistence {
    fn on_item_added(&self, _item: &SidebarItem, _index: usize) {
        self.write_back();
    }

    fn on_item_removed(&self, _item: &SidebarItem, _index: usize) {
        self.write_back();
    }
}

fn kinds_to_pref(items: &[SidebarItem]) -> Value {
    Value::Array(
        items
            .iter()
            .map(|item| Value::String(item.built_in_item_type.to_string()))
            .collect(),
    )
}

/// `None` when the preference was never written.
fn kinds_from_pref(value: &Value) -> Option<Vec<BuiltInItemType>> {
    let Value::Array(entries) = value else {
        return None;
    };
    let kinds = entries
        .iter()
        .filter_map(|entry| {
            let parsed = entry.as_str().and_then(|s| s.parse().ok());
            if parsed.is_none() {
                warn!(%entry, "skipping unknown side panel item in preferences");
            }
            parsed
        })
        .collect();
    Some(kinds)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn open_without_layout_shows_everything() {
        let session = Session::open(Arc::new(PrefService::in_memory())).unwrap();
        assert_eq!(session.registry().items(), default_items());
        assert!(session.persistence.is_some());
    }

    #[test]
    fn open_with_hidden_only_derives_visible() {
        let prefs = PrefService::in_memory();
        prefs
            .set_value(names::SIDEBAR_HIDDEN_ITEMS, json!(["chat-ui", "wallet"]))
            .unwrap();
        let session = Session::open(Arc::new(prefs)).unwrap();

        let registry = session.registry();
        assert!(registry.contains_hidden(BuiltInItemType::ChatUi));
        assert!(registry.contains_hidden(BuiltInItemType::Wallet));
        assert!(registry.find_visible(BuiltInItemType::ChatUi).is_none());
        assert_eq!(registry.items().len(), default_items().len() - 2);
    }

    #[test]
    fn unknown_kinds_are_skipped() {
        let prefs = PrefService::in_memory();
        prefs
            .set_value(names::SIDEBAR_VISIBLE_ITEMS, json!(["history", "mystery"]))
            .unwrap();
        let session = Session::open(Arc::new(prefs)).unwrap();
        assert_eq!(
            session.registry().items(),
            vec![SidebarItem::built_in(BuiltInItemType::History)]
        );
    }

    #[test]
    fn duplicate_layout_is_an_error() {
        let prefs = PrefService::in_memory();
        prefs
            .set_value(names::SIDEBAR_VISIBLE_ITEMS, json!(["chat-ui"]))
            .unwrap();
        prefs
            .set_value(names::SIDEBAR_HIDDEN_ITEMS, json!(["chat-ui"]))
            .unwrap();
        assert!(matches!(
            Session::open(Arc::new(prefs)),
            Err(CoreError::Registry(_))
        ));
    }

    #[test]
    fn changes_are_written_back() {
        let prefs = Arc::new(PrefService::in_memory());
        let session = Session::open(Arc::clone(&prefs)).unwrap();
        let (index, _) = session
            .registry()
            .find_visible(BuiltInItemType::ChatUi)
            .unwrap();

        session.registry().remove_item_at(index).unwrap();

        assert_eq!(prefs.get(names::SIDEBAR_HIDDEN_ITEMS).unwrap(), json!(["chat-ui"]));
        let visible = prefs.get(names::SIDEBAR_VISIBLE_ITEMS).unwrap();
        assert!(!visible.as_array().unwrap().contains(&json!("chat-ui")));
    }

    #[test]
    fn plain_session_does_not_persist() {
        let session = Session::default();
        session.registry().remove_item_at(0).unwrap();
        assert!(session.persistence.is_none());
        assert!(session.prefs().user_values().is_empty());
    }
}
