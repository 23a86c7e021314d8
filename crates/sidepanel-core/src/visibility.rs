// ── Assistant visibility controller ──
//
// Keeps the "is the assistant entry visible" fact consistent between
// toggle requests, the shared side panel registry, and the settings page
// push channel. The fact itself is never stored: every read goes to the
// registry, so changes made elsewhere can't leave it stale.

use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;
use tracing::{debug, info};

use crate::error::{CoreError, RegistryError};
use crate::model::{BuiltInItemType, SidebarItem};
use crate::prefs::{PrefService, names};
use crate::registry::{ItemRegistry, SidebarObserver, Subscription};
use crate::session::Session;
use crate::webui::{ChannelState, VISIBILITY_CHANGED_EVENT, WebUiChannel};

/// The side panel entry this controller manages.
pub const TARGET_KIND: BuiltInItemType = BuiltInItemType::ChatUi;

/// Answer to "is it visible?" when the entry is in neither sequence.
///
/// The entry is visible unless it was explicitly hidden.
pub const DEFAULT_VISIBLE_WHEN_UNREGISTERED: bool = true;

// ── Registry steps ───────────────────────────────────────────────────

/// Move `kind` from hidden to visible. `Ok(false)` if it wasn't hidden.
pub fn reveal_if_hidden(
    registry: &(impl ItemRegistry + ?Sized),
    kind: BuiltInItemType,
) -> Result<bool, RegistryError> {
    let Some(item) = registry.find_hidden(kind) else {
        return Ok(false);
    };
    registry.add_item(item)?;
    Ok(true)
}

/// Move `kind` from visible to hidden. `Ok(false)` if it wasn't visible.
pub fn hide_if_visible(
    registry: &(impl ItemRegistry + ?Sized),
    kind: BuiltInItemType,
) -> Result<bool, RegistryError> {
    let Some((index, _)) = registry.find_visible(kind) else {
        return Ok(false);
    };
    registry.remove_item_at(index)?;
    Ok(true)
}

/// Reveal the entry, then clear accumulated assistant state.
///
/// A failed reveal returns before any preference is written.
fn restore_assistant(
    registry: &(impl ItemRegistry + ?Sized),
    prefs: &PrefService,
) -> Result<(), CoreError> {
    reveal_if_hidden(registry, TARGET_KIND)?;
    prefs.clear_pref(names::LAST_ACCEPTED_DISCLAIMER)?;
    prefs.set_boolean(names::AUTO_GENERATE_QUESTIONS, false)?;
    Ok(())
}

// ── Controller ───────────────────────────────────────────────────────

/// Mediates between the registry, the preference store, and the page.
///
/// Channel lifecycle: `Disarmed` until [`arm`](Self::arm), which (re)subscribes
/// to the bound registry; [`disarm`](Self::disarm) drops the subscription.
/// Arming twice replaces the subscription, so at most one is ever live.
pub struct VisibilityController {
    session: ArcSwap<Session>,
    channel: WebUiChannel,
    subscription: Mutex<Option<Subscription>>,
}

impl VisibilityController {
    pub fn new(session: Arc<Session>, channel: WebUiChannel) -> Self {
        Self {
            session: ArcSwap::new(session),
            channel,
            subscription: Mutex::new(None),
        }
    }

    /// The currently bound session.
    pub fn session(&self) -> Arc<Session> {
        self.session.load_full()
    }

    pub fn channel(&self) -> &WebUiChannel {
        &self.channel
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Flip the entry: reveal it if hidden, otherwise hide it if visible.
    ///
    /// An entry in neither sequence is left alone. The resulting push comes
    /// from the registry notification, not from this call.
    pub fn toggle(&self) -> Result<(), RegistryError> {
        let session = self.session();
        let registry = session.registry();

        self.ensure_armed();
        if !reveal_if_hidden(registry, TARGET_KIND)? && !hide_if_visible(registry, TARGET_KIND)? {
            debug!(kind = %TARGET_KIND, "toggle found nothing to flip");
        }
        Ok(())
    }

    /// Whether the entry is visible right now.
    pub fn query_visibility(&self) -> bool {
        let session = self.session();
        let registry = session.registry();
        let visible = if registry.contains_hidden(TARGET_KIND) {
            false
        } else if registry.find_visible(TARGET_KIND).is_some() {
            true
        } else {
            DEFAULT_VISIBLE_WHEN_UNREGISTERED
        };
        self.ensure_armed();
        visible
    }

    /// Restore the entry and clear accumulated assistant state.
    ///
    /// The preference writes happen even if the entry was already visible,
    /// but never after a failed registry step.
    pub fn reset(&self) -> Result<(), CoreError> {
        let session = self.session();
        restore_assistant(session.registry(), session.prefs())?;
        info!("assistant settings reset");

        self.ensure_armed();
        Ok(())
    }

    // ── Channel lifecycle ────────────────────────────────────────────

    /// Subscribe to the bound registry and start pushing.
    ///
    /// Any previous subscription is dropped first.
    pub fn arm(&self) {
        let mut slot = self.subscription.lock().unwrap_or_else(PoisonError::into_inner);
        slot.take();

        let observer = Arc::new(VisibilityObserver {
            kind: TARGET_KIND,
            channel: self.channel.clone(),
        });
        *slot = Some(self.session().registry().observe(observer));
        self.channel.set_state(ChannelState::Armed);
        debug!("visibility channel armed");
    }

    /// Drop the subscription; nothing is pushed until the next arm.
    pub fn disarm(&self) {
        let mut slot = self.subscription.lock().unwrap_or_else(PoisonError::into_inner);
        slot.take();
        self.channel.set_state(ChannelState::Disarmed);
        debug!("visibility channel disarmed");
    }

    /// Arm if currently disarmed; leave a live subscription untouched.
    pub fn ensure_armed(&self) {
        if !self.channel.is_armed() {
            self.arm();
        }
    }

    pub fn is_armed(&self) -> bool {
        self.channel.is_armed()
    }

    /// Bind a different session. An armed controller follows it to the new
    /// registry; a disarmed one stays disarmed. A session sharing the old
    /// registry keeps the live subscription.
    pub fn rebind_session(&self, session: Arc<Session>) {
        let previous = self.session.swap(session);
        if self.is_armed() && !previous.registry().same_service(self.session().registry()) {
            self.arm();
        }
    }
}

impl Drop for VisibilityController {
    fn drop(&mut self) {
        self.channel.set_state(ChannelState::Disarmed);
    }
}

// ── Registry observer ────────────────────────────────────────────────

/// Forwards transitions of one kind to the page as `true`/`false` pushes.
struct VisibilityObserver {
    kind: BuiltInItemType,
    channel: WebUiChannel,
}

impl SidebarObserver for VisibilityObserver {
    fn on_item_added(&self, item: &SidebarItem, _index: usize) {
        if item.is(self.kind) {
            self.channel.fire_event(VISIBILITY_CHANGED_EVENT, true);
        }
    }

    fn on_item_removed(&self, item: &SidebarItem, _index: usize) {
        if item.is(self.kind) {
            self.channel.fire_event(VISIBILITY_CHANGED_EVENT, false);
        }
    }
}
