// ── Push channel to the settings page ──
//
// One-way, fire-and-forget. While the page is not ready the channel is
// `Disarmed` and every send is dropped on the floor: nothing is queued,
// nothing is retried. The page re-queries state once it is ready.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::{mpsc, watch};
use tracing::trace;

/// Readiness of the settings page to receive pushes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelState {
    Disarmed,
    Armed,
}

/// Messages delivered to the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Outbound {
    /// Answer to a request that carried a callback id.
    Resolve { callback_id: String, value: Value },
    /// Unsolicited named event.
    Event { name: String, value: Value },
}

/// Sending half of the page channel. Cheaply cloneable.
#[derive(Clone)]
pub struct WebUiChannel {
    inner: Arc<ChannelInner>,
}

struct ChannelInner {
    state: watch::Sender<ChannelState>,
    tx: mpsc::UnboundedSender<Outbound>,
}

impl WebUiChannel {
    /// Create a disarmed channel and the receiver the page host drains.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Outbound>) {
        let (state, _) = watch::channel(ChannelState::Disarmed);
        let (tx, rx) = mpsc::unbounded_channel();
        let channel = Self {
            inner: Arc::new(ChannelInner { state, tx }),
        };
        (channel, rx)
    }

    pub fn state(&self) -> ChannelState {
        *self.inner.state.borrow()
    }

    pub fn is_armed(&self) -> bool {
        self.state() == ChannelState::Armed
    }

    /// Observe arm/disarm transitions.
    pub fn watch_state(&self) -> watch::Receiver<ChannelState> {
        self.inner.state.subscribe()
    }

    pub(crate) fn set_state(&self, state: ChannelState) {
        self.inner.state.send_replace(state);
    }

    /// Push a named event. Returns whether it was handed to the page.
    pub fn fire_event(&self, name: &str, value: impl Into<Value>) -> bool {
        self.send(Outbound::Event {
            name: name.to_owned(),
            value: value.into(),
        })
    }

    /// Answer a request. Returns whether the answer was handed to the page.
    pub fn resolve(&self, callback_id: &str, value: impl Into<Value>) -> bool {
        self.send(Outbound::Resolve {
            callback_id: callback_id.to_owned(),
            value: value.into(),
        })
    }

    fn send(&self, message: Outbound) -> bool {
        if !self.is_armed() {
            trace!(?message, "page not ready, dropping push");
            return false;
        }
        if self.inner.tx.send(message).is_err() {
            trace!("page receiver gone, dropping push");
            return false;
        }
        true
    }
}
