// ── Inbound settings page messages ──

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Event pushed whenever the assistant entry changes visibility.
pub const VISIBILITY_CHANGED_EVENT: &str = "settings-assistant-visibility-changed";

/// Requests the assistant settings page can send.
///
/// Requests with a `callback_id` get exactly one [`Outbound::Resolve`](super::Outbound)
/// answer carrying that id; the rest are fire-and-forget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "message", rename_all = "kebab-case")]
pub enum WebUiRequest {
    ToggleVisibility,
    GetVisibility { callback_id: String },
    Reset,
    ListModels { callback_id: String },
    /// The page finished loading and can receive pushes.
    PageReady,
    /// The page is going away; stop pushing.
    PageUnloaded,
}

impl WebUiRequest {
    /// Decode one JSON request.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        serde_json::from_str(raw).map_err(|e| CoreError::InvalidMessage {
            message: e.to_string(),
        })
    }

    /// Wire name of the request, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ToggleVisibility => "toggle-visibility",
            Self::GetVisibility { .. } => "get-visibility",
            Self::Reset => "reset",
            Self::ListModels { .. } => "list-models",
            Self::PageReady => "page-ready",
            Self::PageUnloaded => "page-unloaded",
        }
    }
}
