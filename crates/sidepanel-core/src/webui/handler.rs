// ── Assistant settings message handler ──
//
// Routes decoded page requests to the visibility controller and the
// model catalog. One handler per open settings page.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use super::channel::{Outbound, WebUiChannel};
use super::message::WebUiRequest;
use crate::catalog::ModelCatalog;
use crate::error::CoreError;
use crate::session::Session;
use crate::visibility::VisibilityController;

pub struct AssistantSettingsHandler {
    visibility: VisibilityController,
    catalog: Arc<ModelCatalog>,
}

impl AssistantSettingsHandler {
    /// Create a handler bound to `session` and the receiver its pushes and
    /// answers arrive on. The channel starts disarmed.
    pub fn new(
        session: Arc<Session>,
        catalog: Arc<ModelCatalog>,
    ) -> (Self, mpsc::UnboundedReceiver<Outbound>) {
        let (channel, rx) = WebUiChannel::new();
        let handler = Self {
            visibility: VisibilityController::new(session, channel),
            catalog,
        };
        (handler, rx)
    }

    /// Dispatch one request.
    pub fn handle(&self, request: WebUiRequest) -> Result<(), CoreError> {
        debug!(message = request.name(), "settings request");
        match request {
            WebUiRequest::ToggleVisibility => self.visibility.toggle()?,
            WebUiRequest::GetVisibility { callback_id } => {
                let visible = self.visibility.query_visibility();
                self.visibility.channel().resolve(&callback_id, visible);
            }
            WebUiRequest::Reset => self.visibility.reset()?,
            WebUiRequest::ListModels { callback_id } => {
                self.visibility.ensure_armed();
                let models = serde_json::to_value(self.catalog.list())?;
                self.visibility.channel().resolve(&callback_id, models);
            }
            WebUiRequest::PageReady => self.visibility.arm(),
            WebUiRequest::PageUnloaded => self.visibility.disarm(),
        }
        Ok(())
    }

    /// Decode and dispatch one raw JSON request.
    pub fn handle_json(&self, raw: &str) -> Result<(), CoreError> {
        self.handle(WebUiRequest::parse(raw)?)
    }

    pub fn visibility(&self) -> &VisibilityController {
        &self.visibility
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// Follow the page to another profile.
    pub fn rebind_session(&self, session: Arc<Session>) {
        self.visibility.rebind_session(session);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use super::*;
    use crate::model::{BuiltInItemType, SidebarItem};
    use crate::prefs::{PrefService, names};
    use crate::registry::SidebarService;
    use crate::webui::VISIBILITY_CHANGED_EVENT;

    fn handler() -> (
        AssistantSettingsHandler,
        mpsc::UnboundedReceiver<Outbound>,
        Arc<Session>,
    ) {
        let session = Arc::new(Session::default());
        let (handler, rx) =
            AssistantSettingsHandler::new(Arc::clone(&session), Arc::new(ModelCatalog::builtin()));
        (handler, rx, session)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<Outbound>) -> Vec<Outbound> {
        let mut out = Vec::new();
        while let Ok(message) = rx.try_recv() {
            out.push(message);
        }
        out
    }

    fn resolve(callback_id: &str, value: Value) -> Outbound {
        Outbound::Resolve {
            callback_id: callback_id.to_owned(),
            value,
        }
    }

    fn event(value: bool) -> Outbound {
        Outbound::Event {
            name: VISIBILITY_CHANGED_EVENT.to_owned(),
            value: Value::Bool(value),
        }
    }

    #[test]
    fn get_visibility_answers_its_callback() {
        let (handler, mut rx, _) = handler();
        handler
            .handle_json(r#"{"message":"get-visibility","callback_id":"cb-1"}"#)
            .unwrap();
        assert_eq!(drain(&mut rx), vec![resolve("cb-1", json!(true))]);
    }

    #[test]
    fn toggle_pushes_new_state() {
        let (handler, mut rx, session) = handler();
        handler.handle(WebUiRequest::ToggleVisibility).unwrap();
        handler.handle(WebUiRequest::ToggleVisibility).unwrap();

        assert_eq!(drain(&mut rx), vec![event(false), event(true)]);
        assert!(session.registry().find_visible(BuiltInItemType::ChatUi).is_some());
    }

    #[test]
    fn list_models_resolves_in_display_order() {
        let (handler, mut rx, _) = handler();
        handler
            .handle(WebUiRequest::ListModels {
                callback_id: "models".into(),
            })
            .unwrap();

        let messages = drain(&mut rx);
        assert_eq!(messages.len(), 1);
        let Outbound::Resolve { callback_id, value } = &messages[0] else {
            panic!("expected a resolve, got {messages:?}");
        };
        assert_eq!(callback_id, "models");
        let keys: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["key"].as_str().unwrap())
            .collect();
        assert_eq!(keys, vec!["chat-default", "chat-expanded", "chat-claude-instant"]);
    }

    #[test]
    fn unloaded_page_receives_nothing() {
        let (handler, mut rx, session) = handler();
        handler.handle(WebUiRequest::PageReady).unwrap();
        handler.handle(WebUiRequest::PageUnloaded).unwrap();

        let (index, _) = session
            .registry()
            .find_visible(BuiltInItemType::ChatUi)
            .unwrap();
        session.registry().remove_item_at(index).unwrap();

        assert!(drain(&mut rx).is_empty());
        assert!(!handler.visibility().is_armed());
    }

    #[test]
    fn reset_reveals_and_writes_prefs() {
        let registry = SidebarService::from_parts(
            vec![],
            vec![SidebarItem::built_in(BuiltInItemType::ChatUi)],
        )
        .unwrap();
        let prefs = Arc::new(PrefService::in_memory());
        prefs
            .set_value(names::LAST_ACCEPTED_DISCLAIMER, json!("2024-01-01"))
            .unwrap();
        let session = Arc::new(Session::new(registry, Arc::clone(&prefs)));
        let (handler, mut rx) =
            AssistantSettingsHandler::new(Arc::clone(&session), Arc::new(ModelCatalog::builtin()));
        handler.handle(WebUiRequest::PageReady).unwrap();

        handler.handle_json(r#"{"message":"reset"}"#).unwrap();

        assert_eq!(drain(&mut rx), vec![event(true)]);
        assert!(!prefs.has_user_value(names::LAST_ACCEPTED_DISCLAIMER));
        assert!(!prefs.get_bool(names::AUTO_GENERATE_QUESTIONS).unwrap());
    }

    #[test]
    fn malformed_request_is_rejected() {
        let (handler, mut rx, _) = handler();
        let err = handler.handle_json(r#"{"message":"launch-rockets"}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidMessage { .. }));
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn rebind_moves_pushes_to_new_profile() {
        let (handler, mut rx, old) = handler();
        handler.handle(WebUiRequest::PageReady).unwrap();

        let new = Arc::new(Session::default());
        handler.rebind_session(Arc::clone(&new));

        let (index, _) = old.registry().find_visible(BuiltInItemType::ChatUi).unwrap();
        old.registry().remove_item_at(index).unwrap();
        assert!(drain(&mut rx).is_empty());

        let (index, _) = new.registry().find_visible(BuiltInItemType::ChatUi).unwrap();
        new.registry().remove_item_at(index).unwrap();
        assert_eq!(drain(&mut rx), vec![event(false)]);
    }
}
