// ── Assistant model catalog ──
//
// A static table of models plus the order the settings page lists them
// in. Storage order never leaks out: `list()` follows the display order.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::error::CoreError;
use crate::model::{EngineType, ModelCategory, ModelDescriptor};

/// Models offered by the assistant, keyed by model key.
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    table: IndexMap<String, ModelDescriptor>,
    display_order: Vec<String>,
}

impl ModelCatalog {
    /// Build a catalog, checking that `display_order` names every entry it
    /// shows exactly once and only keys the table knows.
    pub fn new<K: Into<String>>(
        models: impl IntoIterator<Item = ModelDescriptor>,
        display_order: impl IntoIterator<Item = K>,
    ) -> Result<Self, CoreError> {
        let table: IndexMap<String, ModelDescriptor> = models
            .into_iter()
            .map(|model| (model.key.clone(), model))
            .collect();
        let display_order: Vec<String> = display_order.into_iter().map(Into::into).collect();

        let mut seen = HashSet::new();
        for key in &display_order {
            if !table.contains_key(key) {
                return Err(CoreError::UnknownModel { key: key.clone() });
            }
            if !seen.insert(key.as_str()) {
                return Err(CoreError::Internal(format!(
                    "model '{key}' listed twice in display order"
                )));
            }
        }

        Ok(Self {
            table,
            display_order,
        })
    }

    /// The models shipped with the browser.
    pub fn builtin() -> Self {
        let models = [
            model(
                "chat-claude-instant",
                "claude-instant-v1",
                "Claude Instant",
                "Anthropic",
                EngineType::ClaudeRemote,
                true,
            ),
            model(
                "chat-default",
                "llama-2-13b-chat",
                "Llama 2 13b",
                "Meta",
                EngineType::LlamaRemote,
                false,
            ),
            model(
                "chat-expanded",
                "llama-2-70b-chat",
                "Llama 2 70b",
                "Meta",
                EngineType::LlamaRemote,
                true,
            ),
        ];

        Self {
            table: models.into_iter().map(|m| (m.key.clone(), m)).collect(),
            display_order: ["chat-default", "chat-expanded", "chat-claude-instant"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    /// Every displayed model, in display order.
    pub fn list(&self) -> Vec<ModelDescriptor> {
        self.display_order
            .iter()
            .filter_map(|key| self.table.get(key))
            .cloned()
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&ModelDescriptor> {
        self.table.get(key)
    }

    pub fn display_order(&self) -> &[String] {
        &self.display_order
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn model(
    key: &str,
    name: &str,
    display_name: &str,
    display_maker: &str,
    engine_type: EngineType,
    is_premium: bool,
) -> ModelDescriptor {
    ModelDescriptor {
        key: key.to_owned(),
        name: name.to_owned(),
        display_name: display_name.to_owned(),
        display_maker: display_maker.to_owned(),
        engine_type,
        category: ModelCategory::Chat,
        is_premium,
    }
}
