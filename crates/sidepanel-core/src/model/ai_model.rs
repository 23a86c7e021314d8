// ── Assistant model descriptors ──

use serde::{Deserialize, Serialize};

/// Backend family serving a model. Serialized as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum EngineType {
    LlamaRemote,
    ClaudeRemote,
}

/// What a model is offered for. Serialized as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum ModelCategory {
    Chat,
}

impl From<EngineType> for i32 {
    fn from(engine: EngineType) -> Self {
        match engine {
            EngineType::LlamaRemote => 0,
            EngineType::ClaudeRemote => 1,
        }
    }
}

impl TryFrom<i32> for EngineType {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::LlamaRemote),
            1 => Ok(Self::ClaudeRemote),
            other => Err(format!("unknown engine type code {other}")),
        }
    }
}

impl From<ModelCategory> for i32 {
    fn from(category: ModelCategory) -> Self {
        match category {
            ModelCategory::Chat => 0,
        }
    }
}

impl TryFrom<i32> for ModelCategory {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Chat),
            other => Err(format!("unknown model category code {other}")),
        }
    }
}

/// A model offered in the assistant settings page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Stable lookup key, e.g. `chat-default`.
    pub key: String,
    /// Name the engine expects on the wire.
    pub name: String,
    pub display_name: String,
    pub display_maker: String,
    pub engine_type: EngineType,
    pub category: ModelCategory,
    pub is_premium: bool,
}
