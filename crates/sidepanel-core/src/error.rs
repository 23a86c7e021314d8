// ── Core error types ──
//
// Failures surfaced by the registry, the preference store, and the
// settings handler. Expected non-events (target item missing, push while
// the page isn't ready) are NOT errors -- they are silent no-ops.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::BuiltInItemType;

/// Structural violations rejected by the side panel registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("item '{kind}' is already visible")]
    AlreadyVisible { kind: BuiltInItemType },

    #[error("item '{kind}' is registered more than once")]
    DuplicateItem { kind: BuiltInItemType },

    #[error("no visible item at index {index} (panel has {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Preference store failures.
#[derive(Debug, Error)]
pub enum PrefError {
    #[error("preference '{name}' is not registered")]
    Unregistered { name: String },

    #[error("preference '{name}' holds {found}, expected {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: String,
    },

    #[error("failed to read preferences from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write preferences to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("preferences file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize preferences: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Collaborator errors ──────────────────────────────────────────
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Prefs(#[from] PrefError),

    // ── Message surface ──────────────────────────────────────────────
    #[error("Invalid settings message: {message}")]
    InvalidMessage { message: String },

    // ── Catalog ──────────────────────────────────────────────────────
    #[error("Model not found: {key}")]
    UnknownModel { key: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
