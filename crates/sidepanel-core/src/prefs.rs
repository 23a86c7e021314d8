// ── Preference store ──
//
// Registered defaults plus user overrides, optionally backed by a JSON
// file. Values are plain `serde_json::Value`s; a registered default fixes
// the type a user value must have.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::PrefError;

/// Names of every preference the side panel and assistant settings use.
pub mod names {
    /// When the user last accepted the assistant disclaimer (RFC 3339).
    pub const LAST_ACCEPTED_DISCLAIMER: &str = "assistant.last_accepted_disclaimer";
    /// Whether the assistant suggests follow-up questions on its own.
    pub const AUTO_GENERATE_QUESTIONS: &str = "assistant.auto_generate_questions";
    /// Visible side panel items, as kebab-case kinds in panel order.
    pub const SIDEBAR_VISIBLE_ITEMS: &str = "sidebar.visible_items";
    /// Hidden built-in side panel items, as kebab-case kinds.
    pub const SIDEBAR_HIDDEN_ITEMS: &str = "sidebar.hidden_items";
}

/// Key/value preference store for one profile.
#[derive(Debug)]
pub struct PrefService {
    defaults: BTreeMap<String, Value>,
    user: RwLock<BTreeMap<String, Value>>,
    path: Option<PathBuf>,
}

impl PrefService {
    /// An in-memory store with the profile preferences registered.
    pub fn in_memory() -> Self {
        let mut prefs = Self::empty(None);
        prefs.register_profile_prefs();
        prefs
    }

    /// Load user values from `path`, registering the profile preferences.
    ///
    /// A missing file yields an empty store that will be created on the
    /// first [`commit`](Self::commit).
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, PrefError> {
        let path = path.into();
        let mut prefs = Self::empty(Some(path.clone()));
        prefs.register_profile_prefs();

        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no preferences file yet");
                return Ok(prefs);
            }
            Err(source) => return Err(PrefError::Read { path, source }),
        };

        let values: BTreeMap<String, Value> = serde_json::from_str(&raw)
            .map_err(|source| PrefError::Corrupt {
                path: path.clone(),
                source,
            })?;

        let user = prefs.user.get_mut().unwrap_or_else(PoisonError::into_inner);
        for (name, value) in values {
            if prefs.defaults.contains_key(&name) {
                user.insert(name, value);
            } else {
                warn!(pref = %name, "ignoring unregistered preference from disk");
            }
        }
        Ok(prefs)
    }

    fn empty(path: Option<PathBuf>) -> Self {
        Self {
            defaults: BTreeMap::new(),
            user: RwLock::new(BTreeMap::new()),
            path,
        }
    }

    fn register_profile_prefs(&mut self) {
        self.register(names::LAST_ACCEPTED_DISCLAIMER, Value::Null);
        self.register(names::AUTO_GENERATE_QUESTIONS, Value::Bool(true));
        self.register(names::SIDEBAR_VISIBLE_ITEMS, Value::Null);
        self.register(names::SIDEBAR_HIDDEN_ITEMS, Value::Null);
    }

    /// Register `name` with its default value. A non-null default pins the
    /// JSON type of later user values.
    pub fn register(&mut self, name: &str, default: Value) {
        self.defaults.insert(name.to_owned(), default);
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Effective value: the user value if set, otherwise the default.
    pub fn get(&self, name: &str) -> Result<Value, PrefError> {
        let default = self.default_for(name)?;
        Ok(self
            .user()
            .get(name)
            .cloned()
            .unwrap_or_else(|| default.clone()))
    }

    pub fn get_bool(&self, name: &str) -> Result<bool, PrefError> {
        match self.get(name)? {
            Value::Bool(b) => Ok(b),
            other => Err(PrefError::TypeMismatch {
                name: name.to_owned(),
                expected: "boolean",
                found: json_type(&other).to_owned(),
            }),
        }
    }

    pub fn has_user_value(&self, name: &str) -> bool {
        self.user().contains_key(name)
    }

    /// Every registered preference with its effective value.
    pub fn values(&self) -> BTreeMap<String, Value> {
        let user = self.user();
        self.defaults
            .iter()
            .map(|(name, default)| {
                let value = user.get(name).unwrap_or(default).clone();
                (name.clone(), value)
            })
            .collect()
    }

    /// Only the values the user has set.
    pub fn user_values(&self) -> BTreeMap<String, Value> {
        self.user().clone()
    }

    // ── Writes ───────────────────────────────────────────────────────

    pub fn set_value(&self, name: &str, value: Value) -> Result<(), PrefError> {
        let default = self.default_for(name)?;
        if !default.is_null() && json_type(default) != json_type(&value) {
            return Err(PrefError::TypeMismatch {
                name: name.to_owned(),
                expected: json_type(default),
                found: json_type(&value).to_owned(),
            });
        }
        debug!(pref = name, %value, "preference set");
        self.user_mut().insert(name.to_owned(), value);
        Ok(())
    }

    pub fn set_boolean(&self, name: &str, value: bool) -> Result<(), PrefError> {
        self.set_value(name, Value::Bool(value))
    }

    /// Drop the user value so the default applies again.
    pub fn clear_pref(&self, name: &str) -> Result<(), PrefError> {
        self.default_for(name)?;
        if self.user_mut().remove(name).is_some() {
            debug!(pref = name, "preference cleared");
        }
        Ok(())
    }

    /// Persist user values to the backing file, if there is one.
    ///
    /// Writes a sibling temp file and renames it over the target so a
    /// crash never leaves a truncated file behind.
    pub fn commit(&self) -> Result<(), PrefError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };

        let body = serde_json::to_string_pretty(&self.user_values())?;
        let write_err = |source| PrefError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, body).map_err(write_err)?;
        std::fs::rename(&tmp, path).map_err(write_err)?;

        debug!(path = %path.display(), "preferences committed");
        Ok(())
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn default_for(&self, name: &str) -> Result<&Value, PrefError> {
        self.defaults
            .get(name)
            .ok_or_else(|| PrefError::Unregistered {
                name: name.to_owned(),
            })
    }

    fn user(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<String, Value>> {
        self.user.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn user_mut(&self) -> std::sync::RwLockWriteGuard<'_, BTreeMap<String, Value>> {
        self.user.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for PrefService {
    fn default() -> Self {
        Self::in_memory()
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn defaults_apply_until_set() {
        let prefs = PrefService::in_memory();
        assert!(prefs.get_bool(names::AUTO_GENERATE_QUESTIONS).unwrap());
        assert!(!prefs.has_user_value(names::AUTO_GENERATE_QUESTIONS));

        prefs.set_boolean(names::AUTO_GENERATE_QUESTIONS, false).unwrap();
        assert!(!prefs.get_bool(names::AUTO_GENERATE_QUESTIONS).unwrap());
        assert!(prefs.has_user_value(names::AUTO_GENERATE_QUESTIONS));
    }

    #[test]
    fn clear_restores_default() {
        let prefs = PrefService::in_memory();
        prefs
            .set_value(names::LAST_ACCEPTED_DISCLAIMER, json!("2024-01-02T03:04:05Z"))
            .unwrap();
        prefs.clear_pref(names::LAST_ACCEPTED_DISCLAIMER).unwrap();
        assert_eq!(prefs.get(names::LAST_ACCEPTED_DISCLAIMER).unwrap(), Value::Null);
        assert!(!prefs.has_user_value(names::LAST_ACCEPTED_DISCLAIMER));
    }

    #[test]
    fn unregistered_names_are_rejected() {
        let prefs = PrefService::in_memory();
        assert!(matches!(
            prefs.set_boolean("nope", true),
            Err(PrefError::Unregistered { .. })
        ));
        assert!(matches!(prefs.clear_pref("nope"), Err(PrefError::Unregistered { .. })));
    }

    #[test]
    fn typed_default_pins_value_type() {
        let prefs = PrefService::in_memory();
        let err = prefs
            .set_value(names::AUTO_GENERATE_QUESTIONS, json!("yes"))
            .unwrap_err();
        assert!(matches!(err, PrefError::TypeMismatch { expected: "boolean", .. }));
    }

    #[test]
    fn commit_and_load_preserve_user_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile").join("prefs.json");

        let prefs = PrefService::load(&path).unwrap();
        prefs.set_boolean(names::AUTO_GENERATE_QUESTIONS, false).unwrap();
        prefs
            .set_value(names::SIDEBAR_HIDDEN_ITEMS, json!(["chat-ui"]))
            .unwrap();
        prefs.commit().unwrap();

        let reloaded = PrefService::load(&path).unwrap();
        assert_eq!(reloaded.user_values(), prefs.user_values());
        assert!(!reloaded.get_bool(names::AUTO_GENERATE_QUESTIONS).unwrap());
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(PrefService::load(&path), Err(PrefError::Corrupt { .. })));
    }

    #[test]
    fn values_merge_defaults_and_user() {
        let prefs = PrefService::in_memory();
        prefs.set_boolean(names::AUTO_GENERATE_QUESTIONS, false).unwrap();
        let values = prefs.values();
        assert_eq!(values[names::AUTO_GENERATE_QUESTIONS], json!(false));
        assert_eq!(values[names::LAST_ACCEPTED_DISCLAIMER], Value::Null);
    }
}
