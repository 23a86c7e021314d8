//! Shared configuration for the sidepanel tools.
//!
//! TOML file with per-profile preference locations and feature overrides,
//! layered with `SIDEPANEL_` environment variables, and translation to
//! `sidepanel_core::RuntimeConfig`. The CLI adds `GlobalOpts`-aware
//! wrappers on top.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use sidepanel_core::{FeatureList, FeatureOverride, RuntimeConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Feature overrides keyed by feature name.
    #[serde(default)]
    pub features: BTreeMap<String, FeatureOverride>,

    /// Named browser profiles.
    #[serde(default)]
    pub profiles: HashMap<String, ProfileConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some(DEFAULT_PROFILE.into()),
            defaults: Defaults::default(),
            features: BTreeMap::new(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    /// Touch-optimized layout.
    #[serde(default)]
    pub touch_ui: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            touch_ui: false,
        }
    }
}

fn default_output() -> String {
    "table".into()
}

/// A named browser profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProfileConfig {
    /// Preferences file. Defaults to the profile's directory under the
    /// platform data dir.
    pub prefs_file: Option<PathBuf>,
}

pub const DEFAULT_PROFILE: &str = "default";

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "sidepanel", "sidepanel")
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback(".config").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Directory holding per-profile state.
pub fn data_dir() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback(".local/share"),
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

fn dirs_fallback(base: &str) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(base);
    p.push("sidepanel");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from `path` + environment.
///
/// Nested keys use a double underscore: `SIDEPANEL_DEFAULTS__TOUCH_UI=true`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SIDEPANEL_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to pretty TOML at `path`, creating parent dirs.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Resolution ──────────────────────────────────────────────────────

/// Preferences file for `profile_name`, explicit or derived.
pub fn prefs_path(profile_name: &str, cfg: &Config) -> PathBuf {
    cfg.profiles
        .get(profile_name)
        .and_then(|p| p.prefs_file.clone())
        .unwrap_or_else(|| {
            data_dir()
                .join("profiles")
                .join(profile_name)
                .join("prefs.json")
        })
}

/// Translate the file's defaults and feature table into core types.
pub fn runtime_config(cfg: &Config) -> RuntimeConfig {
    RuntimeConfig {
        touch_ui: cfg.defaults.touch_ui,
        features: FeatureList::new(cfg.features.clone()),
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        Jail::expect_with(|jail| {
            let cfg = load_config_from(&jail.directory().join("absent.toml"))
                .map_err(|e| e.to_string())?;
            assert_eq!(cfg, Config::default());
            Ok(())
        });
    }

    #[test]
    fn file_and_env_layers_merge() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                default_profile = "work"

                [features.HorizontalTabsUpdate]
                enabled = true

                [features.InlineContentAdServing.params]
                version = "5"

                [profiles.work]
                prefs_file = "/srv/work/prefs.json"
                "#,
            )?;
            jail.set_env("SIDEPANEL_DEFAULTS__TOUCH_UI", "true");

            let cfg = load_config_from(&jail.directory().join("config.toml"))
                .map_err(|e| e.to_string())?;
            assert_eq!(cfg.default_profile.as_deref(), Some("work"));
            assert!(cfg.defaults.touch_ui);
            assert_eq!(cfg.defaults.output, "table");
            assert_eq!(
                prefs_path("work", &cfg),
                PathBuf::from("/srv/work/prefs.json")
            );

            let runtime = runtime_config(&cfg);
            assert!(runtime.layout_context().horizontal_tabs_update);
            assert_eq!(
                sidepanel_core::features::INLINE_CONTENT_AD_SERVING_VERSION
                    .get(&runtime.features),
                5
            );
            Ok(())
        });
    }

    #[test]
    fn unknown_profile_prefs_live_under_data_dir() {
        let path = prefs_path("guest", &Config::default());
        assert!(path.ends_with("profiles/guest/prefs.json"));
    }

    #[test]
    fn save_then_load() {
        Jail::expect_with(|jail| {
            let path = jail.directory().join("nested/config.toml");
            let mut cfg = Config::default();
            cfg.defaults.output = "json".into();
            cfg.profiles.insert(
                "home".into(),
                ProfileConfig {
                    prefs_file: Some("/tmp/home.json".into()),
                },
            );

            save_config_to(&cfg, &path).map_err(|e| e.to_string())?;
            let loaded = load_config_from(&path).map_err(|e| e.to_string())?;
            assert_eq!(loaded, cfg);
            Ok(())
        });
    }
}
