//! `GlobalOpts`-aware wrappers over `sidepanel_config`.

use std::path::PathBuf;
use std::sync::Arc;

use clap::ValueEnum;
use tracing::{debug, warn};

use sidepanel_config::Config;
use sidepanel_core::{PrefService, RuntimeConfig, Session};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Config file in effect: `--config` or the platform default.
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(sidepanel_config::config_path)
}

pub fn load_config(global: &GlobalOpts) -> Result<Config, CliError> {
    let path = config_path(global);
    debug!(path = %path.display(), "loading config");
    Ok(sidepanel_config::load_config_from(&path)?)
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| sidepanel_config::DEFAULT_PROFILE.into())
}

/// Flag > `defaults.output` > table.
pub fn output_format(global: &GlobalOpts, cfg: &Config) -> OutputFormat {
    global.output.unwrap_or_else(|| {
        OutputFormat::from_str(&cfg.defaults.output, true).unwrap_or_else(|_| {
            warn!(output = %cfg.defaults.output, "unknown output format in config, using table");
            OutputFormat::Table
        })
    })
}

/// Runtime settings with `--touch` layered over the config file.
pub fn runtime_config(global: &GlobalOpts, cfg: &Config) -> RuntimeConfig {
    let mut runtime = sidepanel_config::runtime_config(cfg);
    runtime.touch_ui |= global.touch;
    runtime
}

pub fn prefs_path(global: &GlobalOpts, cfg: &Config) -> PathBuf {
    global.prefs.clone().unwrap_or_else(|| {
        sidepanel_config::prefs_path(&active_profile_name(global, cfg), cfg)
    })
}

/// Load the profile's preferences and restore its side panel layout.
pub fn open_session(global: &GlobalOpts, cfg: &Config) -> Result<Arc<Session>, CliError> {
    let path = prefs_path(global, cfg);
    debug!(prefs = %path.display(), "opening profile");
    let prefs = Arc::new(PrefService::load(path)?);
    Ok(Arc::new(Session::open(prefs)?))
}
