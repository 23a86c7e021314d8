//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use sidepanel_config::ConfigError;
use sidepanel_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Side panel state ─────────────────────────────────────────────
    #[error("Side panel layout rejected the change: {message}")]
    #[diagnostic(
        code(sidepanel::registry),
        help("The stored layout may list an entry twice. Inspect it with: sidepanel config show")
    )]
    Registry { message: String },

    #[error("Preferences error: {message}")]
    #[diagnostic(
        code(sidepanel::prefs),
        help("Check the preferences file, or point at another one with --prefs.")
    )]
    Prefs { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(sidepanel::not_found),
        help("Run: sidepanel {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(sidepanel::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(sidepanel::config))]
    Config(Box<figment::Error>),

    #[error("Failed to write configuration: {0}")]
    #[diagnostic(code(sidepanel::config_write))]
    ConfigWrite(#[from] toml::ser::Error),

    // ── Internal ─────────────────────────────────────────────────────
    #[error("Internal error: {0}")]
    #[diagnostic(code(sidepanel::internal))]
    Internal(String),

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    #[diagnostic(code(sidepanel::json))]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    #[diagnostic(code(sidepanel::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Figment(e) => Self::Config(e),
            ConfigError::Serialization(e) => Self::ConfigWrite(e),
            ConfigError::Io(e) => Self::Io(e),
        }
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Registry { .. } => exit_code::CONFLICT,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Registry(e) => CliError::Registry {
                message: e.to_string(),
            },

            CoreError::Prefs(e) => CliError::Prefs {
                message: e.to_string(),
            },

            CoreError::InvalidMessage { message } => CliError::Validation {
                field: "message".into(),
                reason: message,
            },

            CoreError::UnknownModel { key } => CliError::NotFound {
                resource_type: "model".into(),
                identifier: key,
                list_command: "models".into(),
            },

            CoreError::Serialization(e) => CliError::Json(e),

            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

impl From<sidepanel_core::PrefError> for CliError {
    fn from(err: sidepanel_core::PrefError) -> Self {
        CoreError::from(err).into()
    }
}

impl From<sidepanel_core::RegistryError> for CliError {
    fn from(err: sidepanel_core::RegistryError) -> Self {
        CoreError::from(err).into()
    }
}
