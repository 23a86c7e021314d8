//! Feature flag listing.

use std::collections::BTreeMap;

use serde::Serialize;
use tabled::Tabled;

use sidepanel_config::Config;
use sidepanel_core::features::{INLINE_CONTENT_AD_SERVING_VERSION, declared_features};

use super::Render;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct FeatureStatus {
    name: &'static str,
    enabled: bool,
    enabled_by_default: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    params: BTreeMap<&'static str, String>,
}

#[derive(Tabled)]
struct FeatureRow {
    #[tabled(rename = "Feature")]
    name: &'static str,
    #[tabled(rename = "Enabled")]
    enabled: String,
    #[tabled(rename = "Default")]
    default: String,
    #[tabled(rename = "Params")]
    params: String,
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(cfg: &Config, render: &Render) -> Result<(), CliError> {
    let features = sidepanel_config::runtime_config(cfg).features;
    let version = &INLINE_CONTENT_AD_SERVING_VERSION;

    let statuses: Vec<FeatureStatus> = declared_features()
        .into_iter()
        .map(|feature| FeatureStatus {
            name: feature.name,
            enabled: features.is_enabled(feature),
            enabled_by_default: feature.default_state
                == sidepanel_core::FeatureState::EnabledByDefault,
            params: if std::ptr::eq(feature, version.feature) {
                BTreeMap::from([(version.name, version.get(&features).to_string())])
            } else {
                BTreeMap::new()
            },
        })
        .collect();

    let out = output::render_list(
        render.format,
        &statuses,
        |s| FeatureRow {
            name: s.name,
            enabled: output::yes_no(s.enabled, render.color),
            default: output::yes_no(s.enabled_by_default, false),
            params: s
                .params
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join(", "),
        },
        |s| format!("{}={}", s.name, s.enabled),
    )?;
    render.print(&out);
    Ok(())
}
