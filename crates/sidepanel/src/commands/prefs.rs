//! Profile preference listing.

use serde::Serialize;
use serde_json::Value;
use tabled::Tabled;

use sidepanel_config::Config;

use super::Render;
use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct PrefEntry {
    name: String,
    value: Value,
    user_set: bool,
}

#[derive(Tabled)]
struct PrefRow {
    #[tabled(rename = "Preference")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Set")]
    user_set: String,
}

pub fn handle(cfg: &Config, global: &GlobalOpts, render: &Render) -> Result<(), CliError> {
    let session = config::open_session(global, cfg)?;
    let prefs = session.prefs();

    let entries: Vec<PrefEntry> = prefs
        .values()
        .into_iter()
        .map(|(name, value)| PrefEntry {
            user_set: prefs.has_user_value(&name),
            name,
            value,
        })
        .collect();

    let out = output::render_list(
        render.format,
        &entries,
        |e| PrefRow {
            name: e.name.clone(),
            value: e.value.to_string(),
            user_set: output::yes_no(e.user_set, render.color),
        },
        |e| format!("{}={}", e.name, e.value),
    )?;
    render.print(&out);
    Ok(())
}
