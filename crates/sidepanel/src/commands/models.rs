//! Assistant model listing.

use tabled::Tabled;

use sidepanel_core::{EngineType, ModelCatalog, ModelDescriptor};

use super::Render;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ModelRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Name")]
    display_name: String,
    #[tabled(rename = "Maker")]
    maker: String,
    #[tabled(rename = "Engine")]
    engine: &'static str,
    #[tabled(rename = "Premium")]
    premium: String,
}

impl ModelRow {
    fn new(m: &ModelDescriptor, color: bool) -> Self {
        Self {
            key: m.key.clone(),
            display_name: m.display_name.clone(),
            maker: m.display_maker.clone(),
            engine: match m.engine_type {
                EngineType::LlamaRemote => "llama (remote)",
                EngineType::ClaudeRemote => "claude (remote)",
            },
            premium: output::yes_no(m.is_premium, color),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(render: &Render) -> Result<(), CliError> {
    let models = ModelCatalog::builtin().list();
    let out = output::render_list(
        render.format,
        &models,
        |m| ModelRow::new(m, render.color),
        |m| m.key.clone(),
    )?;
    render.print(&out);
    Ok(())
}
