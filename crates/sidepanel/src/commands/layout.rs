//! Layout constant lookup.

use serde::Serialize;
use strum::IntoEnumIterator;
use tabled::Tabled;

use sidepanel_config::Config;
use sidepanel_core::layout::{self, LayoutConstant, LayoutContext};

use super::Render;
use crate::cli::{GlobalOpts, LayoutArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct LayoutValue {
    name: String,
    /// Branded override; `None` when the brand leaves it to upstream.
    value: Option<i32>,
    /// Value after falling back to upstream. `None` for unknown names.
    effective: Option<i32>,
}

impl LayoutValue {
    fn lookup(name: &str, ctx: LayoutContext) -> Self {
        Self {
            name: name.to_owned(),
            value: layout::lookup_by_name(name, ctx),
            effective: name
                .parse::<LayoutConstant>()
                .ok()
                .map(|constant| layout::layout_constant(constant, ctx)),
        }
    }
}

#[derive(Tabled)]
struct LayoutRow {
    #[tabled(rename = "Constant")]
    name: String,
    #[tabled(rename = "Override")]
    value: String,
    #[tabled(rename = "Effective")]
    effective: String,
}

fn show(value: Option<i32>) -> String {
    value.map_or_else(|| "-".into(), |v| v.to_string())
}

impl From<&LayoutValue> for LayoutRow {
    fn from(v: &LayoutValue) -> Self {
        Self {
            name: v.name.clone(),
            value: show(v.value),
            effective: show(v.effective),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(
    args: &LayoutArgs,
    cfg: &Config,
    global: &GlobalOpts,
    render: &Render,
) -> Result<(), CliError> {
    let ctx = config::runtime_config(global, cfg).layout_context();

    let out = if let Some(ref name) = args.name {
        let value = LayoutValue::lookup(name, ctx);
        output::render_single(
            render.format,
            &value,
            |v| format!("{}: {}", v.name, show(v.value)),
            |v| show(v.value),
        )?
    } else {
        let values: Vec<LayoutValue> = LayoutConstant::iter()
            .map(|constant| LayoutValue::lookup(&constant.to_string(), ctx))
            .collect();
        output::render_list(render.format, &values, |v| LayoutRow::from(v), |v| {
            format!("{}={}", v.name, show(v.value))
        })?
    };
    render.print(&out);
    Ok(())
}
