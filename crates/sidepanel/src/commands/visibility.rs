//! Assistant entry visibility: toggle, query, reset.
//!
//! Each command runs one settings page request through the handler and
//! commits the profile's preferences afterwards.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

use sidepanel_config::Config;
use sidepanel_core::visibility::TARGET_KIND;
use sidepanel_core::{
    AssistantSettingsHandler, BuiltInItemType, ModelCatalog, Outbound, Session, WebUiRequest,
};

use super::Render;
use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;
use crate::output;

const CLI_CALLBACK: &str = "cli";

#[derive(Serialize)]
struct VisibilityReport {
    item: BuiltInItemType,
    visible: bool,
    /// Whether the call changed the side panel.
    changed: bool,
}

fn open(
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<(Arc<Session>, AssistantSettingsHandler, UnboundedReceiver<Outbound>), CliError> {
    let session = config::open_session(global, cfg)?;
    let (handler, rx) =
        AssistantSettingsHandler::new(Arc::clone(&session), Arc::new(ModelCatalog::builtin()));
    Ok((session, handler, rx))
}

/// Ask the handler, as the page would, and pick the answer off the channel.
fn ask_visibility(
    handler: &AssistantSettingsHandler,
    rx: &mut UnboundedReceiver<Outbound>,
) -> Result<bool, CliError> {
    handler.handle(WebUiRequest::GetVisibility {
        callback_id: CLI_CALLBACK.into(),
    })?;
    let answer = std::iter::from_fn(|| rx.try_recv().ok()).find_map(|message| match message {
        Outbound::Resolve { callback_id, value } if callback_id == CLI_CALLBACK => Some(value),
        Outbound::Resolve { .. } | Outbound::Event { .. } => None,
    });
    let value =
        answer.ok_or_else(|| CliError::Internal("visibility request went unanswered".into()))?;
    value
        .as_bool()
        .ok_or_else(|| CliError::Internal(format!("visibility answer is not a boolean: {value}")))
}

/// Pushes received since the last drain.
fn drain_pushes(rx: &mut UnboundedReceiver<Outbound>) -> usize {
    let mut count = 0;
    while let Ok(message) = rx.try_recv() {
        debug!(?message, "push");
        if matches!(message, Outbound::Event { .. }) {
            count += 1;
        }
    }
    count
}

fn print_report(render: &Render, report: &VisibilityReport) -> Result<(), CliError> {
    let out = output::render_single(
        render.format,
        report,
        |r| {
            format!(
                "{}: visible {}",
                r.item.default_title(),
                output::yes_no(r.visible, render.color)
            )
        },
        |r| r.visible.to_string(),
    )?;
    render.print(&out);
    Ok(())
}

// ── Handlers ─────────────────────────────────────────────────────────

pub fn toggle(cfg: &Config, global: &GlobalOpts, render: &Render) -> Result<(), CliError> {
    let (session, handler, mut rx) = open(cfg, global)?;

    handler.handle(WebUiRequest::ToggleVisibility)?;
    let changed = drain_pushes(&mut rx) > 0;
    session.prefs().commit()?;

    let visible = ask_visibility(&handler, &mut rx)?;
    print_report(
        render,
        &VisibilityReport {
            item: TARGET_KIND,
            visible,
            changed,
        },
    )
}

pub fn query(cfg: &Config, global: &GlobalOpts, render: &Render) -> Result<(), CliError> {
    let (_session, handler, mut rx) = open(cfg, global)?;
    let visible = ask_visibility(&handler, &mut rx)?;
    print_report(
        render,
        &VisibilityReport {
            item: TARGET_KIND,
            visible,
            changed: false,
        },
    )
}

pub fn reset(cfg: &Config, global: &GlobalOpts, render: &Render) -> Result<(), CliError> {
    let (session, handler, mut rx) = open(cfg, global)?;

    // Arm first so a reveal shows up as a push
    handler.handle(WebUiRequest::PageReady)?;
    handler.handle(WebUiRequest::Reset)?;
    let changed = drain_pushes(&mut rx) > 0;
    session.prefs().commit()?;

    let visible = ask_visibility(&handler, &mut rx)?;
    print_report(
        render,
        &VisibilityReport {
            item: TARGET_KIND,
            visible,
            changed,
        },
    )
}
