//! Settings page protocol over stdio.
//!
//! Reads one JSON request per line from stdin and writes every answer and
//! push the handler produces as one JSON line on stdout. The page starts
//! disarmed: pushes are dropped until it sends `page-ready` or a request
//! that arms it.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};

use sidepanel_config::Config;
use sidepanel_core::{AssistantSettingsHandler, ModelCatalog, Outbound, WebUiRequest};

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;

async fn flush_outbound(
    rx: &mut UnboundedReceiver<Outbound>,
    stdout: &mut Stdout,
) -> Result<(), CliError> {
    while let Ok(message) = rx.try_recv() {
        let mut encoded = serde_json::to_vec(&message)?;
        encoded.push(b'\n');
        stdout.write_all(&encoded).await?;
    }
    stdout.flush().await?;
    Ok(())
}

pub async fn handle(cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let session = config::open_session(global, cfg)?;
    let (handler, mut rx) =
        AssistantSettingsHandler::new(Arc::clone(&session), Arc::new(ModelCatalog::builtin()));

    let mut channel_state = handler.visibility().channel().watch_state();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    info!("serving settings requests on stdin");

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            Ok(()) = channel_state.changed() => {
                debug!(state = ?*channel_state.borrow_and_update(), "page channel state changed");
                continue;
            }
            _ = tokio::signal::ctrl_c() => {
                debug!("interrupted");
                None
            }
        };
        let Some(line) = line else { break };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match WebUiRequest::parse(line) {
            Ok(request) => {
                let mutates = matches!(request, WebUiRequest::ToggleVisibility | WebUiRequest::Reset);
                if let Err(err) = handler.handle(request) {
                    warn!(error = %err, "request failed");
                }
                if mutates {
                    session.prefs().commit()?;
                }
            }
            Err(err) => warn!(error = %err, "ignoring malformed request"),
        }
        flush_outbound(&mut rx, &mut stdout).await?;
    }

    session.prefs().commit()?;
    info!("settings page closed");
    Ok(())
}
