//! Command dispatch: bridges CLI args -> core operations -> output formatting.

pub mod config_cmd;
pub mod features;
pub mod layout;
pub mod models;
pub mod prefs;
pub mod serve;
pub mod visibility;

use sidepanel_config::Config;

use crate::cli::{Command, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

/// Output settings shared by every handler.
pub struct Render {
    pub format: OutputFormat,
    pub color: bool,
    pub quiet: bool,
}

impl Render {
    fn new(global: &GlobalOpts, cfg: &Config) -> Self {
        Self {
            format: config::output_format(global, cfg),
            color: output::should_color(global.color),
            quiet: global.quiet,
        }
    }

    pub fn print(&self, rendered: &str) {
        output::print_output(rendered, self.quiet);
    }
}

/// Dispatch a profile-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let render = Render::new(global, cfg);
    match cmd {
        Command::Toggle => visibility::toggle(cfg, global, &render),
        Command::Visibility => visibility::query(cfg, global, &render),
        Command::Reset => visibility::reset(cfg, global, &render),
        Command::Models => models::handle(&render),
        Command::Layout(args) => layout::handle(&args, cfg, global, &render),
        Command::Features => features::handle(cfg, &render),
        Command::Prefs => prefs::handle(cfg, global, &render),
        Command::Serve => serve::handle(cfg, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
