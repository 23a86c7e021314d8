//! Config subcommand handlers.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path(global).display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config(global)?;
            let profile = config::active_profile_name(global, &cfg);

            let mut out = toml::to_string_pretty(&cfg)?;
            out.push_str(&format!(
                "\n# active profile: {profile}\n# preferences: {}\n",
                config::prefs_path(global, &cfg).display()
            ));
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Init => {
            let path = config::config_path(global);
            if path.exists() {
                return Err(CliError::Validation {
                    field: "config".into(),
                    reason: format!("{} already exists", path.display()),
                });
            }
            let cfg = config::load_config(global)?;
            sidepanel_config::save_config_to(&cfg, &path)?;
            if !global.quiet {
                eprintln!("Wrote {}", path.display());
            }
            Ok(())
        }
    }
}
