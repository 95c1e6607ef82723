use crate::cli::commands::{require_args, CommandEntry};
use crate::cli::context::{CommandError, CommandResult, LoopControl, ShellContext};
use crate::cli::output;

const USAGE: &str = "config [show | set <key> <value> | save]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Show, change or persist preferences",
        USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().copied().unwrap_or("show") {
        "show" => {
            let config = &context.config;
            output::section("Configuration");
            output::key_values(&[
                ("locale", config.locale.clone()),
                ("currency", config.currency.clone()),
                (
                    "default_interest_rate_pct",
                    config.default_interest_rate_pct.to_string(),
                ),
                ("history_limit", config.history_limit.to_string()),
                ("file", context.config_manager.path().display().to_string()),
            ]);
        }
        "set" => {
            require_args(args, 3, USAGE)?;
            context.config.set(args[1], args[2])?;
            output::success(format!("{} updated.", args[1]));
        }
        "save" => {
            context.config_manager.save(&context.config)?;
            output::success("Configuration saved.");
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "Unknown config action `{}`. Usage: {}",
                other, USAGE
            )))
        }
    }
    Ok(LoopControl::Continue)
}
