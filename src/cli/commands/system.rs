use crate::cli::commands::CommandEntry;
use crate::cli::context::{CommandError, CommandResult, LoopControl, ShellContext};
use crate::cli::output;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit).with_aliases(&["quit"]),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first().map(|name| name.to_lowercase()) {
        let entry = context
            .entries()
            .iter()
            .find(|entry| entry.name == name || entry.aliases.iter().any(|alias| *alias == name));
        return match entry {
            Some(entry) => {
                output::section(entry.name);
                output::info(entry.description);
                output::info(format!("Usage: {}", entry.usage));
                Ok(LoopControl::Continue)
            }
            None => Err(CommandError::UnknownCommand(name)),
        };
    }

    output::section("Commands");
    let rows: Vec<(&str, String)> = context
        .entries()
        .iter()
        .map(|entry| (entry.usage, entry.description.to_string()))
        .collect();
    output::key_values(&rows);
    Ok(LoopControl::Continue)
}

fn cmd_exit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.running = false;
    Ok(LoopControl::Exit)
}
