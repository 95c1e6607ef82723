pub mod config;
pub mod ledger;
pub mod loans;
pub mod savings;
pub mod system;

use chrono::NaiveDate;

use crate::cli::context::{CommandError, CommandResult, ShellContext};

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

#[derive(Clone)]
pub struct CommandEntry {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            aliases: &[],
            description,
            usage,
            handler,
        }
    }

    pub const fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }
}

pub(crate) fn registry() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(system::definitions());
    commands.extend(ledger::definitions());
    commands.extend(savings::definitions());
    commands.extend(loans::definitions());
    commands.extend(config::definitions());
    commands
}

pub(crate) fn require_args(args: &[&str], count: usize, usage: &str) -> Result<(), CommandError> {
    if args.len() < count {
        return Err(CommandError::InvalidArguments(format!("Usage: {}", usage)));
    }
    Ok(())
}

pub(crate) fn parse_number(raw: &str, label: &str) -> Result<f64, CommandError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CommandError::InvalidArguments(format!("Invalid {}: `{}`", label, raw)))
}

pub(crate) fn parse_count(raw: &str, label: &str) -> Result<u32, CommandError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| CommandError::InvalidArguments(format!("Invalid {}: `{}`", label, raw)))
}

pub(crate) fn parse_id(raw: &str) -> Result<i64, CommandError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| CommandError::InvalidArguments(format!("Invalid loan id: `{}`", raw)))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("Invalid date `{}` (expected YYYY-MM-DD)", raw))
    })
}
