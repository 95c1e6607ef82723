use std::path::PathBuf;

use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;

use super::commands::{self, CommandEntry};
use super::output;
use crate::{
    config::{Config, ConfigManager},
    core::time::{Clock, SystemClock},
    currency::format_currency_value,
    errors::NatilleraError,
    ledger::Transaction,
    savings::SavingsAccount,
};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Line editor error: {0}")]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Core(#[from] NatilleraError),
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("Unknown command `{0}`")]
    UnknownCommand(String),
    #[error(transparent)]
    Core(#[from] NatilleraError),
}

pub type CommandResult = Result<LoopControl, CommandError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Session state for one shell: the loaded ledger, the member's savings
/// account and the active configuration.
pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) config: Config,
    pub(crate) config_manager: ConfigManager,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) savings: SavingsAccount,
    pub(crate) ledger_path: Option<PathBuf>,
    pub(crate) running: bool,
    registry: Vec<CommandEntry>,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        Ok(Self::with_parts(
            mode,
            config,
            config_manager,
            Box::new(SystemClock),
        ))
    }

    pub fn with_parts(
        mode: CliMode,
        config: Config,
        config_manager: ConfigManager,
        clock: Box<dyn Clock>,
    ) -> Self {
        output::set_preferences(output::OutputPreferences {
            plain: mode == CliMode::Script,
        });
        let savings = SavingsAccount::new(0.0, config.default_interest_rate_pct);
        Self {
            mode,
            config,
            config_manager,
            clock,
            transactions: Vec::new(),
            savings,
            ledger_path: None,
            running: true,
            registry: commands::registry(),
        }
    }

    pub fn mode(&self) -> CliMode {
        self.mode
    }

    pub fn prompt(&self) -> String {
        match &self.ledger_path {
            Some(path) => {
                let name = path
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .unwrap_or("ledger");
                format!("natillera [{}]> ", name)
            }
            None => "natillera> ".to_string(),
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.iter().map(|entry| entry.name).collect()
    }

    pub(crate) fn entries(&self) -> &[CommandEntry] {
        &self.registry
    }

    pub(crate) fn money(&self, value: f64) -> String {
        format_currency_value(value, &self.config.locale_config())
    }

    pub fn dispatch(&mut self, command: &str, args: &[&str]) -> CommandResult {
        let handler = self
            .registry
            .iter()
            .find(|entry| {
                entry.name == command || entry.aliases.iter().any(|alias| *alias == command)
            })
            .map(|entry| entry.handler);
        match handler {
            Some(handler) => {
                tracing::debug!(command, ?args, "dispatching command");
                handler(self, args)
            }
            None => Err(CommandError::UnknownCommand(command.to_string())),
        }
    }

    fn suggest(&self, input: &str) {
        let mut suggestions: Vec<_> = self
            .registry
            .iter()
            .map(|entry| (levenshtein(entry.name, input), entry.name))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                output::hint(format!("Did you mean `{}`?", best));
            }
        }
    }

    pub fn report_error(&self, err: CommandError) {
        match err {
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::UnknownCommand(name) => {
                output::error(format!("Unknown command `{}`.", name));
                self.suggest(&name);
            }
            CommandError::Core(err) => output::error(err),
        }
    }
}
