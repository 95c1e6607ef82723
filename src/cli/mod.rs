//! Interactive and scripted shell over the savings and loan helpers.

pub mod commands;
pub mod context;
pub mod output;
mod shell;

pub use context::{CliError, CliMode, CommandError, LoopControl, ShellContext};
pub use shell::run_cli;
