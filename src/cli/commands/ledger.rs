use std::path::PathBuf;

use crate::cli::commands::{parse_count, require_args, CommandEntry};
use crate::cli::context::{CommandError, CommandResult, LoopControl, ShellContext};
use crate::cli::output;
use crate::ledger::{count_contribution_months, next_due_month, sort_newest_first, Transaction};
use crate::utils::persistence;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "load",
            "Load ledger records from a JSON export",
            "load <path>",
            cmd_load,
        ),
        CommandEntry::new(
            "save",
            "Write the session ledger to disk",
            "save [path]",
            cmd_save,
        ),
        CommandEntry::new(
            "history",
            "List ledger records, newest first",
            "history [limit]",
            cmd_history,
        ),
        CommandEntry::new(
            "months",
            "Count distinct months with contributions",
            "months",
            cmd_months,
        ),
        CommandEntry::new(
            "next",
            "Show the month the next contribution is due",
            "next",
            cmd_next,
        ),
    ]
}

fn cmd_load(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 1, "load <path>")?;
    let path = PathBuf::from(args[0]);
    let transactions = persistence::load_transactions_from_file(&path)?;
    output::success(format!(
        "Loaded {} records from {}.",
        transactions.len(),
        path.display()
    ));
    context.transactions = transactions;
    context.ledger_path = Some(path);
    Ok(LoopControl::Continue)
}

fn cmd_save(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = match args.first() {
        Some(raw) => PathBuf::from(raw),
        None => context.ledger_path.clone().ok_or_else(|| {
            CommandError::InvalidArguments("No ledger file loaded; use `save <path>`.".into())
        })?,
    };
    persistence::save_transactions_to_file(&context.transactions, &path)?;
    output::success(format!(
        "Saved {} records to {}.",
        context.transactions.len(),
        path.display()
    ));
    context.ledger_path = Some(path);
    Ok(LoopControl::Continue)
}

fn cmd_history(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let limit = match args.first() {
        Some(raw) => parse_count(raw, "limit")? as usize,
        None => context.config.history_limit,
    };

    if context.transactions.is_empty() {
        output::info("No ledger records yet.");
        return Ok(LoopControl::Continue);
    }

    let sorted = sort_newest_first(&context.transactions);
    let shown = &sorted[..limit.min(sorted.len())];
    println!("{}", history_table(context, shown));
    Ok(LoopControl::Continue)
}

/// Date, detail and amount columns for ledger records, in the given order.
pub(crate) fn history_table(context: &ShellContext, transactions: &[Transaction]) -> String {
    let rows: Vec<Vec<String>> = transactions
        .iter()
        .map(|txn| {
            let date: String = txn
                .timestamp
                .as_deref()
                .map(|raw| raw.chars().take(10).collect())
                .filter(|raw: &String| !raw.is_empty())
                .unwrap_or_else(|| "-".into());
            let detail = if !txn.description.is_empty() {
                txn.description.clone()
            } else if !txn.kind.is_empty() {
                txn.kind.clone()
            } else {
                "-".into()
            };
            vec![date, detail, context.money(txn.amount)]
        })
        .collect();
    output::render_table(&["Fecha", "Detalle", "Monto"], &rows)
}

fn cmd_months(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let months = count_contribution_months(&context.transactions);
    output::info(format!("Months contributed: {}", months));
    Ok(LoopControl::Continue)
}

fn cmd_next(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let due = next_due_month(&context.transactions, context.clock.as_ref());
    output::info(format!("Next contribution due: {}", due));
    Ok(LoopControl::Continue)
}
