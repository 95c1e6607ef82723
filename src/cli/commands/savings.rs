use std::path::Path;

use crate::cli::commands::{
    ledger::history_table, parse_count, parse_number, require_args, CommandEntry,
};
use crate::cli::context::{CommandError, CommandResult, LoopControl, ShellContext};
use crate::cli::output;
use crate::ledger::count_contribution_months;
use crate::savings::SavingsOverview;
use crate::simulation::{project_savings, SavingsProjection};
use crate::utils::persistence;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "savings",
            "Load a member's savings account from a JSON document",
            "savings <path>",
            cmd_savings,
        ),
        CommandEntry::new(
            "set-monthly",
            "Set the monthly contribution",
            "set-monthly <amount>",
            cmd_set_monthly,
        ),
        CommandEntry::new(
            "set-rate",
            "Set the monthly interest rate in percent",
            "set-rate <percent>",
            cmd_set_rate,
        ),
        CommandEntry::new(
            "projection",
            "Project compounded savings",
            "projection [monthly months rate]",
            cmd_projection,
        ),
        CommandEntry::new(
            "overview",
            "Summarize the member's savings",
            "overview",
            cmd_overview,
        ),
        CommandEntry::new(
            "contribute",
            "Post the monthly contribution for the next due month",
            "contribute",
            cmd_contribute,
        ),
        CommandEntry::new(
            "reset",
            "Clear the session ledger and savings balances",
            "reset",
            cmd_reset,
        ),
    ]
}

fn cmd_savings(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 1, "savings <path>")?;
    let account = persistence::load_savings_from_file(Path::new(args[0]))?;
    output::success(format!(
        "Savings loaded: {} per month at {}%.",
        context.money(account.monthly_contribution),
        account.interest_rate_pct
    ));
    context.savings = account;
    Ok(LoopControl::Continue)
}

fn cmd_set_monthly(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 1, "set-monthly <amount>")?;
    let amount = parse_number(args[0], "amount")?;
    if amount < 0.0 {
        return Err(CommandError::InvalidArguments(
            "Monthly contribution cannot be negative.".into(),
        ));
    }
    let rate = context.savings.interest_rate_pct;
    context.savings.configure(amount, rate);
    output::success(format!(
        "Monthly contribution set to {}.",
        context.money(context.savings.monthly_contribution)
    ));
    Ok(LoopControl::Continue)
}

fn cmd_set_rate(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 1, "set-rate <percent>")?;
    let rate = parse_number(args[0], "rate")?;
    if rate < 0.0 {
        return Err(CommandError::InvalidArguments(
            "Interest rate cannot be negative.".into(),
        ));
    }
    let amount = context.savings.monthly_contribution;
    context.savings.configure(amount, rate);
    output::success(format!("Monthly interest rate set to {}%.", rate));
    Ok(LoopControl::Continue)
}

fn print_projection(context: &ShellContext, projection: &SavingsProjection) {
    output::key_values(&[
        ("Total contributed", context.money(projection.total_contributed)),
        ("Total saved", context.money(projection.total_accumulated)),
        ("Interest earned", context.money(projection.interest_earned)),
    ]);
}

fn cmd_projection(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let projection = if args.is_empty() {
        let months = count_contribution_months(&context.transactions);
        project_savings(
            context.savings.monthly_contribution,
            u32::try_from(months).unwrap_or(u32::MAX),
            context.savings.interest_rate_pct,
        )
    } else {
        require_args(args, 3, "projection [monthly months rate]")?;
        project_savings(
            parse_number(args[0], "amount")?,
            parse_count(args[1], "months")?,
            parse_number(args[2], "rate")?,
        )
    };
    output::section("Projection");
    print_projection(context, &projection);
    Ok(LoopControl::Continue)
}

fn cmd_overview(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let overview = SavingsOverview::build(
        &context.savings,
        &context.transactions,
        context.clock.as_ref(),
        context.config.history_limit,
    );
    output::section("Savings overview");
    output::key_values(&[
        (
            "Monthly contribution",
            context.money(context.savings.monthly_contribution),
        ),
        (
            "Monthly rate",
            format!("{}%", context.savings.interest_rate_pct),
        ),
        ("Months contributed", overview.months_contributed.to_string()),
        ("Next due", overview.next_due.to_string()),
    ]);
    print_projection(context, &overview.projection);

    output::section("Recent activity");
    if overview.recent.is_empty() {
        output::info("No ledger records yet.");
    } else {
        println!("{}", history_table(context, &overview.recent));
    }
    Ok(LoopControl::Continue)
}

fn cmd_contribute(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let receipt = context
        .savings
        .post_contribution(&context.transactions, context.clock.as_ref())?;
    output::success(format!(
        "Contribution registered ({}). Balance: {}.",
        receipt.due,
        context.money(receipt.total_saved)
    ));
    context.transactions.push(receipt.transaction);
    Ok(LoopControl::Continue)
}

fn cmd_reset(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.transactions.clear();
    context.savings.reset();
    output::success("Member reset: ledger cleared and balances zeroed.");
    Ok(LoopControl::Continue)
}
