use crate::cli::commands::{
    parse_count, parse_date, parse_id, parse_number, require_args, CommandEntry,
};
use crate::cli::context::{CommandError, CommandResult, LoopControl, ShellContext};
use crate::cli::output;
use crate::loans::{loan_payments, LoanPosition, LoanQuote, PaymentPlan};

const PLAN_USAGE: &str = "loan-plan <loan-id> <principal> <interest> <months> <start YYYY-MM-DD>";
const PAY_USAGE: &str = "loan-pay <loan-id> <total> <months> [amount]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "loan-quote",
            "Quote a loan with simple monthly interest",
            "loan-quote <principal> <rate> <months> [start YYYY-MM-DD]",
            cmd_loan_quote,
        ),
        CommandEntry::new(
            "loan-plan",
            "Show a loan's installment plan against recorded payments",
            PLAN_USAGE,
            cmd_loan_plan,
        ),
        CommandEntry::new(
            "loan-pay",
            "Register a loan payment (one installment by default)",
            PAY_USAGE,
            cmd_loan_pay,
        ),
    ]
}

fn cmd_loan_quote(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(
        args,
        3,
        "loan-quote <principal> <rate> <months> [start YYYY-MM-DD]",
    )?;
    let principal = parse_number(args[0], "principal")?;
    let rate = parse_number(args[1], "rate")?;
    let months = parse_count(args[2], "months")?;
    let start = match args.get(3) {
        Some(raw) => parse_date(raw)?,
        None => context.clock.today(),
    };

    let quote = LoanQuote::new(principal, rate, months, start)?;
    output::section("Loan quote");
    output::key_values(&[
        ("Principal", context.money(quote.principal)),
        ("Total interest", context.money(quote.total_interest)),
        ("Total", context.money(quote.total)),
        ("Installment", context.money(quote.installment)),
        ("Due date", quote.due_date.to_string()),
    ]);
    Ok(LoopControl::Continue)
}

fn cmd_loan_plan(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 5, PLAN_USAGE)?;
    let loan_id = parse_id(args[0])?;
    let principal = parse_number(args[1], "principal")?;
    let interest = parse_number(args[2], "interest")?;
    let months = parse_count(args[3], "months")?;
    let start = parse_date(args[4])?;

    let payments = loan_payments(&context.transactions, loan_id);
    let plan = PaymentPlan::build(principal, interest, months, start, &payments).ok_or_else(
        || CommandError::InvalidArguments("Loan term must be at least one month.".into()),
    )?;

    output::section(format!("Loan {} plan", loan_id));
    output::key_values(&[
        ("Total", context.money(plan.total)),
        ("Installment", context.money(plan.installment)),
        ("Monthly interest", format!("{}%", plan.monthly_interest_pct)),
        (
            "Paid",
            format!("{}/{}", plan.installments_paid, plan.installments_total),
        ),
    ]);
    let rows: Vec<Vec<String>> = plan
        .installments
        .iter()
        .map(|item| {
            vec![
                item.number.to_string(),
                item.due_date.to_string(),
                context.money(item.amount),
                if item.paid { "pagada" } else { "pendiente" }.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        output::render_table(&["#", "Fecha", "Cuota", "Estado"], &rows)
    );
    Ok(LoopControl::Continue)
}

fn cmd_loan_pay(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 3, PAY_USAGE)?;
    let loan_id = parse_id(args[0])?;
    let total = parse_number(args[1], "total")?;
    let months = parse_count(args[2], "months")?;
    let requested = args
        .get(3)
        .map(|raw| parse_number(raw, "amount"))
        .transpose()?;

    let mut position = LoanPosition::from_ledger(total, &context.transactions, loan_id);
    let payment =
        position.register_payment(loan_id, requested, months, context.clock.as_ref())?;
    context.transactions.push(payment.transaction);

    output::success(format!(
        "Payment of {} registered. Outstanding: {}.",
        context.money(payment.amount),
        context.money(payment.outstanding_after)
    ));
    if payment.settled {
        output::info(format!("Loan {} is now paid off.", loan_id));
    }
    Ok(LoopControl::Continue)
}
