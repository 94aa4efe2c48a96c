//! Expense display formatting
//!
//! List rows, the detail view with per-participant shares, and the
//! day-grouped history.

use super::{column_width, truncate};
use crate::ledger::SettlementSummary;
use crate::models::{Expense, Person};
use crate::services::{name_of, DayGroup};

const TITLE_WIDTH: usize = 24;

/// Format expenses as a table
pub fn format_expense_list(
    expenses: &[Expense],
    people: &[Person],
    symbol: &str,
    date_format: &str,
) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let payers: Vec<String> = expenses.iter().map(|e| name_of(people, e.paid_by)).collect();
    let payer_width = column_width(payers.iter().map(String::as_str), 7);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<6}  {:10}  {:<TITLE_WIDTH$}  {:<13}  {:<payer_width$}  {:>12}  {}\n",
        "ID",
        "Date",
        "Title",
        "Category",
        "Paid by",
        "Amount",
        "Settled",
        payer_width = payer_width,
    ));
    output.push_str(&format!(
        "{:-<6}  {:-<10}  {:-<TITLE_WIDTH$}  {:-<13}  {:-<payer_width$}  {:->12}  {:-<11}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        "",
        payer_width = payer_width,
    ));

    for (expense, payer) in expenses.iter().zip(&payers) {
        output.push_str(&format_expense_row(expense, payer, payer_width, symbol, date_format));
    }

    output
}

fn format_expense_row(
    expense: &Expense,
    payer: &str,
    payer_width: usize,
    symbol: &str,
    date_format: &str,
) -> String {
    format!(
        "{:<6}  {:10}  {:<TITLE_WIDTH$}  {:<13}  {:<payer_width$}  {:>12}  {}\n",
        expense.id.to_string(),
        expense.date().format(date_format).to_string(),
        truncate(&expense.title, TITLE_WIDTH),
        expense.category.label(),
        payer,
        expense.total_amount.format_with_symbol(symbol),
        SettlementSummary::of(expense),
        payer_width = payer_width,
    )
}

/// Format one expense with its participant shares
pub fn format_expense_details(
    expense: &Expense,
    people: &[Person],
    symbol: &str,
    date_format: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.title));
    output.push_str(&format!("  ID:          {}\n", expense.id));
    output.push_str(&format!(
        "  Date:        {}\n",
        expense.date().format(date_format)
    ));
    output.push_str(&format!(
        "  Amount:      {} {}\n",
        expense.total_amount.format_with_symbol(symbol),
        expense.currency
    ));
    output.push_str(&format!("  Category:    {}\n", expense.category.label()));
    output.push_str(&format!(
        "  Paid by:     {}\n",
        name_of(people, expense.paid_by)
    ));
    if let Some(method) = expense.split_method {
        output.push_str(&format!("  Split:       {}\n", method));
    }
    if let Some(description) = &expense.description {
        output.push_str(&format!("  Description: {}\n", description));
    }
    output.push_str(&format!(
        "  Recorded:    {}\n",
        expense.created_date.format("%Y-%m-%d %H:%M")
    ));

    output.push_str(&format!(
        "\nParticipants ({}):\n",
        SettlementSummary::of(expense)
    ));
    if expense.participants.is_empty() {
        output.push_str("  (none)\n");
    }

    let names: Vec<String> = expense
        .participants
        .iter()
        .map(|s| name_of(people, s.person_id))
        .collect();
    let name_width = column_width(names.iter().map(String::as_str), 4);

    for (share, name) in expense.participants.iter().zip(&names) {
        let marker = if share.person_id == expense.paid_by {
            "paid"
        } else if share.is_settled {
            "settled"
        } else {
            "pending"
        };
        output.push_str(&format!(
            "  [{}] {:<name_width$}  {:>12}  {}\n",
            if share.is_settled { "x" } else { " " },
            name,
            share.amount_owed.format_with_symbol(symbol),
            marker,
            name_width = name_width,
        ));
    }

    if !expense.is_balanced() {
        output.push_str(&format!(
            "\n  Warning: shares add up to {}, not {}\n",
            expense.shares_total().format_with_symbol(symbol),
            expense.total_amount.format_with_symbol(symbol)
        ));
    }

    output
}

/// Format day-grouped history, newest day first
pub fn format_history(groups: &[DayGroup], people: &[Person], symbol: &str, label: &str) -> String {
    let mut output = format!("History: {}\n", label);

    if groups.is_empty() {
        output.push_str("\nNo expenses found.\n");
        return output;
    }

    for group in groups {
        output.push_str(&format!(
            "\n{}  ({} expense{}, {})\n",
            group.date.format("%a %d %b %Y"),
            group.expenses.len(),
            if group.expenses.len() == 1 { "" } else { "s" },
            group.total().format_with_symbol(symbol)
        ));

        for expense in &group.expenses {
            output.push_str(&format!(
                "  {:<6}  {:<TITLE_WIDTH$}  {:>12}  paid by {}  [{}]\n",
                expense.id.to_string(),
                truncate(&expense.title, TITLE_WIDTH),
                expense.total_amount.format_with_symbol(symbol),
                name_of(people, expense.paid_by),
                SettlementSummary::of(expense)
            ));
        }
    }

    output
}
