//! Balance and dashboard display formatting

use super::column_width;
use crate::ledger::Transfer;
use crate::models::{Money, Person};
use crate::services::{name_of, BalanceSheet, DashboardStats};

/// Short word for what a balance means
pub fn balance_status(balance: Money) -> &'static str {
    if !balance.is_outstanding() {
        "settled up"
    } else if balance.is_positive() {
        "is owed"
    } else {
        "owes"
    }
}

/// Format the net balance of every person
pub fn format_balances(sheet: &BalanceSheet, symbol: &str, pending: bool) -> String {
    if sheet.people.is_empty() {
        return "No people found.".to_string();
    }

    let name_width = column_width(sheet.people.iter().map(|p| p.name.as_str()), 6);

    let mut output = String::new();
    output.push_str(if pending {
        "Pending balances (settled shares excluded)\n\n"
    } else {
        "Balances\n\n"
    });

    output.push_str(&format!(
        "{:<name_width$}  {:>12}  {}\n",
        "Person",
        "Balance",
        "Status",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->12}  {:-<10}\n",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for person in &sheet.people {
        let balance = sheet.balances.get(person.id);
        output.push_str(&format!(
            "{:<name_width$}  {:>12}  {}\n",
            person.name,
            balance.format_with_symbol(symbol),
            balance_status(balance),
            name_width = name_width,
        ));
    }

    let outstanding = sheet.balances.outstanding_count();
    output.push('\n');
    if outstanding == 0 {
        output.push_str("Everyone is settled up.\n");
    } else {
        output.push_str(&format!(
            "{} {} an outstanding balance.\n",
            outstanding,
            if outstanding == 1 { "person has" } else { "people have" }
        ));
    }

    output
}

/// Format a list of "who pays whom" transfers
pub fn format_transfers(
    people: &[Person],
    transfers: &[Transfer],
    symbol: &str,
    heading: &str,
) -> String {
    let mut output = format!("{}\n\n", heading);

    if transfers.is_empty() {
        output.push_str("Nothing to settle.\n");
        return output;
    }

    let rows: Vec<(String, String)> = transfers
        .iter()
        .map(|t| (name_of(people, t.from), name_of(people, t.to)))
        .collect();
    let from_width = column_width(rows.iter().map(|(from, _)| from.as_str()), 4);
    let to_width = column_width(rows.iter().map(|(_, to)| to.as_str()), 2);

    for ((from, to), transfer) in rows.iter().zip(transfers) {
        output.push_str(&format!(
            "  {:<from_width$}  pays  {:<to_width$}  {:>12}\n",
            from,
            to,
            transfer.amount.format_with_symbol(symbol),
            from_width = from_width,
            to_width = to_width,
        ));
    }

    output
}

/// Format the dashboard figures
pub fn format_stats(stats: &DashboardStats, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str("Dashboard\n");
    output.push_str(&"=".repeat(36));
    output.push('\n');
    output.push_str(&format!(
        "  Total spent:          {:>12}\n",
        stats.total_spent.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Spent this month:     {:>12}\n",
        stats.spent_this_month.format_with_symbol(symbol)
    ));
    output.push_str(&format!("  Expenses:             {:>12}\n", stats.expense_count));
    output.push_str(&format!("  People:               {:>12}\n", stats.people_count));
    output.push_str(&format!(
        "  Outstanding balances: {:>12}\n",
        stats.outstanding_count
    ));

    output
}
