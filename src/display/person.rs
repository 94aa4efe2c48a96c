//! Person display formatting

use super::{balance::balance_status, column_width};
use crate::ledger::Balances;
use crate::models::{Money, Person};

/// Format people with their net balances as a table
pub fn format_person_list(people: &[Person], balances: &Balances, symbol: &str) -> String {
    if people.is_empty() {
        return "No people found.".to_string();
    }

    let name_width = column_width(people.iter().map(|p| p.name.as_str()), 4);
    let email_width = column_width(
        people.iter().map(|p| p.email.as_deref().unwrap_or("")),
        5,
    );

    let mut output = String::new();
    output.push_str(&format!(
        "{:<6}  {:<name_width$}  {:<email_width$}  {:<7}  {:>12}  {}\n",
        "ID",
        "Name",
        "Email",
        "Color",
        "Balance",
        "Status",
        name_width = name_width,
        email_width = email_width,
    ));
    output.push_str(&format!(
        "{:-<6}  {:-<name_width$}  {:-<email_width$}  {:-<7}  {:->12}  {:-<8}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
        email_width = email_width,
    ));

    for person in people {
        let balance = balances.get(person.id);
        output.push_str(&format!(
            "{:<6}  {:<name_width$}  {:<email_width$}  {:<7}  {:>12}  {}\n",
            person.id.to_string(),
            person.name,
            person.email.as_deref().unwrap_or(""),
            person.color(),
            balance.format_with_symbol(symbol),
            balance_status(balance),
            name_width = name_width,
            email_width = email_width,
        ));
    }

    output
}

/// Format a single person's details
pub fn format_person_details(
    person: &Person,
    balance: Money,
    expense_count: usize,
    symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Person: {}\n", person.name));
    output.push_str(&format!("  ID:       {}\n", person.id));
    if let Some(email) = &person.email {
        output.push_str(&format!("  Email:    {}\n", email));
    }
    if let Some(phone) = &person.phone {
        output.push_str(&format!("  Phone:    {}\n", phone));
    }
    output.push_str(&format!("  Color:    {} ({})\n", person.color(), person.initial()));
    output.push('\n');
    output.push_str(&format!(
        "  Balance:  {} ({})\n",
        balance.format_with_symbol(symbol),
        balance_status(balance)
    ));
    output.push_str(&format!("  Expenses: {}\n", expense_count));

    output
}
