//! Display formatting for terminal output
//!
//! Plain-text tables and detail views for people, expenses and balances.
//! Amounts are rendered with the currency symbol passed in by the caller.

pub mod balance;
pub mod expense;
pub mod person;

pub use balance::{balance_status, format_balances, format_stats, format_transfers};
pub use expense::{format_expense_details, format_expense_list, format_history};
pub use person::{format_person_details, format_person_list};

/// Cut `s` to at most `max_len` characters, marking the cut with `...`
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

/// Width of the widest value, but never narrower than `min`
pub(crate) fn column_width<'a, I>(values: I, min: usize) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(min)
        .max(min)
}
