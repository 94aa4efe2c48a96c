//! CSV export
//!
//! Expenses are flattened to one row per participant share so a
//! spreadsheet can pivot on either the expense or the person.

use std::io::Write;

use serde::Serialize;

use crate::display::balance_status;
use crate::error::{FairshareError, FairshareResult};
use crate::ledger::{Balances, SettlementSummary};
use crate::models::{Expense, Person};
use crate::services::name_of;

#[derive(Debug, Serialize)]
struct ShareRow<'a> {
    expense_id: String,
    date: String,
    title: &'a str,
    category: &'a str,
    currency: &'a str,
    total_amount: String,
    paid_by: String,
    split_method: String,
    participant: String,
    amount_owed: String,
    is_settled: bool,
    settlement: String,
}

#[derive(Debug, Serialize)]
struct BalanceRow {
    person_id: String,
    name: String,
    balance: String,
    status: &'static str,
}

fn export_error(e: impl std::fmt::Display) -> FairshareError {
    FairshareError::Export(e.to_string())
}

/// Write every participant share of every expense
pub fn write_expenses_csv<W: Write>(
    people: &[Person],
    expenses: &[Expense],
    writer: W,
) -> FairshareResult<()> {
    let mut csv = csv::Writer::from_writer(writer);

    for expense in expenses {
        let summary = SettlementSummary::of(expense);
        for share in &expense.participants {
            csv.serialize(ShareRow {
                expense_id: expense.id.to_string(),
                date: expense.date().to_string(),
                title: &expense.title,
                category: expense.category.as_str(),
                currency: &expense.currency,
                total_amount: expense.total_amount.to_string(),
                paid_by: name_of(people, expense.paid_by),
                split_method: expense
                    .split_method
                    .map(|m| m.to_string())
                    .unwrap_or_default(),
                participant: name_of(people, share.person_id),
                amount_owed: share.amount_owed.to_string(),
                is_settled: share.is_settled,
                settlement: summary.to_string(),
            })
            .map_err(export_error)?;
        }
    }

    csv.flush().map_err(export_error)?;
    Ok(())
}

/// Write one row per person with their net balance
pub fn write_balances_csv<W: Write>(
    people: &[Person],
    balances: &Balances,
    writer: W,
) -> FairshareResult<()> {
    let mut csv = csv::Writer::from_writer(writer);

    for (person_id, balance) in balances.iter() {
        csv.serialize(BalanceRow {
            person_id: person_id.to_string(),
            name: name_of(people, person_id),
            balance: balance.to_string(),
            status: balance_status(balance),
        })
        .map_err(export_error)?;
    }

    csv.flush().map_err(export_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::compute_balances_for;
    use crate::ledger::ShareScope;
    use crate::models::{
        Category, ExpenseId, Money, NewExpense, NewPerson, ParticipantShare, PersonId,
        SplitMethod,
    };
    use chrono::NaiveDate;

    fn people() -> Vec<Person> {
        vec![
            NewPerson::named("Asha").into_person(PersonId::new(1)),
            NewPerson::named("Ravi, Jr.").into_person(PersonId::new(2)),
        ]
    }

    fn dinner() -> Expense {
        let mut shares = vec![
            ParticipantShare::new(PersonId::new(1), Money::new(300.0)),
            ParticipantShare::new(PersonId::new(2), Money::new(300.0)),
        ];
        shares[1].is_settled = true;
        NewExpense {
            title: "Dinner".into(),
            description: None,
            total_amount: Money::new(600.0),
            currency: "INR".into(),
            paid_by: PersonId::new(1),
            split_method: Some(SplitMethod::Equal),
            category: Category::Food,
            expense_date: NaiveDate::from_ymd_opt(2025, 6, 2),
            participants: shares,
        }
        .into_expense(
            ExpenseId::new(5),
            NaiveDate::from_ymd_opt(2025, 6, 3)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_expenses_csv_has_row_per_share() {
        let mut out = Vec::new();
        write_expenses_csv(&people(), &[dinner()], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("expense_id,date,title,category"));
        assert_eq!(
            lines[2],
            "e-5,2025-06-02,Dinner,food,INR,600.00,Asha,equal,\"Ravi, Jr.\",300.00,true,1/2 settled"
        );
    }

    #[test]
    fn test_balances_csv() {
        let balances = compute_balances_for(&people(), &[dinner()], ShareScope::All);
        let mut out = Vec::new();
        write_balances_csv(&people(), &balances, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("p-1,Asha,300.00,is owed"));
        assert!(text.contains("p-2,\"Ravi, Jr.\",-300.00,owes"));
    }
}
