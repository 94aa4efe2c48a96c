//! Settlement flags on participant shares
//!
//! Each share is either settled or pending. Flipping one share never
//! touches any other share or any other field of the expense.

use std::fmt;

use crate::error::{FairshareError, FairshareResult};
use crate::models::{Expense, PersonId};

/// Return a copy of `expense` with `person_id`'s settlement flag flipped
///
/// When a person appears more than once, only their first share changes.
pub fn toggle_settlement(expense: &Expense, person_id: PersonId) -> FairshareResult<Expense> {
    let mut updated = expense.clone();
    let share = updated
        .participants
        .iter_mut()
        .find(|p| p.person_id == person_id)
        .ok_or_else(|| not_a_participant(expense, person_id))?;
    share.is_settled = !share.is_settled;
    Ok(updated)
}

/// Return a copy of `expense` with `person_id`'s settlement flag set to `settled`
pub fn set_settlement(
    expense: &Expense,
    person_id: PersonId,
    settled: bool,
) -> FairshareResult<Expense> {
    let mut updated = expense.clone();
    let share = updated
        .participants
        .iter_mut()
        .find(|p| p.person_id == person_id)
        .ok_or_else(|| not_a_participant(expense, person_id))?;
    share.is_settled = settled;
    Ok(updated)
}

fn not_a_participant(expense: &Expense, person_id: PersonId) -> FairshareError {
    FairshareError::NotFound {
        entity_type: "Participant",
        identifier: format!("{} in {}", person_id, expense.id),
    }
}

/// How many shares of an expense have been settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlementSummary {
    pub settled: usize,
    pub total: usize,
}

impl SettlementSummary {
    pub fn of(expense: &Expense) -> Self {
        Self {
            settled: expense.settled_count(),
            total: expense.participant_count(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.settled == self.total
    }
}

impl fmt::Display for SettlementSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_complete() {
            write!(f, "All settled")
        } else {
            write!(f, "{}/{} settled", self.settled, self.total)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Category, ExpenseId, Money, NewExpense, ParticipantShare, DEFAULT_CURRENCY,
    };
    use chrono::NaiveDate;

    fn sample() -> Expense {
        NewExpense {
            title: "Groceries".into(),
            description: Some("weekly shop".into()),
            total_amount: Money::new(90.0),
            currency: DEFAULT_CURRENCY.into(),
            paid_by: PersonId::new(1),
            split_method: None,
            category: Category::Food,
            expense_date: NaiveDate::from_ymd_opt(2025, 4, 2),
            participants: vec![
                ParticipantShare::new(PersonId::new(1), Money::new(30.0)),
                ParticipantShare::new(PersonId::new(2), Money::new(25.0)),
                ParticipantShare::new(PersonId::new(3), Money::new(35.0)),
            ],
        }
        .into_expense(
            ExpenseId::new(4),
            NaiveDate::from_ymd_opt(2025, 4, 2)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_toggle_changes_only_the_target_share() {
        let before = sample();
        let after = toggle_settlement(&before, PersonId::new(2)).unwrap();

        assert!(after.participants[1].is_settled);
        assert_eq!(after.participants[1].amount_owed, before.participants[1].amount_owed);
        assert_eq!(after.participants[0], before.participants[0]);
        assert_eq!(after.participants[2], before.participants[2]);

        let mut expected = before.clone();
        expected.participants[1].is_settled = true;
        assert_eq!(after, expected);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let before = sample();
        let once = toggle_settlement(&before, PersonId::new(3)).unwrap();
        let twice = toggle_settlement(&once, PersonId::new(3)).unwrap();
        assert_eq!(twice, before);
    }

    #[test]
    fn test_toggle_unknown_participant() {
        let err = toggle_settlement(&sample(), PersonId::new(8)).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_set_settlement_is_idempotent() {
        let once = set_settlement(&sample(), PersonId::new(1), true).unwrap();
        let twice = set_settlement(&once, PersonId::new(1), true).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_summary_display() {
        let mut expense = sample();
        assert_eq!(SettlementSummary::of(&expense).to_string(), "0/3 settled");

        for share in &mut expense.participants {
            share.is_settled = true;
        }
        let summary = SettlementSummary::of(&expense);
        assert!(summary.is_complete());
        assert_eq!(summary.to_string(), "All settled");
    }
}
