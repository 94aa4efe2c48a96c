//! Balance aggregation
//!
//! Folds a list of expenses into a signed net balance per person. Positive
//! means the person is owed money, negative means they owe money.

use std::collections::BTreeMap;

use crate::models::{Expense, Money, ParticipantShare, Person, PersonId};

/// Which participant shares take part in an aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShareScope {
    /// Every share, settled or not
    #[default]
    All,
    /// Only shares that have not been settled yet
    Pending,
}

impl ShareScope {
    /// Whether `share` counts under this scope
    pub fn includes(&self, share: &ParticipantShare) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !share.is_settled,
        }
    }
}

/// A share contributes only when its owed amount is finite and positive
pub(crate) fn contributes(share: &ParticipantShare) -> bool {
    let owed = share.amount_owed.value();
    owed.is_finite() && owed > 0.0
}

/// Net balance per person
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Balances {
    totals: BTreeMap<PersonId, Money>,
}

impl Balances {
    /// Start every listed person at zero
    pub fn seeded<I>(people: I) -> Self
    where
        I: IntoIterator<Item = PersonId>,
    {
        Self {
            totals: people.into_iter().map(|id| (id, Money::zero())).collect(),
        }
    }

    /// Fold `expenses` into the running totals
    pub fn apply(&mut self, expenses: &[Expense], scope: ShareScope) {
        for expense in expenses {
            for (person_id, amount) in contributions(expense, scope) {
                *self.totals.entry(person_id).or_default() += amount;
            }
        }
    }

    /// Net balance for one person (zero when they never appeared)
    pub fn get(&self, person_id: PersonId) -> Money {
        self.totals.get(&person_id).copied().unwrap_or_default()
    }

    /// Iterate balances in person id order
    pub fn iter(&self) -> impl Iterator<Item = (PersonId, Money)> + '_ {
        self.totals.iter().map(|(id, amount)| (*id, *amount))
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Sum of every balance; zero up to float error when nothing leaks
    pub fn total(&self) -> Money {
        self.totals.values().copied().sum()
    }

    /// People whose balance is further than 0.01 from zero
    pub fn outstanding_count(&self) -> usize {
        self.totals.values().filter(|b| b.is_outstanding()).count()
    }

    /// People who are owed money, largest first
    pub fn creditors(&self) -> Vec<(PersonId, Money)> {
        let mut list: Vec<_> = self
            .iter()
            .filter(|(_, b)| b.is_outstanding() && b.is_positive())
            .collect();
        list.sort_by(|a, b| b.1.value().total_cmp(&a.1.value()).then(a.0.cmp(&b.0)));
        list
    }

    /// People who owe money, largest debt first (amounts as positive values)
    pub fn debtors(&self) -> Vec<(PersonId, Money)> {
        let mut list: Vec<_> = self
            .iter()
            .filter(|(_, b)| b.is_outstanding() && b.is_negative())
            .map(|(id, b)| (id, b.abs()))
            .collect();
        list.sort_by(|a, b| b.1.value().total_cmp(&a.1.value()).then(a.0.cmp(&b.0)));
        list
    }
}

/// Signed per-person contributions of a single expense
///
/// The payer is credited with each non-payer share; that participant is
/// debited by the same amount. The payer's own share contributes nothing.
pub fn contributions(expense: &Expense, scope: ShareScope) -> Vec<(PersonId, Money)> {
    let payer = expense.paid_by;
    let mut out = Vec::new();

    for share in &expense.participants {
        if share.person_id == payer || !contributes(share) || !scope.includes(share) {
            continue;
        }
        out.push((payer, share.amount_owed));
        out.push((share.person_id, -share.amount_owed));
    }

    out
}

/// Net balances over every share of every expense
pub fn compute_balances(expenses: &[Expense]) -> Balances {
    let mut balances = Balances::default();
    balances.apply(expenses, ShareScope::All);
    balances
}

/// Net balances over unsettled shares only
pub fn compute_pending_balances(expenses: &[Expense]) -> Balances {
    let mut balances = Balances::default();
    balances.apply(expenses, ShareScope::Pending);
    balances
}

/// Net balances with every known person present, even at zero
pub fn compute_balances_for(
    people: &[Person],
    expenses: &[Expense],
    scope: ShareScope,
) -> Balances {
    let mut balances = Balances::seeded(people.iter().map(|p| p.id));
    balances.apply(expenses, scope);
    balances
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::split::{calculate, SplitStrategy};
    use crate::models::{Category, ExpenseId, NewExpense, DEFAULT_CURRENCY};
    use chrono::NaiveDate;

    const A: PersonId = PersonId::new(1);
    const B: PersonId = PersonId::new(2);
    const C: PersonId = PersonId::new(3);

    fn expense(id: u64, total: f64, payer: PersonId, shares: Vec<ParticipantShare>) -> Expense {
        NewExpense {
            title: format!("expense {}", id),
            description: None,
            total_amount: Money::new(total),
            currency: DEFAULT_CURRENCY.into(),
            paid_by: payer,
            split_method: None,
            category: Category::Other,
            expense_date: None,
            participants: shares,
        }
        .into_expense(
            ExpenseId::new(id),
            NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        )
    }

    fn share(id: PersonId, owed: f64) -> ParticipantShare {
        ParticipantShare::new(id, Money::new(owed))
    }

    #[test]
    fn test_equal_split_scenario() {
        let shares = calculate(Money::new(600.0), &[A, B, C], &SplitStrategy::Equal).shares;
        let balances = compute_balances(&[expense(1, 600.0, A, shares)]);

        assert_eq!(balances.get(A).to_string(), "400.00");
        assert_eq!(balances.get(B).to_string(), "-200.00");
        assert_eq!(balances.get(C).to_string(), "-200.00");
    }

    #[test]
    fn test_custom_split_scenario() {
        let balances =
            compute_balances(&[expense(1, 100.0, A, vec![share(A, 40.0), share(B, 60.0)])]);

        assert_eq!(balances.get(A).to_string(), "60.00");
        assert_eq!(balances.get(B).to_string(), "-60.00");
    }

    #[test]
    fn test_payer_only_expense_contributes_nothing() {
        let balances = compute_balances(&[
            expense(1, 50.0, A, vec![share(A, 50.0)]),
            expense(2, 80.0, B, vec![share(B, 40.0), share(B, 40.0)]),
        ]);

        assert!(balances.get(A).is_zero());
        assert!(balances.get(B).is_zero());
        assert!(balances.is_empty());
    }

    #[test]
    fn test_conservation_across_expenses() {
        let expenses = vec![
            expense(1, 100.0, A, vec![share(A, 33.3333), share(B, 33.3333), share(C, 33.3333)]),
            expense(2, 75.5, B, vec![share(A, 25.5), share(C, 50.0)]),
            expense(3, 12.0, C, vec![share(C, 6.0), share(A, 6.0)]),
        ];

        for e in &expenses {
            let sum: Money = contributions(e, ShareScope::All).into_iter().map(|(_, m)| m).sum();
            assert!(sum.value().abs() < 1e-9);
        }

        assert!(compute_balances(&expenses).total().value().abs() < 1e-9);
    }

    #[test]
    fn test_bad_shares_are_skipped() {
        let mut weird = share(B, 0.0);
        weird.amount_owed = Money::new(f64::INFINITY);
        let balances = compute_balances(&[expense(
            1,
            100.0,
            A,
            vec![share(B, -10.0), share(C, 0.0), weird, share(C, 20.0)],
        )]);

        assert_eq!(balances.get(A), Money::new(20.0));
        assert_eq!(balances.get(C), Money::new(-20.0));
        assert!(balances.get(B).is_zero());
    }

    #[test]
    fn test_duplicate_participants_are_summed() {
        let balances =
            compute_balances(&[expense(1, 30.0, A, vec![share(B, 10.0), share(B, 10.0)])]);
        assert_eq!(balances.get(B), Money::new(-20.0));
    }

    #[test]
    fn test_zero_participants_contributes_nothing() {
        let balances = compute_balances(&[expense(1, 30.0, A, vec![])]);
        assert!(balances.is_empty());
    }

    #[test]
    fn test_pending_scope_ignores_settled_shares() {
        let mut settled = share(B, 50.0);
        settled.is_settled = true;
        let expenses = vec![expense(1, 100.0, A, vec![settled, share(C, 50.0)])];

        let all = compute_balances(&expenses);
        assert_eq!(all.get(A), Money::new(100.0));

        let pending = compute_pending_balances(&expenses);
        assert_eq!(pending.get(A), Money::new(50.0));
        assert!(pending.get(B).is_zero());
    }

    #[test]
    fn test_seeded_people_and_ordering() {
        let people: Vec<Person> = [A, B, C]
            .iter()
            .map(|id| crate::models::NewPerson::named(id.to_string()).into_person(*id))
            .collect();
        let balances = compute_balances_for(
            &people,
            &[expense(1, 90.0, A, vec![share(B, 60.0), share(C, 30.0)])],
            ShareScope::All,
        );

        assert_eq!(balances.len(), 3);
        assert_eq!(balances.outstanding_count(), 3);
        assert_eq!(balances.creditors(), vec![(A, Money::new(90.0))]);
        assert_eq!(
            balances.debtors(),
            vec![(B, Money::new(60.0)), (C, Money::new(30.0))]
        );
    }
}
