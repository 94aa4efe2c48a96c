//! Balance service
//!
//! Loads people and expenses from the store and runs the ledger
//! computations over them: net balances, pairwise debts, settle-up
//! suggestions and the dashboard figures.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::FairshareResult;
use crate::ledger::{self, Balances, ShareScope, Transfer};
use crate::models::{Expense, Money, Person};
use crate::storage::{ExpenseQuery, Store};

/// Headline figures for the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashboardStats {
    /// Sum of every expense total
    pub total_spent: Money,
    /// Sum of totals dated in the current calendar month
    pub spent_this_month: Money,
    pub expense_count: usize,
    pub people_count: usize,
    /// People whose net balance is further than 0.01 from zero
    pub outstanding_count: usize,
}

impl DashboardStats {
    /// Compute the figures from loaded data
    pub fn compute(people: &[Person], expenses: &[Expense], today: NaiveDate) -> Self {
        let total_spent = expenses.iter().map(|e| e.total_amount).sum();
        let spent_this_month = expenses
            .iter()
            .filter(|e| {
                let date = e.date();
                date.year() == today.year() && date.month() == today.month()
            })
            .map(|e| e.total_amount)
            .sum();
        let balances = ledger::compute_balances_for(people, expenses, ShareScope::All);

        Self {
            total_spent,
            spent_this_month,
            expense_count: expenses.len(),
            people_count: people.len(),
            outstanding_count: balances.outstanding_count(),
        }
    }
}

/// People and their balances, loaded together
#[derive(Debug, Clone)]
pub struct BalanceSheet {
    pub people: Vec<Person>,
    pub balances: Balances,
}

/// Service for balance reports
pub struct BalanceService<'a> {
    store: &'a dyn Store,
}

impl<'a> BalanceService<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    fn load(&self) -> FairshareResult<(Vec<Person>, Vec<Expense>)> {
        let people = self.store.list_people()?;
        let expenses = self.store.list_expenses(&ExpenseQuery::all())?;
        Ok((people, expenses))
    }

    /// Net balance for every known person
    pub fn sheet(&self, scope: ShareScope) -> FairshareResult<BalanceSheet> {
        let (people, expenses) = self.load()?;
        let balances = ledger::compute_balances_for(&people, &expenses, scope);
        Ok(BalanceSheet { people, balances })
    }

    /// Net debt between each pair of people
    pub fn pairwise(&self, scope: ShareScope) -> FairshareResult<(Vec<Person>, Vec<Transfer>)> {
        let (people, expenses) = self.load()?;
        let debts = ledger::pairwise_debts(&expenses, scope);
        Ok((people, debts))
    }

    /// The fewest transfers that clear every balance
    pub fn settle_up(&self, scope: ShareScope) -> FairshareResult<(Vec<Person>, Vec<Transfer>)> {
        let (people, expenses) = self.load()?;
        let transfers = ledger::settle_up(&expenses, scope);
        Ok((people, transfers))
    }

    pub fn stats(&self, today: NaiveDate) -> FairshareResult<DashboardStats> {
        let (people, expenses) = self.load()?;
        Ok(DashboardStats::compute(&people, &expenses, today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FairsharePaths;
    use crate::models::{NewPerson, PersonId};
    use crate::services::expense::{ExpenseDraft, ExpenseService};
    use crate::services::person::PersonService;
    use crate::storage::LocalStore;
    use tempfile::TempDir;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    /// Asha pays 600 for all three, Ravi pays 90 for Ravi and Meera
    fn setup() -> (TempDir, LocalStore, [PersonId; 3]) {
        let temp_dir = TempDir::new().unwrap();
        let store =
            LocalStore::open(FairsharePaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();

        let people = PersonService::new(&store);
        let ids = ["Asha", "Ravi", "Meera"]
            .map(|name| people.create(NewPerson::named(name)).unwrap().id);
        let [a, b, c] = ids;

        let expenses = ExpenseService::new(&store);
        expenses
            .create(&ExpenseDraft {
                title: "Dinner".into(),
                total: "600".into(),
                paid_by: Some(a),
                participants: vec![a, b, c],
                expense_date: Some(day(6, 2)),
                ..ExpenseDraft::default()
            })
            .unwrap();
        expenses
            .create(&ExpenseDraft {
                title: "Coffee".into(),
                total: "90".into(),
                paid_by: Some(b),
                participants: vec![b, c],
                expense_date: Some(day(5, 28)),
                ..ExpenseDraft::default()
            })
            .unwrap();

        (temp_dir, store, ids)
    }

    #[test]
    fn test_sheet_includes_everyone() {
        let (_temp, store, [a, b, c]) = setup();
        let sheet = BalanceService::new(&store).sheet(ShareScope::All).unwrap();

        assert_eq!(sheet.people.len(), 3);
        assert_eq!(sheet.balances.get(a), Money::new(400.0));
        assert_eq!(sheet.balances.get(b), Money::new(-155.0));
        assert_eq!(sheet.balances.get(c), Money::new(-245.0));
        assert!(sheet.balances.total().is_zero());
    }

    #[test]
    fn test_pending_scope_drops_settled_shares() {
        let (_temp, store, [a, b, c]) = setup();
        let expenses = ExpenseService::new(&store);
        let dinner = expenses
            .all()
            .unwrap()
            .into_iter()
            .find(|e| e.title == "Dinner")
            .unwrap();
        expenses.set_settlement(dinner.id, b, true).unwrap();

        let pending = BalanceService::new(&store)
            .sheet(ShareScope::Pending)
            .unwrap()
            .balances;
        assert_eq!(pending.get(a), Money::new(200.0));
        assert_eq!(pending.get(b), Money::new(45.0));
        assert_eq!(pending.get(c), Money::new(-245.0));
    }

    #[test]
    fn test_settle_up_clears_balances() {
        let (_temp, store, [a, b, c]) = setup();
        let (_, transfers) = BalanceService::new(&store)
            .settle_up(ShareScope::All)
            .unwrap();

        let mut net = std::collections::BTreeMap::new();
        for t in &transfers {
            *net.entry(t.from).or_insert(0.0) += t.amount.value();
            *net.entry(t.to).or_insert(0.0) -= t.amount.value();
        }
        assert!((net[&a] + 400.0).abs() < 0.01);
        assert!((net[&b] - 155.0).abs() < 0.01);
        assert!((net[&c] - 245.0).abs() < 0.01);
    }

    #[test]
    fn test_stats() {
        let (_temp, store, _) = setup();
        let stats = BalanceService::new(&store).stats(day(6, 15)).unwrap();

        assert_eq!(stats.total_spent, Money::new(690.0));
        assert_eq!(stats.spent_this_month, Money::new(600.0));
        assert_eq!(stats.expense_count, 2);
        assert_eq!(stats.people_count, 3);
        assert_eq!(stats.outstanding_count, 3);
    }
}
