//! Expense service
//!
//! Turns an expense form into a validated record, lists and filters
//! expenses, groups history by day, and flips settlement flags.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::error::{FairshareError, FairshareResult};
use crate::ledger::{self, SplitStrategy};
use crate::models::{
    Category, Expense, ExpenseId, ExpenseValidationError, Money, NewExpense, PersonId,
    DEFAULT_CURRENCY,
};
use crate::storage::{ExpenseQuery, ExpenseSort, Store};

/// An expense as typed in, before validation
#[derive(Debug, Clone, Default)]
pub struct ExpenseDraft {
    pub title: String,
    pub description: Option<String>,
    /// Total as entered; parsed during validation
    pub total: String,
    pub currency: Option<String>,
    pub paid_by: Option<PersonId>,
    /// Selected participants, in selection order
    pub participants: Vec<PersonId>,
    pub strategy: SplitStrategy,
    pub category: Category,
    pub expense_date: Option<NaiveDate>,
}

impl ExpenseDraft {
    /// Check the form and produce the record to submit
    ///
    /// Repeated selections collapse to one. The equal split hands every
    /// participant the same unrounded per-head amount; a custom split must
    /// add up to the total within 0.01.
    pub fn validate(&self) -> Result<NewExpense, ExpenseValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ExpenseValidationError::MissingTitle);
        }

        let total = Money::parse(&self.total)
            .ok()
            .filter(|t| t.is_positive())
            .ok_or_else(|| ExpenseValidationError::InvalidTotal(self.total.trim().to_string()))?;

        let paid_by = self.paid_by.ok_or(ExpenseValidationError::MissingPayer)?;

        let mut participants: Vec<PersonId> = Vec::with_capacity(self.participants.len());
        for id in &self.participants {
            if !participants.contains(id) {
                participants.push(*id);
            }
        }
        if participants.is_empty() {
            return Err(ExpenseValidationError::NoParticipants);
        }

        if let SplitStrategy::Custom(amounts) = &self.strategy {
            if let Some((id, _)) = amounts
                .iter()
                .find(|(id, amount)| participants.contains(*id) && amount.is_negative())
            {
                return Err(ExpenseValidationError::NegativeShare(*id));
            }
        }

        let outcome = ledger::calculate(total, &participants, &self.strategy);
        if !outcome.is_valid {
            return Err(ExpenseValidationError::SplitMismatch {
                entered: outcome.entered,
                total,
            });
        }

        Ok(NewExpense {
            title: title.to_string(),
            description: self
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            total_amount: total,
            currency: self
                .currency
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .unwrap_or(DEFAULT_CURRENCY)
                .to_uppercase(),
            paid_by,
            split_method: Some(self.strategy.method()),
            category: self.category,
            expense_date: self.expense_date,
            participants: outcome.shares,
        })
    }
}

/// Date window for history filtering, relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    #[default]
    All,
    /// Same ISO week as today
    Week,
    /// Same calendar month as today
    Month,
    /// Same calendar year as today
    Year,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::Week => date.iso_week() == today.iso_week(),
            Self::Month => date.year() == today.year() && date.month() == today.month(),
            Self::Year => date.year() == today.year(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All Time",
            Self::Week => "This Week",
            Self::Month => "This Month",
            Self::Year => "This Year",
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for DateRange {
    type Err = FairshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(Self::All),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(FairshareError::Validation(format!(
                "Unknown date range '{}': use all, week, month or year",
                other
            ))),
        }
    }
}

/// Which expenses to show, and in what order
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpenseFilter {
    pub category: Option<Category>,
    /// Only expenses this person paid for
    pub paid_by: Option<PersonId>,
    pub range: DateRange,
    pub sort: ExpenseSort,
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    fn narrows(&self) -> bool {
        self.category.is_some() || self.paid_by.is_some() || self.range != DateRange::All
    }

    pub fn matches(&self, expense: &Expense, today: NaiveDate) -> bool {
        self.category.map_or(true, |c| expense.category == c)
            && self.paid_by.map_or(true, |p| expense.paid_by == p)
            && self.range.contains(expense.date(), today)
    }
}

/// Expenses that happened on one day
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    pub date: NaiveDate,
    pub expenses: Vec<Expense>,
}

impl DayGroup {
    pub fn total(&self) -> Money {
        self.expenses.iter().map(|e| e.total_amount).sum()
    }
}

/// Group expenses by day (expense date, else creation date), newest day
/// first; each day keeps the incoming order
pub fn group_by_day(expenses: Vec<Expense>) -> Vec<DayGroup> {
    let mut groups: Vec<DayGroup> = Vec::new();
    for expense in expenses {
        let date = expense.date();
        match groups.iter_mut().find(|g| g.date == date) {
            Some(group) => group.expenses.push(expense),
            None => groups.push(DayGroup {
                date,
                expenses: vec![expense],
            }),
        }
    }
    groups.sort_by(|a, b| b.date.cmp(&a.date));
    groups
}

/// Service for expenses
pub struct ExpenseService<'a> {
    store: &'a dyn Store,
}

impl<'a> ExpenseService<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Validate a draft and submit it; invalid drafts never reach the store
    pub fn create(&self, draft: &ExpenseDraft) -> FairshareResult<Expense> {
        let expense = draft
            .validate()
            .map_err(|e| FairshareError::Validation(e.to_string()))?;
        debug!(title = %expense.title, method = ?expense.split_method, "submitting expense");
        self.store.create_expense(expense)
    }

    /// Every expense, newest first
    pub fn all(&self) -> FairshareResult<Vec<Expense>> {
        self.store.list_expenses(&ExpenseQuery::all())
    }

    /// Expenses matching `filter`, relative to `today`
    pub fn list(&self, filter: &ExpenseFilter, today: NaiveDate) -> FairshareResult<Vec<Expense>> {
        let query = ExpenseQuery::all().with_sort(filter.sort);

        if !filter.narrows() {
            return self.store.list_expenses(&query.with_limit(filter.limit));
        }

        let mut expenses: Vec<Expense> = self
            .store
            .list_expenses(&query)?
            .into_iter()
            .filter(|e| filter.matches(e, today))
            .collect();
        if let Some(limit) = filter.limit {
            expenses.truncate(limit);
        }
        Ok(expenses)
    }

    /// Filtered expenses grouped by day
    pub fn history(
        &self,
        filter: &ExpenseFilter,
        today: NaiveDate,
    ) -> FairshareResult<Vec<DayGroup>> {
        Ok(group_by_day(self.list(filter, today)?))
    }

    pub fn get(&self, id: ExpenseId) -> FairshareResult<Option<Expense>> {
        Ok(self.all()?.into_iter().find(|e| e.id == id))
    }

    pub fn require(&self, id: ExpenseId) -> FairshareResult<Expense> {
        self.get(id)?
            .ok_or_else(|| FairshareError::expense_not_found(id.to_string()))
    }

    /// Flip one participant's settlement flag and store the whole expense
    pub fn toggle_settlement(
        &self,
        id: ExpenseId,
        person_id: PersonId,
    ) -> FairshareResult<Expense> {
        let expense = self.require(id)?;
        let updated = ledger::toggle_settlement(&expense, person_id)?;
        self.store.update_expense(updated)
    }

    /// Set one participant's settlement flag and store the whole expense
    pub fn set_settlement(
        &self,
        id: ExpenseId,
        person_id: PersonId,
        settled: bool,
    ) -> FairshareResult<Expense> {
        let expense = self.require(id)?;
        let updated = ledger::set_settlement(&expense, person_id, settled)?;
        self.store.update_expense(updated)
    }
}
