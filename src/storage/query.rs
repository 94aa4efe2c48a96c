//! Expense listing order
//!
//! The sort key uses the REST backend's syntax: a field name, optionally
//! prefixed with `-` for descending order (`-created_date`). Unknown field
//! names fall back to `created_date` and keep the requested direction.
//! Descending order puts missing values last; ascending puts them first.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::Expense;

/// Field an expense listing can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    CreatedDate,
    ExpenseDate,
    TotalAmount,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedDate => "created_date",
            Self::ExpenseDate => "expense_date",
            Self::TotalAmount => "total_amount",
        }
    }

    fn from_name(name: &str) -> Self {
        match name.trim() {
            "expense_date" => Self::ExpenseDate,
            "total_amount" => Self::TotalAmount,
            _ => Self::CreatedDate,
        }
    }
}

/// A field plus direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpenseSort {
    pub field: SortField,
    pub descending: bool,
}

impl Default for ExpenseSort {
    /// Newest first
    fn default() -> Self {
        Self {
            field: SortField::CreatedDate,
            descending: true,
        }
    }
}

impl ExpenseSort {
    pub fn descending(field: SortField) -> Self {
        Self {
            field,
            descending: true,
        }
    }

    pub fn ascending(field: SortField) -> Self {
        Self {
            field,
            descending: false,
        }
    }

    /// Compare two expenses under this ordering
    pub fn compare(&self, a: &Expense, b: &Expense) -> Ordering {
        let ordering = match self.field {
            SortField::CreatedDate => a.created_date.cmp(&b.created_date),
            SortField::TotalAmount => a
                .total_amount
                .value()
                .partial_cmp(&b.total_amount.value())
                .unwrap_or(Ordering::Equal),
            SortField::ExpenseDate => match (a.expense_date, b.expense_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (None, None) => Ordering::Equal,
                // Missing dates sort as the smallest value, so they come
                // first ascending and (after reversal) last descending.
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
            },
        };

        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }

    /// Sort in place; ties keep their incoming order
    pub fn apply(&self, expenses: &mut [Expense]) {
        expenses.sort_by(|a, b| self.compare(a, b));
    }
}

impl fmt::Display for ExpenseSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "-{}", self.field.as_str())
        } else {
            write!(f, "{}", self.field.as_str())
        }
    }
}

impl FromStr for ExpenseSort {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::default());
        }
        Ok(match s.strip_prefix('-') {
            Some(field) => Self::descending(SortField::from_name(field)),
            None => Self::ascending(SortField::from_name(s)),
        })
    }
}

/// Parameters of an expense listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExpenseQuery {
    pub sort: ExpenseSort,
    pub limit: Option<usize>,
}

impl ExpenseQuery {
    /// Everything, newest first
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_sort(mut self, sort: ExpenseSort) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Order and truncate an already loaded list
    pub fn apply(&self, mut expenses: Vec<Expense>) -> Vec<Expense> {
        self.sort.apply(&mut expenses);
        if let Some(limit) = self.limit {
            expenses.truncate(limit);
        }
        expenses
    }
}
