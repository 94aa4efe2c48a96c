//! Expense model
//!
//! An expense is paid by one person and shared between participants, each
//! with an owed amount and an independent settlement flag. The serialized
//! shape follows the REST backend's `ExpenseOut` record.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::{deserialize_lenient, Category};
use super::ids::{ExpenseId, PersonId};
use super::money::Money;

/// Currency tag used when none is given
pub const DEFAULT_CURRENCY: &str = "INR";

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// How the owed amounts of an expense were produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SplitMethod {
    #[default]
    Equal,
    Custom,
}

impl fmt::Display for SplitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "equal"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

/// One person's portion of an expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantShare {
    pub person_id: PersonId,

    /// What this participant owes the payer
    #[serde(default)]
    pub amount_owed: Money,

    #[serde(default)]
    pub is_settled: bool,
}

impl ParticipantShare {
    /// A pending share
    pub fn new(person_id: PersonId, amount_owed: Money) -> Self {
        Self {
            person_id,
            amount_owed,
            is_settled: false,
        }
    }
}

/// A shared expense as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier, assigned by the store
    pub id: ExpenseId,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub total_amount: Money,

    #[serde(default = "default_currency")]
    pub currency: String,

    /// Who fronted the money
    pub paid_by: PersonId,

    #[serde(default)]
    pub split_method: Option<SplitMethod>,

    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub category: Category,

    #[serde(default)]
    pub expense_date: Option<NaiveDate>,

    /// When the record was created (UTC, no offset on the wire)
    pub created_date: NaiveDateTime,

    /// Ordered participant shares
    #[serde(default)]
    pub participants: Vec<ParticipantShare>,
}

impl Expense {
    /// The date the expense happened, falling back to when it was recorded
    pub fn date(&self) -> NaiveDate {
        self.expense_date.unwrap_or_else(|| self.created_date.date())
    }

    /// Number of participant shares
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Number of shares marked as settled
    pub fn settled_count(&self) -> usize {
        self.participants.iter().filter(|p| p.is_settled).count()
    }

    /// True when there is at least one share and every share is settled
    pub fn is_fully_settled(&self) -> bool {
        !self.participants.is_empty() && self.settled_count() == self.participants.len()
    }

    /// Sum of every owed amount
    pub fn shares_total(&self) -> Money {
        self.participants.iter().map(|p| p.amount_owed).sum()
    }

    /// Whether the owed amounts add up to the total (within 0.01)
    pub fn is_balanced(&self) -> bool {
        self.shares_total().approx_eq(self.total_amount)
    }

    /// The first share belonging to `person_id`
    pub fn share_for(&self, person_id: PersonId) -> Option<&ParticipantShare> {
        self.participants.iter().find(|p| p.person_id == person_id)
    }

    /// Whether `person_id` paid for or shares in this expense
    pub fn involves(&self, person_id: PersonId) -> bool {
        self.paid_by == person_id || self.participants.iter().any(|p| p.person_id == person_id)
    }

    /// The fields a client submits for this expense
    pub fn to_new(&self) -> NewExpense {
        NewExpense {
            title: self.title.clone(),
            description: self.description.clone(),
            total_amount: self.total_amount,
            currency: self.currency.clone(),
            paid_by: self.paid_by,
            split_method: self.split_method,
            category: self.category,
            expense_date: self.expense_date,
            participants: self.participants.clone(),
        }
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date().format("%Y-%m-%d"),
            self.title,
            self.total_amount,
            self.currency
        )
    }
}

/// The fields submitted when creating an expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub total_amount: Money,

    #[serde(default = "default_currency")]
    pub currency: String,

    pub paid_by: PersonId,

    #[serde(default)]
    pub split_method: Option<SplitMethod>,

    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub category: Category,

    #[serde(default)]
    pub expense_date: Option<NaiveDate>,

    pub participants: Vec<ParticipantShare>,
}

impl NewExpense {
    /// Attach the identifier and creation time the store assigned
    pub fn into_expense(self, id: ExpenseId, created_date: NaiveDateTime) -> Expense {
        Expense {
            id,
            title: self.title,
            description: self.description,
            total_amount: self.total_amount,
            currency: self.currency,
            paid_by: self.paid_by,
            split_method: self.split_method,
            category: self.category,
            expense_date: self.expense_date,
            created_date,
            participants: self.participants,
        }
    }
}

/// Reasons an expense form cannot be submitted
#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseValidationError {
    MissingTitle,
    InvalidTotal(String),
    MissingPayer,
    NoParticipants,
    NegativeShare(PersonId),
    SplitMismatch { entered: Money, total: Money },
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTitle => write!(f, "Please enter a title."),
            Self::InvalidTotal(raw) => {
                write!(f, "Enter a valid total amount (got '{}').", raw)
            }
            Self::MissingPayer => write!(f, "Select who paid."),
            Self::NoParticipants => write!(f, "Select at least one person to split with."),
            Self::NegativeShare(person) => {
                write!(f, "Amount owed by {} cannot be negative.", person)
            }
            Self::SplitMismatch { entered, total } => write!(
                f,
                "Custom split ({}) does not match total ({}).",
                entered, total
            ),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
