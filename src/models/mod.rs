//! Core data models for fairshare
//!
//! This module contains the data structures that represent the expense
//! splitting domain: people, expenses, participant shares and amounts.

pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod person;

pub use category::Category;
pub use expense::{
    Expense, ExpenseValidationError, NewExpense, ParticipantShare, SplitMethod, DEFAULT_CURRENCY,
};
pub use ids::{ExpenseId, PersonId};
pub use money::{Money, MoneyParseError, EPSILON};
pub use person::{
    palette_color, NewPerson, Person, PersonValidationError, AVATAR_PALETTE, DEFAULT_AVATAR_COLOR,
};
