//! Service layer for fairshare
//!
//! Services sit between the CLI and a store: they validate input before
//! anything is submitted, resolve people by id or name, and feed loaded
//! data into the ledger computations.

pub mod balance;
pub mod expense;
pub mod person;

pub use balance::{BalanceService, BalanceSheet, DashboardStats};
pub use expense::{group_by_day, DateRange, DayGroup, ExpenseDraft, ExpenseFilter, ExpenseService};
pub use person::{find_in, name_of, PersonService};
