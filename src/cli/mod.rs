//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod balance;
pub mod expense;
pub mod export;
pub mod person;

pub use audit::handle_audit_command;
pub use balance::{handle_balance_command, handle_stats_command, BalanceArgs};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportArgs};
pub use person::{handle_person_command, PersonCommands};
