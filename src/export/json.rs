//! JSON export
//!
//! Writes a versioned snapshot of people, expenses and the balances they
//! produce.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FairshareError, FairshareResult};
use crate::ledger::{self, ShareScope};
use crate::models::{Expense, Money, Person, PersonId};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// One person's balance in an export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceRecord {
    pub person_id: PersonId,
    pub name: String,
    pub balance: Money,
    /// Balance over unsettled shares only
    pub pending: Money,
}

/// Full export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub people: Vec<Person>,

    pub expenses: Vec<Expense>,

    pub balances: Vec<BalanceRecord>,

    pub total_spent: Money,
}

impl FullExport {
    /// Build an export from loaded data
    pub fn new(people: Vec<Person>, expenses: Vec<Expense>) -> Self {
        let balances = balance_records(&people, &expenses);
        let total_spent = expenses.iter().map(|e| e.total_amount).sum();

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            people,
            expenses,
            balances,
            total_spent,
        }
    }
}

/// Net and pending balance for every person
pub fn balance_records(people: &[Person], expenses: &[Expense]) -> Vec<BalanceRecord> {
    let all = ledger::compute_balances_for(people, expenses, ShareScope::All);
    let pending = ledger::compute_balances_for(people, expenses, ShareScope::Pending);

    all.iter()
        .map(|(person_id, balance)| BalanceRecord {
            person_id,
            name: crate::services::name_of(people, person_id),
            balance,
            pending: pending.get(person_id),
        })
        .collect()
}

/// Write the full export as JSON
pub fn write_full_json<W: Write>(
    export: &FullExport,
    writer: W,
    pretty: bool,
) -> FairshareResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, export)
    } else {
        serde_json::to_writer(writer, export)
    }
    .map_err(|e| FairshareError::Export(format!("Failed to write JSON: {}", e)))
}

/// Write only the balance records as a JSON array
pub fn write_balances_json<W: Write>(records: &[BalanceRecord], writer: W) -> FairshareResult<()> {
    serde_json::to_writer_pretty(writer, records)
        .map_err(|e| FairshareError::Export(format!("Failed to write JSON: {}", e)))
}
