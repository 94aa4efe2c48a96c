//! Export module for fairshare
//!
//! Writes expenses or balances to a file:
//! - CSV: one row per participant share, or one row per person
//! - JSON: a versioned snapshot, or the balance records alone

pub mod csv;
pub mod json;

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use tracing::info;

use crate::error::{FairshareError, FairshareResult};
use crate::ledger::{self, ShareScope};
use crate::models::{Expense, Person};

pub use self::csv::{write_balances_csv, write_expenses_csv};
pub use json::{
    balance_records, write_balances_json, write_full_json, BalanceRecord, FullExport,
    EXPORT_SCHEMA_VERSION,
};

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl FromStr for ExportFormat {
    type Err = FairshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(FairshareError::Export(format!(
                "Unknown format '{}'. Use csv or json",
                other
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// What to export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTarget {
    Expenses,
    Balances,
}

impl FromStr for ExportTarget {
    type Err = FairshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expenses" => Ok(Self::Expenses),
            "balances" => Ok(Self::Balances),
            other => Err(FairshareError::Export(format!(
                "Unknown export target '{}'. Use expenses or balances",
                other
            ))),
        }
    }
}

impl fmt::Display for ExportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expenses => write!(f, "expenses"),
            Self::Balances => write!(f, "balances"),
        }
    }
}

/// Write `target` in `format` to any writer
pub fn export_to_writer<W: Write>(
    people: Vec<Person>,
    expenses: Vec<Expense>,
    target: ExportTarget,
    format: ExportFormat,
    writer: W,
) -> FairshareResult<()> {
    match (target, format) {
        (ExportTarget::Expenses, ExportFormat::Csv) => {
            write_expenses_csv(&people, &expenses, writer)
        }
        (ExportTarget::Expenses, ExportFormat::Json) => {
            write_full_json(&FullExport::new(people, expenses), writer, true)
        }
        (ExportTarget::Balances, ExportFormat::Csv) => {
            let balances = ledger::compute_balances_for(&people, &expenses, ShareScope::All);
            write_balances_csv(&people, &balances, writer)
        }
        (ExportTarget::Balances, ExportFormat::Json) => {
            write_balances_json(&balance_records(&people, &expenses), writer)
        }
    }
}

/// Write `target` in `format` to the file at `path`, replacing it
pub fn export_to_path(
    people: Vec<Person>,
    expenses: Vec<Expense>,
    target: ExportTarget,
    format: ExportFormat,
    path: &Path,
) -> FairshareResult<()> {
    let file = File::create(path).map_err(|e| {
        FairshareError::Export(format!("Failed to create {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    export_to_writer(people, expenses, target, format, &mut writer)?;
    writer
        .flush()
        .map_err(|e| FairshareError::Export(format!("Failed to write {}: {}", path.display(), e)))?;

    info!(path = %path.display(), %target, %format, "exported");
    Ok(())
}
