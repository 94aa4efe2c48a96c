//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDateTime;

use crate::error::FairshareError;
use crate::models::{Expense, ExpenseId, NewExpense, PersonId};

use super::file_io::{read_json, write_json_atomic};

/// On-disk layout of expenses.json
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    #[serde(default)]
    next_id: u64,
    expenses: Vec<Expense>,
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, Expense>>,
    next_id: RwLock<ExpenseId>,
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            next_id: RwLock::new(ExpenseId::new(1)),
        }
    }

    /// Load expenses from disk
    pub fn load(&self) -> Result<(), FairshareError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut next_id = self.next_id.write().map_err(|e| {
            FairshareError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut data = self.data.write().map_err(|e| {
            FairshareError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        let highest = file_data
            .expenses
            .iter()
            .map(|e| e.id.get())
            .max()
            .unwrap_or(0);
        for expense in file_data.expenses {
            data.insert(expense.id, expense);
        }
        *next_id = ExpenseId::new(file_data.next_id.max(highest + 1));

        Ok(())
    }

    /// Save expenses to disk, ordered by id
    pub fn save(&self) -> Result<(), FairshareError> {
        let mut expenses = self.get_all()?;
        expenses.sort_by_key(|e| e.id);
        let next_id = *self.next_id.read().map_err(|e| {
            FairshareError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let file_data = ExpenseData {
            next_id: next_id.get(),
            expenses,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, FairshareError> {
        let data = self.data.read().map_err(|e| {
            FairshareError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// All expenses, in no particular order
    pub fn get_all(&self) -> Result<Vec<Expense>, FairshareError> {
        let data = self.data.read().map_err(|e| {
            FairshareError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.values().cloned().collect())
    }

    /// Assign the next id and creation time, then insert
    pub fn insert_new(
        &self,
        new_expense: NewExpense,
        created_date: NaiveDateTime,
    ) -> Result<Expense, FairshareError> {
        let mut next_id = self.next_id.write().map_err(|e| {
            FairshareError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut data = self.data.write().map_err(|e| {
            FairshareError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let expense = new_expense.into_expense(*next_id, created_date);
        *next_id = next_id.next();
        data.insert(expense.id, expense.clone());
        Ok(expense)
    }

    /// Replace an existing expense, returning the previous record
    pub fn replace(&self, expense: Expense) -> Result<Option<Expense>, FairshareError> {
        let mut data = self.data.write().map_err(|e| {
            FairshareError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        match data.get_mut(&expense.id) {
            Some(slot) => Ok(Some(std::mem::replace(slot, expense))),
            None => Ok(None),
        }
    }

    /// Whether any expense names this person as payer or participant
    pub fn references(&self, person_id: PersonId) -> Result<bool, FairshareError> {
        let data = self.data.read().map_err(|e| {
            FairshareError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.values().any(|e| e.involves(person_id)))
    }

    pub fn count(&self) -> Result<usize, FairshareError> {
        let data = self.data.read().map_err(|e| {
            FairshareError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }
}
