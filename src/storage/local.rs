//! File-backed store
//!
//! Mirrors the REST backend's rules so both backends behave the same:
//! new expenses must name existing people, people referenced by an
//! expense cannot be deleted, and updates keep the original creation time.
//! Every write is saved immediately and appended to the audit log. A failed
//! audit append is logged; the saved record is still returned.

use chrono::Utc;
use tracing::{debug, warn};

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::FairsharePaths;
use crate::error::{FairshareError, FairshareResult};
use crate::models::{Expense, NewExpense, NewPerson, Person, PersonId, DEFAULT_AVATAR_COLOR};

use super::expenses::ExpenseRepository;
use super::people::PersonRepository;
use super::query::ExpenseQuery;
use super::{ExpenseStore, PeopleStore, Store};

/// People and expenses kept as JSON files under the data directory
pub struct LocalStore {
    paths: FairsharePaths,
    people: PersonRepository,
    expenses: ExpenseRepository,
    audit: AuditLogger,
}

impl LocalStore {
    /// Create the directories if needed and load both files
    pub fn open(paths: FairsharePaths) -> FairshareResult<Self> {
        paths.ensure_directories()?;

        let store = Self {
            people: PersonRepository::new(paths.people_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        };
        store.people.load()?;
        store.expenses.load()?;

        Ok(store)
    }

    pub fn paths(&self) -> &FairsharePaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    fn record(&self, entry: AuditEntry) {
        if let Err(e) = self.audit.log(&entry) {
            warn!(error = %e, entity = %entry.entity_id, "audit append failed");
        }
    }

    fn require_people(&self, expense: &NewExpense) -> FairshareResult<()> {
        if self.people.get(expense.paid_by)?.is_none() {
            return Err(FairshareError::Validation(
                "paid_by person does not exist".into(),
            ));
        }

        for share in &expense.participants {
            if self.people.get(share.person_id)?.is_none() {
                return Err(FairshareError::Validation(
                    "One or more participants do not exist".into(),
                ));
            }
        }

        Ok(())
    }
}

fn with_default_color(mut person: NewPerson) -> NewPerson {
    if person.avatar_color.is_none() {
        person.avatar_color = Some(DEFAULT_AVATAR_COLOR.to_string());
    }
    person
}

impl PeopleStore for LocalStore {
    fn list_people(&self) -> FairshareResult<Vec<Person>> {
        self.people.get_all()
    }

    fn create_person(&self, person: NewPerson) -> FairshareResult<Person> {
        let person = self.people.insert_new(with_default_color(person))?;
        self.people.save()?;
        debug!(id = %person.id, "person created");

        self.record(AuditEntry::create(
            EntityType::Person,
            person.id.to_string(),
            Some(person.name.clone()),
            &person,
        ));

        Ok(person)
    }

    fn update_person(&self, person: Person) -> FairshareResult<Person> {
        let id = person.id;
        let person = with_default_color(person.to_new()).into_person(id);

        let before = self
            .people
            .replace(person.clone())?
            .ok_or_else(|| FairshareError::person_not_found(id.to_string()))?;
        self.people.save()?;
        debug!(id = %id, "person updated");

        self.record(AuditEntry::update(
            EntityType::Person,
            id.to_string(),
            Some(person.name.clone()),
            &before,
            &person,
        ));

        Ok(person)
    }

    fn delete_person(&self, id: PersonId) -> FairshareResult<()> {
        if self.people.get(id)?.is_none() {
            return Err(FairshareError::person_not_found(id.to_string()));
        }

        if self.expenses.references(id)? {
            return Err(FairshareError::InUse {
                entity_type: "Person",
                reason: "this person is used in one or more expenses".into(),
            });
        }

        let removed = self
            .people
            .delete(id)?
            .ok_or_else(|| FairshareError::person_not_found(id.to_string()))?;
        self.people.save()?;
        debug!(id = %id, "person deleted");

        self.record(AuditEntry::delete(
            EntityType::Person,
            id.to_string(),
            Some(removed.name.clone()),
            &removed,
        ));

        Ok(())
    }
}

impl ExpenseStore for LocalStore {
    fn list_expenses(&self, query: &ExpenseQuery) -> FairshareResult<Vec<Expense>> {
        Ok(query.apply(self.expenses.get_all()?))
    }

    fn create_expense(&self, expense: NewExpense) -> FairshareResult<Expense> {
        self.require_people(&expense)?;

        let expense = self.expenses.insert_new(expense, Utc::now().naive_utc())?;
        self.expenses.save()?;
        debug!(id = %expense.id, participants = expense.participants.len(), "expense created");

        self.record(AuditEntry::create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.title.clone()),
            &expense,
        ));

        Ok(expense)
    }

    fn update_expense(&self, mut expense: Expense) -> FairshareResult<Expense> {
        let id = expense.id;
        let existing = self
            .expenses
            .get(id)?
            .ok_or_else(|| FairshareError::expense_not_found(id.to_string()))?;
        expense.created_date = existing.created_date;

        self.expenses.replace(expense.clone())?;
        self.expenses.save()?;
        debug!(id = %id, "expense updated");

        self.record(AuditEntry::update(
            EntityType::Expense,
            id.to_string(),
            Some(expense.title.clone()),
            &existing,
            &expense,
        ));

        Ok(expense)
    }
}

impl Store for LocalStore {
    fn describe(&self) -> String {
        format!("local {}", self.paths.data_dir().display())
    }
}
