//! Storage layer for fairshare
//!
//! Two interchangeable backends sit behind the [`PeopleStore`] and
//! [`ExpenseStore`] traits:
//!
//! - [`LocalStore`]: JSON files with atomic writes and an audit log
//! - [`HttpStore`]: the REST service (`/people/`, `/expenses/`)
//!
//! Services only see `&dyn Store`, so every operation is one round trip and
//! the caller reloads whatever list it needs afterwards.

pub mod expenses;
pub mod file_io;
pub mod local;
pub mod people;
pub mod query;
pub mod remote;

pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use local::LocalStore;
pub use people::PersonRepository;
pub use query::{ExpenseQuery, ExpenseSort, SortField};
pub use remote::HttpStore;

use tracing::debug;

use crate::config::{Backend, FairsharePaths, Settings};
use crate::error::FairshareResult;
use crate::models::{Expense, NewExpense, NewPerson, Person, PersonId};

/// List / create / update / delete over people
pub trait PeopleStore {
    /// Every person, ordered by id
    fn list_people(&self) -> FairshareResult<Vec<Person>>;

    fn create_person(&self, person: NewPerson) -> FairshareResult<Person>;

    /// Overwrite the editable fields of an existing person
    fn update_person(&self, person: Person) -> FairshareResult<Person>;

    fn delete_person(&self, id: PersonId) -> FairshareResult<()>;
}

/// List / create / update over expenses
pub trait ExpenseStore {
    fn list_expenses(&self, query: &ExpenseQuery) -> FairshareResult<Vec<Expense>>;

    fn create_expense(&self, expense: NewExpense) -> FairshareResult<Expense>;

    /// Replace an expense wholesale; the creation time is kept by the store
    fn update_expense(&self, expense: Expense) -> FairshareResult<Expense>;
}

/// Both resources behind one handle
pub trait Store: PeopleStore + ExpenseStore {
    /// Short label for logs and `fairshare config`
    fn describe(&self) -> String;
}

/// Open the backend chosen in settings
pub fn open_store(paths: &FairsharePaths, settings: &Settings) -> FairshareResult<Box<dyn Store>> {
    match settings.backend {
        Backend::Local => {
            let store = LocalStore::open(paths.clone())?;
            debug!(store = %store.describe(), "opened local store");
            Ok(Box::new(store))
        }
        Backend::Remote => {
            let store = HttpStore::new(&settings.api_url, settings.request_timeout_secs)?;
            debug!(store = %store.describe(), "using remote store");
            Ok(Box::new(store))
        }
    }
}
