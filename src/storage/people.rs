//! Person repository for JSON storage
//!
//! Manages loading and saving people to people.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FairshareError;
use crate::models::{NewPerson, Person, PersonId};

use super::file_io::{read_json, write_json_atomic};

/// On-disk layout of people.json
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct PeopleData {
    #[serde(default)]
    next_id: u64,
    people: Vec<Person>,
}

/// Repository for person persistence
pub struct PersonRepository {
    path: PathBuf,
    data: RwLock<HashMap<PersonId, Person>>,
    next_id: RwLock<PersonId>,
}

impl PersonRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            next_id: RwLock::new(PersonId::new(1)),
        }
    }

    /// Load people from disk
    pub fn load(&self) -> Result<(), FairshareError> {
        let file_data: PeopleData = read_json(&self.path)?;

        let mut next_id = self.next_id.write().map_err(|e| {
            FairshareError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut data = self.data.write().map_err(|e| {
            FairshareError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        let highest = file_data.people.iter().map(|p| p.id.get()).max().unwrap_or(0);
        for person in file_data.people {
            data.insert(person.id, person);
        }

        // Never hand out an id at or below one already on disk
        *next_id = PersonId::new(file_data.next_id.max(highest + 1));

        Ok(())
    }

    /// Save people to disk, ordered by id
    pub fn save(&self) -> Result<(), FairshareError> {
        let people = self.get_all()?;
        let next_id = *self.next_id.read().map_err(|e| {
            FairshareError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let file_data = PeopleData {
            next_id: next_id.get(),
            people,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: PersonId) -> Result<Option<Person>, FairshareError> {
        let data = self.data.read().map_err(|e| {
            FairshareError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// All people, ordered by id
    pub fn get_all(&self) -> Result<Vec<Person>, FairshareError> {
        let data = self.data.read().map_err(|e| {
            FairshareError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut people: Vec<_> = data.values().cloned().collect();
        people.sort_by_key(|p| p.id);
        Ok(people)
    }

    /// Assign the next id and insert
    pub fn insert_new(&self, new_person: NewPerson) -> Result<Person, FairshareError> {
        let mut next_id = self.next_id.write().map_err(|e| {
            FairshareError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut data = self.data.write().map_err(|e| {
            FairshareError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let person = new_person.into_person(*next_id);
        *next_id = next_id.next();
        data.insert(person.id, person.clone());
        Ok(person)
    }

    /// Replace an existing person, returning the previous record
    pub fn replace(&self, person: Person) -> Result<Option<Person>, FairshareError> {
        let mut data = self.data.write().map_err(|e| {
            FairshareError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        match data.get_mut(&person.id) {
            Some(slot) => Ok(Some(std::mem::replace(slot, person))),
            None => Ok(None),
        }
    }

    /// Remove a person, returning it if it existed
    pub fn delete(&self, id: PersonId) -> Result<Option<Person>, FairshareError> {
        let mut data = self.data.write().map_err(|e| {
            FairshareError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(data.remove(&id))
    }

    pub fn count(&self) -> Result<usize, FairshareError> {
        let data = self.data.read().map_err(|e| {
            FairshareError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }
}
