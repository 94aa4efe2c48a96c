//! Person service
//!
//! Validation, lookup by id or name, palette color assignment, and the
//! referenced-person delete guard.

use tracing::warn;

use crate::error::{FairshareError, FairshareResult};
use crate::models::{palette_color, NewPerson, Person, PersonId};
use crate::storage::{ExpenseQuery, Store};

/// Service for people
pub struct PersonService<'a> {
    store: &'a dyn Store,
}

impl<'a> PersonService<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Every person, ordered by id
    pub fn list(&self) -> FairshareResult<Vec<Person>> {
        self.store.list_people()
    }

    pub fn get(&self, id: PersonId) -> FairshareResult<Option<Person>> {
        Ok(self.list()?.into_iter().find(|p| p.id == id))
    }

    /// Find a person by id (`p-3` or `3`) or by case-insensitive name
    pub fn find(&self, identifier: &str) -> FairshareResult<Option<Person>> {
        let people = self.list()?;
        Ok(find_in(&people, identifier).cloned())
    }

    /// Like [`find`](Self::find), but a miss is an error
    pub fn resolve(&self, identifier: &str) -> FairshareResult<Person> {
        self.find(identifier)?
            .ok_or_else(|| FairshareError::person_not_found(identifier))
    }

    /// Validate and create a person; people without a color get the next
    /// palette color
    pub fn create(&self, input: NewPerson) -> FairshareResult<Person> {
        let mut input = input.normalized();
        input
            .validate()
            .map_err(|e| FairshareError::Validation(e.to_string()))?;

        if input.avatar_color.is_none() {
            let existing = self.list()?.len();
            input.avatar_color = Some(palette_color(existing).to_string());
        }

        self.store.create_person(input)
    }

    /// Replace the editable fields of person `id`
    pub fn update(&self, id: PersonId, changes: NewPerson) -> FairshareResult<Person> {
        let changes = changes.normalized();
        changes
            .validate()
            .map_err(|e| FairshareError::Validation(e.to_string()))?;

        if self.get(id)?.is_none() {
            return Err(FairshareError::person_not_found(id.to_string()));
        }

        self.store.update_person(changes.into_person(id))
    }

    /// Delete a person that no expense refers to
    pub fn delete(&self, id: PersonId) -> FairshareResult<Person> {
        let person = self
            .get(id)?
            .ok_or_else(|| FairshareError::person_not_found(id.to_string()))?;

        let uses = self
            .store
            .list_expenses(&ExpenseQuery::all())?
            .iter()
            .filter(|e| e.involves(id))
            .count();
        if uses > 0 {
            warn!(id = %id, uses, "refusing to delete referenced person");
            return Err(FairshareError::InUse {
                entity_type: "Person",
                reason: format!(
                    "{} is used in {} expense{}",
                    person.name,
                    uses,
                    if uses == 1 { "" } else { "s" }
                ),
            });
        }

        self.store.delete_person(id)?;
        Ok(person)
    }
}

/// Look a person up in an already loaded list by id or name
pub fn find_in<'p>(people: &'p [Person], identifier: &str) -> Option<&'p Person> {
    if let Ok(id) = identifier.parse::<PersonId>() {
        if let Some(person) = people.iter().find(|p| p.id == id) {
            return Some(person);
        }
    }
    people.iter().find(|p| p.matches_name(identifier))
}

/// Display name for `id`, or the raw id when the person is gone
pub fn name_of(people: &[Person], id: PersonId) -> String {
    people
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FairsharePaths;
    use crate::models::{
        Category, Money, NewExpense, ParticipantShare, AVATAR_PALETTE, DEFAULT_CURRENCY,
    };
    use crate::storage::{ExpenseStore, LocalStore, PeopleStore};
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, LocalStore) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FairsharePaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = LocalStore::open(paths).unwrap();
        (temp_dir, store)
    }

    #[test]
    fn test_create_assigns_palette_colors_in_turn() {
        let (_temp, store) = create_test_store();
        let service = PersonService::new(&store);

        let asha = service.create(NewPerson::named("  Asha ")).unwrap();
        let ravi = service.create(NewPerson::named("Ravi")).unwrap();

        assert_eq!(asha.name, "Asha");
        assert_eq!(asha.avatar_color.as_deref(), Some(AVATAR_PALETTE[0]));
        assert_eq!(ravi.avatar_color.as_deref(), Some(AVATAR_PALETTE[1]));
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let (_temp, store) = create_test_store();
        let service = PersonService::new(&store);

        let err = service.create(NewPerson::named("   ")).unwrap_err();
        assert!(err.is_validation());
        assert!(store.list_people().unwrap().is_empty());
    }

    #[test]
    fn test_create_rejects_bad_color() {
        let (_temp, store) = create_test_store();
        let service = PersonService::new(&store);

        let mut input = NewPerson::named("Asha");
        input.avatar_color = Some("green".into());
        assert!(service.create(input).unwrap_err().is_validation());
    }

    #[test]
    fn test_find_by_id_or_name() {
        let (_temp, store) = create_test_store();
        let service = PersonService::new(&store);
        let asha = service.create(NewPerson::named("Asha")).unwrap();

        assert_eq!(service.find("p-1").unwrap(), Some(asha.clone()));
        assert_eq!(service.find("1").unwrap(), Some(asha.clone()));
        assert_eq!(service.find("ASHA").unwrap(), Some(asha));
        assert!(service.find("Ravi").unwrap().is_none());
        assert!(service.resolve("Ravi").unwrap_err().is_not_found());
    }

    #[test]
    fn test_numeric_name_falls_back_to_name_match() {
        let (_temp, store) = create_test_store();
        let service = PersonService::new(&store);
        let odd = service.create(NewPerson::named("42")).unwrap();

        assert_eq!(service.find("42").unwrap(), Some(odd));
    }

    #[test]
    fn test_update() {
        let (_temp, store) = create_test_store();
        let service = PersonService::new(&store);
        let asha = service.create(NewPerson::named("Asha")).unwrap();

        let mut changes = asha.to_new();
        changes.email = Some("asha@example.com".into());
        let updated = service.update(asha.id, changes).unwrap();

        assert_eq!(updated.email.as_deref(), Some("asha@example.com"));
        assert_eq!(updated.avatar_color, asha.avatar_color);
        assert!(service
            .update(PersonId::new(9), NewPerson::named("Ghost"))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_delete_referenced_person_is_refused() {
        let (_temp, store) = create_test_store();
        let service = PersonService::new(&store);
        let asha = service.create(NewPerson::named("Asha")).unwrap();
        let ravi = service.create(NewPerson::named("Ravi")).unwrap();
        let meera = service.create(NewPerson::named("Meera")).unwrap();
        store
            .create_expense(NewExpense {
                title: "Cab".into(),
                description: None,
                total_amount: Money::new(200.0),
                currency: DEFAULT_CURRENCY.into(),
                paid_by: asha.id,
                split_method: None,
                category: Category::Transport,
                expense_date: None,
                participants: vec![ParticipantShare::new(ravi.id, Money::new(200.0))],
            })
            .unwrap();

        let err = service.delete(ravi.id).unwrap_err();
        assert_eq!(err.to_string(), "Person is in use: Ravi is used in 1 expense");

        let deleted = service.delete(meera.id).unwrap();
        assert_eq!(deleted.name, "Meera");
        assert_eq!(service.list().unwrap().len(), 2);
    }

    #[test]
    fn test_name_of_missing_person() {
        assert_eq!(name_of(&[], PersonId::new(4)), "p-4");
    }
}
