//! Person model
//!
//! Someone who can pay for or share in an expense.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::PersonId;

/// Avatar colors offered to new people
pub const AVATAR_PALETTE: [&str; 8] = [
    "#10B981", "#3B82F6", "#8B5CF6", "#F59E0B", "#EF4444", "#EC4899", "#06B6D4", "#84CC16",
];

/// Color used when none is given
pub const DEFAULT_AVATAR_COLOR: &str = "#10B981";

/// A person as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier, assigned by the store
    pub id: PersonId,

    /// Display name
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Display color (`#RRGGBB`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_color: Option<String>,
}

impl Person {
    /// Color to draw this person with
    pub fn color(&self) -> &str {
        self.avatar_color.as_deref().unwrap_or(DEFAULT_AVATAR_COLOR)
    }

    /// First letter of the name, uppercased, or `?`
    pub fn initial(&self) -> char {
        self.name
            .trim()
            .chars()
            .next()
            .map(|c| c.to_uppercase().next().unwrap_or(c))
            .unwrap_or('?')
    }

    /// Normalize a name for matching
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Check if this person matches a name (case-insensitive)
    pub fn matches_name(&self, name: &str) -> bool {
        Self::normalize_name(&self.name) == Self::normalize_name(name)
    }

    /// The editable fields of this person
    pub fn to_new(&self) -> NewPerson {
        NewPerson {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            avatar_color: self.avatar_color.clone(),
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The fields submitted when creating or editing a person
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewPerson {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_color: Option<String>,
}

impl NewPerson {
    /// A person with just a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Trim whitespace and drop blank optional fields
    pub fn normalized(mut self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        self.name = self.name.trim().to_string();
        self.email = clean(self.email);
        self.phone = clean(self.phone);
        self.avatar_color = clean(self.avatar_color);
        self
    }

    /// Attach the identifier the store assigned
    pub fn into_person(self, id: PersonId) -> Person {
        Person {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            avatar_color: self.avatar_color,
        }
    }

    /// Validate the submitted fields
    pub fn validate(&self) -> Result<(), PersonValidationError> {
        if self.name.trim().is_empty() {
            return Err(PersonValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(PersonValidationError::NameTooLong(self.name.len()));
        }

        if let Some(email) = &self.email {
            let valid = email
                .split_once('@')
                .map(|(local, domain)| !local.is_empty() && domain.contains('.'))
                .unwrap_or(false);
            if !valid {
                return Err(PersonValidationError::InvalidEmail(email.clone()));
            }
        }

        if let Some(color) = &self.avatar_color {
            if !is_hex_color(color) {
                return Err(PersonValidationError::InvalidColor(color.clone()));
            }
        }

        Ok(())
    }
}

/// Pick a palette color for the `n`th person
pub fn palette_color(n: usize) -> &'static str {
    AVATAR_PALETTE[n % AVATAR_PALETTE.len()]
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .map(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
        .unwrap_or(false)
}

/// Validation errors for people
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidEmail(String),
    InvalidColor(String),
}

impl fmt::Display for PersonValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Please enter a name"),
            Self::NameTooLong(len) => write!(f, "Name too long ({} chars, max 100)", len),
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
            Self::InvalidColor(color) => {
                write!(f, "Invalid color '{}', expected #RRGGBB", color)
            }
        }
    }
}

impl std::error::Error for PersonValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation() {
        assert!(NewPerson::named("Asha").validate().is_ok());
        assert_eq!(
            NewPerson::named("   ").validate(),
            Err(PersonValidationError::EmptyName)
        );
        assert!(matches!(
            NewPerson::named("a".repeat(101)).validate(),
            Err(PersonValidationError::NameTooLong(101))
        ));

        let mut p = NewPerson::named("Asha");
        p.email = Some("asha-at-example".into());
        assert!(matches!(
            p.validate(),
            Err(PersonValidationError::InvalidEmail(_))
        ));

        p.email = Some("asha@example.com".into());
        p.avatar_color = Some("green".into());
        assert!(matches!(
            p.validate(),
            Err(PersonValidationError::InvalidColor(_))
        ));

        p.avatar_color = Some("#3b82f6".into());
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_normalized_drops_blank_fields() {
        let p = NewPerson {
            name: "  Ravi ".into(),
            email: Some("  ".into()),
            phone: Some(" 555-0101 ".into()),
            avatar_color: None,
        }
        .normalized();

        assert_eq!(p.name, "Ravi");
        assert_eq!(p.email, None);
        assert_eq!(p.phone.as_deref(), Some("555-0101"));
    }

    #[test]
    fn test_initial_and_color() {
        let person = NewPerson::named("meera").into_person(PersonId::new(1));
        assert_eq!(person.initial(), 'M');
        assert_eq!(person.color(), DEFAULT_AVATAR_COLOR);
        assert!(person.matches_name("MEERA "));
    }

    #[test]
    fn test_palette_wraps() {
        assert_eq!(palette_color(0), "#10B981");
        assert_eq!(palette_color(8), "#10B981");
        assert_eq!(palette_color(9), "#3B82F6");
    }

    #[test]
    fn test_wire_shape() {
        let person = NewPerson::named("Asha").into_person(PersonId::new(3));
        let json = serde_json::to_value(&person).unwrap();
        assert_eq!(json, serde_json::json!({"id": 3, "name": "Asha"}));

        let parsed: Person = serde_json::from_str(
            r##"{"id": 4, "name": "Ravi", "email": null, "phone": null,
                "avatar_color": "#EF4444"}"##,
        )
        .unwrap();
        assert_eq!(parsed.color(), "#EF4444");
        assert!(parsed.email.is_none());
    }
}
