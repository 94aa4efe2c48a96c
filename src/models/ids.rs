//! Strongly-typed ID wrappers for all entity types
//!
//! Identifiers are assigned by the store (sequential integers, matching the
//! REST backend's primary keys). The newtypes keep person and expense ids
//! from being mixed up at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw store identifier
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Get the raw store identifier
            pub const fn get(&self) -> u64 {
                self.0
            }

            /// The identifier that follows this one
            pub const fn next(&self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(PersonId, "p-");
define_id!(ExpenseId, "e-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(PersonId::new(7).to_string(), "p-7");
        assert_eq!(ExpenseId::new(12).to_string(), "e-12");
    }

    #[test]
    fn test_id_parse_with_and_without_prefix() {
        assert_eq!("p-7".parse::<PersonId>().unwrap(), PersonId::new(7));
        assert_eq!("7".parse::<PersonId>().unwrap(), PersonId::new(7));
        assert_eq!(" e-3 ".parse::<ExpenseId>().unwrap(), ExpenseId::new(3));
        assert!("Asha".parse::<PersonId>().is_err());
    }

    #[test]
    fn test_id_serializes_as_bare_integer() {
        let json = serde_json::to_string(&PersonId::new(42)).unwrap();
        assert_eq!(json, "42");

        let id: ExpenseId = serde_json::from_str("5").unwrap();
        assert_eq!(id.get(), 5);
    }

    #[test]
    fn test_next() {
        assert_eq!(PersonId::new(1).next(), PersonId::new(2));
    }
}
