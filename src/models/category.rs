//! Expense categories
//!
//! A fixed, enumerated set. Serialized in lowercase to match the REST
//! backend's `category` column.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of thing an expense was spent on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Transport,
    Accommodation,
    Entertainment,
    Shopping,
    Utilities,
    #[default]
    Other,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Transport,
        Category::Accommodation,
        Category::Entertainment,
        Category::Shopping,
        Category::Utilities,
        Category::Other,
    ];

    /// Wire name (lowercase)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Transport => "transport",
            Self::Accommodation => "accommodation",
            Self::Entertainment => "entertainment",
            Self::Shopping => "shopping",
            Self::Utilities => "utilities",
            Self::Other => "other",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Food => "Food & Drinks",
            Self::Transport => "Transport",
            Self::Accommodation => "Accommodation",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Utilities => "Utilities",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == needle || c.label().to_lowercase() == needle)
            .ok_or_else(|| {
                format!(
                    "Unknown category '{}'. Expected one of: {}",
                    s,
                    Self::ALL
                        .iter()
                        .map(|c| c.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

/// Deserialize a category that may be missing, null, or unknown
///
/// The backend stores categories as free text; anything unrecognised is
/// filed under [`Category::Other`].
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Category, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|value| value.parse::<Category>().ok())
        .unwrap_or_default())
}
