//! Derived presentation state
//!
//! Everything in here is recomputed from the catalog and the two user inputs
//! (genre selection and search term); nothing is stored that cannot be derived.

use super::layout::SlotKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Value of the genre selector that disables filtering
pub const ALL_GENRES: &str = "all";

/// Current genre selection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenreFilter {
    #[default]
    All,
    Genre(String),
}

impl GenreFilter {
    /// Interpret a selector value; `"all"` and the empty string mean no filter
    pub fn from_selector(value: &str) -> Self {
        if value.is_empty() || value == ALL_GENRES {
            Self::All
        } else {
            Self::Genre(value.to_string())
        }
    }

    /// Whether a slot of `genre` is excluded by this filter
    pub fn excludes(&self, genre: &str) -> bool {
        match self {
            Self::All => false,
            Self::Genre(selected) => selected != genre,
        }
    }
}

impl fmt::Display for GenreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_GENRES),
            Self::Genre(genre) => f.write_str(genre),
        }
    }
}

/// Dimmed slots and highlighted books for the current inputs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub selected_genre: GenreFilter,
    /// Normalized term (trimmed, lowercase)
    pub search_term: String,
    pub dimmed: BTreeSet<SlotKey>,
    /// Ids of highlighted books
    pub highlighted: BTreeSet<String>,
}

impl ViewState {
    pub fn is_dimmed(&self, key: SlotKey) -> bool {
        self.dimmed.contains(&key)
    }

    pub fn is_highlighted(&self, book_id: &str) -> bool {
        self.highlighted.contains(book_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_values() {
        assert_eq!(GenreFilter::from_selector("all"), GenreFilter::All);
        assert_eq!(GenreFilter::from_selector(""), GenreFilter::All);
        assert_eq!(
            GenreFilter::from_selector("Fiction"),
            GenreFilter::Genre("Fiction".into())
        );
    }

    #[test]
    fn test_excludes() {
        let fiction = GenreFilter::Genre("Fiction".into());
        assert!(fiction.excludes("History"));
        assert!(!fiction.excludes("Fiction"));
        assert!(!GenreFilter::All.excludes("History"));
    }
}
