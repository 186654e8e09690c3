//! Catalog index
//!
//! Builds the in-memory catalog (slot -> genre + ordered books) from the JSON
//! payload served by the backend. The payload is untrusted: anything that does
//! not fit the expected shape is skipped with a warning, never propagated.

use super::layout::SlotKey;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Author shown when a record has none
pub const UNKNOWN_AUTHOR: &str = "Unknown";

// Accepted spellings for each payload field (canonical name first)
const GENRE_FIELDS: &[&str] = &["genre", "genero"];
const BOOKS_FIELDS: &[&str] = &["books", "libros"];
const ID_FIELDS: &[&str] = &["id", "id_libro"];
const TITLE_FIELDS: &[&str] = &["title", "titulo"];
const AUTHOR_FIELDS: &[&str] = &["author", "autor"];

/// A single book on a shelf
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: String,
    pub title: String,
    pub author: Option<String>,
}

impl BookRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>, author: Option<&str>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string),
        }
    }

    /// Author, or "Unknown" when absent
    pub fn author_or_default(&self) -> &str {
        self.author.as_deref().unwrap_or(UNKNOWN_AUTHOR)
    }
}

/// Contents of one shelf slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRecord {
    pub genre: String,
    pub books: Vec<BookRecord>,
}

/// Slot -> record mapping for one page load
///
/// Rebuilt wholesale on every fetch; never patched in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    slots: BTreeMap<SlotKey, SlotRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw response body. Unparseable text yields an empty catalog.
    pub fn from_json(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                log::warn!("catalog payload is not valid JSON: {}", e);
                Self::new()
            }
        }
    }

    /// Build the catalog from a decoded payload, skipping malformed entries
    pub fn from_value(value: &Value) -> Self {
        let Some(entries) = value.as_object() else {
            log::warn!("catalog payload is not an object, ignoring it");
            return Self::new();
        };

        let mut catalog = Self::new();
        let mut seen_ids = HashSet::new();

        for (raw_key, entry) in entries {
            let key = match raw_key.parse::<SlotKey>() {
                Ok(key) => key,
                Err(e) => {
                    log::warn!("skipping catalog entry: {}", e);
                    continue;
                }
            };

            let Some(record) = parse_slot(raw_key, entry, &mut seen_ids) else {
                continue;
            };
            catalog.slots.insert(key, record);
        }

        log::debug!(
            "catalog built: {} slots, {} books",
            catalog.slots.len(),
            catalog.book_count()
        );
        catalog
    }

    /// Insert or replace a slot record (used when building catalogs by hand)
    pub fn insert(&mut self, key: SlotKey, record: SlotRecord) {
        self.slots.insert(key, record);
    }

    pub fn get(&self, key: SlotKey) -> Option<&SlotRecord> {
        self.slots.get(&key)
    }

    pub fn slots(&self) -> impl Iterator<Item = (SlotKey, &SlotRecord)> {
        self.slots.iter().map(|(key, record)| (*key, record))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn book_count(&self) -> usize {
        self.slots.values().map(|slot| slot.books.len()).sum()
    }

    /// Sorted, deduplicated genres present in the catalog
    pub fn genres(&self) -> Vec<String> {
        self.slots
            .values()
            .map(|slot| slot.genre.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Locate a book and the slot holding it
    pub fn find_book(&self, id: &str) -> Option<(SlotKey, &BookRecord)> {
        self.slots.iter().find_map(|(key, slot)| {
            slot.books
                .iter()
                .find(|book| book.id == id)
                .map(|book| (*key, book))
        })
    }
}

fn field<'a>(object: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| object.get(*name))
}

fn parse_slot(raw_key: &str, entry: &Value, seen_ids: &mut HashSet<String>) -> Option<SlotRecord> {
    let Some(object) = entry.as_object() else {
        log::warn!("skipping slot {}: entry is not an object", raw_key);
        return None;
    };

    let Some(genre) = field(object, GENRE_FIELDS).and_then(Value::as_str) else {
        log::warn!("skipping slot {}: missing genre", raw_key);
        return None;
    };

    let Some(raw_books) = field(object, BOOKS_FIELDS).and_then(Value::as_array) else {
        log::warn!("skipping slot {}: missing book list", raw_key);
        return None;
    };

    let books = raw_books
        .iter()
        .filter_map(|raw| parse_book(raw_key, raw))
        .filter(|book| {
            let fresh = seen_ids.insert(book.id.clone());
            if !fresh {
                log::warn!("skipping duplicate book id {} in slot {}", book.id, raw_key);
            }
            fresh
        })
        .collect();

    Some(SlotRecord {
        genre: genre.to_string(),
        books,
    })
}

fn parse_book(raw_key: &str, raw: &Value) -> Option<BookRecord> {
    let object = raw.as_object()?;

    let id = match field(object, ID_FIELDS) {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => {
            log::warn!("skipping book without id in slot {}", raw_key);
            return None;
        }
    };

    let Some(title) = field(object, TITLE_FIELDS).and_then(Value::as_str) else {
        log::warn!("skipping book {} without title in slot {}", id, raw_key);
        return None;
    };

    let author = field(object, AUTHOR_FIELDS).and_then(Value::as_str);

    Some(BookRecord::new(id, title, author))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builds_catalog_and_genres() {
        let payload = json!({
            "0-0": {"genre": "Fiction", "books": [{"id": "1", "title": "Dune", "author": "Herbert"}]},
            "0-1": {"genre": "History", "books": []},
            "1-0": {"genre": "Fiction", "books": [{"id": "2", "title": "Emma"}]}
        });

        let catalog = Catalog::from_value(&payload);

        assert_eq!(catalog.slots().count(), 3);
        assert_eq!(catalog.book_count(), 2);
        assert_eq!(catalog.genres(), vec!["Fiction", "History"]);

        let (slot, book) = catalog.find_book("2").unwrap();
        assert_eq!(slot, SlotKey::new(1, 0));
        assert_eq!(book.author_or_default(), UNKNOWN_AUTHOR);
    }

    #[test]
    fn test_accepts_backend_field_names() {
        let payload = json!({
            "2-4": {"genero": "Poesía", "libros": [{"id_libro": 17, "titulo": "Ficciones", "autor": "Borges"}]}
        });

        let catalog = Catalog::from_value(&payload);
        let slot = catalog.get(SlotKey::new(2, 4)).unwrap();

        assert_eq!(slot.genre, "Poesía");
        assert_eq!(slot.books, vec![BookRecord::new("17", "Ficciones", Some("Borges"))]);
    }

    #[test]
    fn test_skips_malformed_entries() {
        let payload = json!({
            "oops": {"genre": "Fiction", "books": []},
            "0-0": "not an object",
            "0-1": {"books": []},
            "0-2": {"genre": "Art"},
            "0-3": {"genre": "Art", "books": [{"title": "No id"}, {"id": "9"}, {"id": "10", "title": "Ok"}]}
        });

        let catalog = Catalog::from_value(&payload);

        assert_eq!(catalog.slots().count(), 1);
        let slot = catalog.get(SlotKey::new(0, 3)).unwrap();
        assert_eq!(slot.books.len(), 1);
        assert_eq!(slot.books[0].id, "10");
    }

    #[test]
    fn test_invalid_payloads_give_empty_catalog() {
        assert!(Catalog::from_json("<html>").is_empty());
        assert!(Catalog::from_json("[1, 2]").is_empty());
        assert!(Catalog::from_json("{}").genres().is_empty());
    }

    #[test]
    fn test_blank_author_treated_as_missing() {
        let book = BookRecord::new("1", "Title", Some("   "));
        assert_eq!(book.author, None);
        assert_eq!(book.author_or_default(), "Unknown");
    }

    #[test]
    fn test_duplicate_book_ids_keep_first_occurrence() {
        let payload = json!({
            "0-0": {"genre": "A", "books": [{"id": "1", "title": "First"}]},
            "0-1": {"genre": "B", "books": [{"id": "1", "title": "Second"}]}
        });

        let catalog = Catalog::from_value(&payload);

        assert_eq!(catalog.book_count(), 1);
        assert_eq!(catalog.find_book("1").unwrap().1.title, "First");
    }
}
