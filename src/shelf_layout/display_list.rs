//! Display List for shelf rendering
//!
//! This module defines the output structure returned from the shelf layout
//! engine. Every grid cell becomes one `RenderSlot`; every book becomes one
//! `RenderBook` carrying a typed reference back to its catalog record, so the
//! DOM layer never has to read state back out of element attributes.

use crate::models::{GenreFilter, SlotKey, ViewState};
use serde::{Deserialize, Serialize};

/// CSS class of every grid cell
pub const SLOT_CLASS: &str = "shelf-slot";
/// CSS class added to inactive and empty cells
pub const EMPTY_CLASS: &str = "empty";
/// CSS class added to slots excluded by the genre filter
pub const DIMMED_CLASS: &str = "dimmed";
/// CSS class of a book spine
pub const BOOK_CLASS: &str = "book-spine";
/// CSS class added to books matching the search
pub const HIGHLIGHT_CLASS: &str = "highlighted";
/// Label shown inside an active slot that holds no record
pub const EMPTY_SLOT_LABEL: &str = "Empty";

/// Top-level display list for the whole grid
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ShelfDisplayList {
    /// Number of grid columns (for the CSS grid template)
    pub columns: usize,

    /// Number of grid rows
    pub rows: usize,

    /// One entry per grid cell, row-major
    pub slots: Vec<RenderSlot>,
}

/// What a grid cell shows
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    /// Active slot with a catalog record
    Shelf,
    /// Active slot with no record yet
    Empty,
    /// Decorative gap in the floor plan
    Inactive,
}

/// A single grid cell
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RenderSlot {
    pub key: SlotKey,

    pub kind: SlotKind,

    /// Genre of the slot (only for `Shelf`)
    pub genre: Option<String>,

    /// Placeholder text (only for `Empty`)
    pub label: Option<String>,

    /// Books in shelf order
    pub books: Vec<RenderBook>,

    /// Excluded by the current genre filter
    pub dimmed: bool,

    /// CSS class names to apply
    pub classes: Vec<String>,
}

/// A single book spine
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RenderBook {
    /// Catalog id, used for deletion
    pub id: String,

    /// Slot holding the book
    pub slot: SlotKey,

    /// Full title
    pub title: String,

    /// Title as printed on the spine
    pub display_title: String,

    /// Author, "Unknown" when absent
    pub author: String,

    /// Spine color (hex string), cosmetic only
    pub color: String,

    /// Matches the current search
    pub highlighted: bool,

    /// CSS class names to apply
    pub classes: Vec<String>,
}

impl ShelfDisplayList {
    /// Locate a book by id
    pub fn book(&self, id: &str) -> Option<&RenderBook> {
        self.books().find(|book| book.id == id)
    }

    /// All books in row-major, shelf order
    pub fn books(&self) -> impl Iterator<Item = &RenderBook> {
        self.slots.iter().flat_map(|slot| slot.books.iter())
    }

    pub fn slot(&self, key: SlotKey) -> Option<&RenderSlot> {
        self.slots.iter().find(|slot| slot.key == key)
    }

    /// Restamp dimmed/highlighted flags without re-rendering (colors are kept).
    /// Cells without a genre are dimmed whenever a genre is selected.
    pub fn apply_view_state(&mut self, state: &ViewState) {
        let filtering = state.selected_genre != GenreFilter::All;
        for slot in &mut self.slots {
            slot.dimmed = match slot.kind {
                SlotKind::Shelf => state.is_dimmed(slot.key),
                SlotKind::Empty | SlotKind::Inactive => filtering,
            };
            slot.classes = slot_classes(slot.kind, slot.dimmed);

            for book in &mut slot.books {
                book.highlighted = !slot.dimmed && state.is_highlighted(&book.id);
                book.classes = book_classes(book.highlighted);
            }
        }
    }
}

pub(crate) fn slot_classes(kind: SlotKind, dimmed: bool) -> Vec<String> {
    let mut classes = vec![SLOT_CLASS.to_string()];
    if kind != SlotKind::Shelf {
        classes.push(EMPTY_CLASS.to_string());
    }
    if dimmed {
        classes.push(DIMMED_CLASS.to_string());
    }
    classes
}

pub(crate) fn book_classes(highlighted: bool) -> Vec<String> {
    let mut classes = vec![BOOK_CLASS.to_string()];
    if highlighted {
        classes.push(HIGHLIGHT_CLASS.to_string());
    }
    classes
}
