//! Shelf layout computation
//!
//! Takes the layout grid and the catalog and produces a `ShelfDisplayList`.
//! Each call builds the list from scratch; there is no diffing against the
//! previous render.

use super::display_list::*;
use super::palette::random_spine_color;
use crate::models::{Catalog, LayoutGrid, SlotKey, SlotRecord, ViewState};

/// Default number of characters printed on a spine
pub const DEFAULT_TITLE_MAX_LEN: usize = 22;

const ELLIPSIS: &str = "...";

/// Shorten `title` to at most `max` characters, ending in "..." when cut.
/// Limits too short to hold the ellipsis cut the title bare.
pub fn truncate_title(title: &str, max: usize) -> String {
    if title.chars().count() <= max {
        return title.to_string();
    }
    if max <= ELLIPSIS.len() {
        return title.chars().take(max).collect();
    }
    let kept: String = title.chars().take(max - ELLIPSIS.len()).collect();
    format!("{}{}", kept, ELLIPSIS)
}

/// Layout engine for the shelf grid
#[derive(Debug, Clone)]
pub struct ShelfLayoutEngine {
    title_max_len: usize,
}

impl ShelfLayoutEngine {
    pub fn new(title_max_len: usize) -> Self {
        Self { title_max_len }
    }

    /// Compute the display list for every grid cell
    ///
    /// # Arguments
    /// * `grid` - The floor plan
    /// * `catalog` - Slot records from the last load
    /// * `state` - Current dimmed/highlighted sets, stamped onto the output
    pub fn render(&self, grid: &LayoutGrid, catalog: &Catalog, state: &ViewState) -> ShelfDisplayList {
        let slots = grid
            .cells()
            .map(|(key, active)| match (active, catalog.get(key)) {
                (true, Some(record)) => self.shelf_slot(key, record),
                (true, None) => placeholder(key, SlotKind::Empty),
                (false, _) => placeholder(key, SlotKind::Inactive),
            })
            .collect();

        let mut list = ShelfDisplayList {
            columns: grid.cols(),
            rows: grid.rows(),
            slots,
        };
        list.apply_view_state(state);

        log::debug!(
            "rendered {} cells, {} books",
            list.slots.len(),
            list.books().count()
        );
        list
    }

    fn shelf_slot(&self, key: SlotKey, record: &SlotRecord) -> RenderSlot {
        let books = record
            .books
            .iter()
            .map(|book| RenderBook {
                id: book.id.clone(),
                slot: key,
                title: book.title.clone(),
                display_title: truncate_title(&book.title, self.title_max_len),
                author: book.author_or_default().to_string(),
                color: random_spine_color().to_string(),
                highlighted: false,
                classes: book_classes(false),
            })
            .collect();

        RenderSlot {
            key,
            kind: SlotKind::Shelf,
            genre: Some(record.genre.clone()),
            label: None,
            books,
            dimmed: false,
            classes: slot_classes(SlotKind::Shelf, false),
        }
    }
}

impl Default for ShelfLayoutEngine {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE_MAX_LEN)
    }
}

fn placeholder(key: SlotKey, kind: SlotKind) -> RenderSlot {
    RenderSlot {
        key,
        kind,
        genre: None,
        label: (kind == SlotKind::Empty).then(|| EMPTY_SLOT_LABEL.to_string()),
        books: Vec::new(),
        dimmed: false,
        classes: slot_classes(kind, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookRecord, GenreFilter};
    use crate::shelf_layout::palette::SPINE_COLORS;

    fn catalog_with(key: SlotKey, genre: &str, books: Vec<BookRecord>) -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert(key, SlotRecord { genre: genre.into(), books });
        catalog
    }

    #[test]
    fn test_truncate_title() {
        assert_eq!(truncate_title("Dune", 22), "Dune");
        assert_eq!(truncate_title("Exactly twenty-two ch.", 22), "Exactly twenty-two ch.");

        let cut = truncate_title("The Hitchhiker's Guide to the Galaxy", 22);
        assert_eq!(cut, "The Hitchhiker's Gu...");
        assert_eq!(cut.chars().count(), 22);
    }

    #[test]
    fn test_truncate_never_exceeds_tiny_limits() {
        assert_eq!(truncate_title("abcd", 2), "ab");
        assert_eq!(truncate_title("abcd", 3), "abc");
        assert_eq!(truncate_title("abcd", 0), "");
        assert_eq!(truncate_title("abcde", 4), "a...");
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let cut = truncate_title("Cien años de soledad, edición conmemorativa", 22);
        assert_eq!(cut.chars().count(), 22);
        assert!(cut.starts_with("Cien años"));
    }

    #[test]
    fn test_one_slot_per_cell_row_major() {
        let grid = LayoutGrid::from_rows(&[vec![1, 0, 1], vec![0, 1, 1]]).unwrap();
        let catalog = catalog_with(SlotKey::new(0, 2), "Art", vec![BookRecord::new("1", "Ways of Seeing", None)]);

        let list = ShelfLayoutEngine::default().render(&grid, &catalog, &ViewState::default());

        assert_eq!(list.columns, 3);
        assert_eq!(list.rows, 2);
        let kinds: Vec<SlotKind> = list.slots.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SlotKind::Empty,
                SlotKind::Inactive,
                SlotKind::Shelf,
                SlotKind::Inactive,
                SlotKind::Empty,
                SlotKind::Empty,
            ]
        );
        assert_eq!(list.slots[0].label.as_deref(), Some(EMPTY_SLOT_LABEL));
        assert_eq!(list.slots[1].label, None);
    }

    #[test]
    fn test_book_fields() {
        let grid = LayoutGrid::library();
        let catalog = catalog_with(
            SlotKey::new(0, 0),
            "Fiction",
            vec![
                BookRecord::new("7", "Dune", Some("Herbert")),
                BookRecord::new("8", "Anonymous Tales", None),
            ],
        );

        let list = ShelfLayoutEngine::default().render(&grid, &catalog, &ViewState::default());
        let slot = list.slot(SlotKey::new(0, 0)).unwrap();

        assert_eq!(slot.genre.as_deref(), Some("Fiction"));
        assert_eq!(slot.books.len(), 2);
        assert_eq!(slot.books[0].id, "7");
        assert_eq!(slot.books[0].author, "Herbert");
        assert_eq!(slot.books[1].author, "Unknown");
        assert_eq!(slot.books[1].slot, SlotKey::new(0, 0));
        assert!(slot.books.iter().all(|b| SPINE_COLORS.contains(&b.color.as_str())));
    }

    #[test]
    fn test_records_on_inactive_cells_are_not_rendered() {
        let grid = LayoutGrid::library();
        let catalog = catalog_with(SlotKey::new(0, 3), "Ghost", vec![BookRecord::new("1", "Hidden", None)]);

        let list = ShelfLayoutEngine::default().render(&grid, &catalog, &ViewState::default());
        let slot = list.slot(SlotKey::new(0, 3)).unwrap();

        assert_eq!(slot.kind, SlotKind::Inactive);
        assert!(slot.books.is_empty());
        assert!(list.book("1").is_none());
    }

    #[test]
    fn test_view_state_flags_are_stamped() {
        let grid = LayoutGrid::library();
        let mut catalog = catalog_with(SlotKey::new(0, 0), "Fiction", vec![BookRecord::new("1", "Dune", None)]);
        catalog.insert(
            SlotKey::new(0, 1),
            SlotRecord { genre: "History".into(), books: vec![BookRecord::new("2", "SPQR", None)] },
        );

        let mut state = ViewState::default();
        state.dimmed.insert(SlotKey::new(0, 1));
        state.highlighted.insert("1".into());
        state.highlighted.insert("2".into());

        let list = ShelfLayoutEngine::default().render(&grid, &catalog, &state);

        assert!(list.slot(SlotKey::new(0, 1)).unwrap().dimmed);
        assert!(list.slot(SlotKey::new(0, 1)).unwrap().classes.contains(&DIMMED_CLASS.to_string()));
        assert!(list.book("1").unwrap().highlighted);
        assert!(list.book("1").unwrap().classes.contains(&HIGHLIGHT_CLASS.to_string()));
        // books in dimmed slots never show as highlighted
        assert!(!list.book("2").unwrap().highlighted);
    }

    #[test]
    fn test_cells_without_genre_dim_under_genre_filter() {
        let grid = LayoutGrid::library();
        let catalog = catalog_with(SlotKey::new(0, 0), "Fiction", vec![BookRecord::new("1", "Dune", None)]);

        let mut state = ViewState::default();
        crate::filter::apply_genre_filter(&catalog, &mut state, GenreFilter::Genre("Fiction".into()));
        let list = ShelfLayoutEngine::default().render(&grid, &catalog, &state);

        for slot in &list.slots {
            match slot.kind {
                SlotKind::Shelf => assert!(!slot.dimmed, "selected shelf {} dimmed", slot.key),
                SlotKind::Empty | SlotKind::Inactive => {
                    assert!(slot.dimmed, "{:?} cell {} not dimmed", slot.kind, slot.key);
                    assert!(slot.classes.contains(&DIMMED_CLASS.to_string()));
                }
            }
        }

        crate::filter::apply_genre_filter(&catalog, &mut state, GenreFilter::All);
        let list = ShelfLayoutEngine::default().render(&grid, &catalog, &state);
        assert!(list.slots.iter().all(|slot| !slot.dimmed));
    }
}
