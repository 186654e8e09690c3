// Rendering and filtering properties of the shelf grid

use library_shelf_wasm::filter::{apply_genre_filter, apply_search};
use library_shelf_wasm::shelf_layout::{ShelfLayoutEngine, SlotKind};
use library_shelf_wasm::{Catalog, GenreFilter, LayoutGrid, ShelfDisplayList, SlotKey, ViewState};

const DUNE_PAYLOAD: &str =
    r#"{"0-0": {"genre": "Fiction", "books": [{"id": "1", "title": "Dune", "author": "Herbert"}]}}"#;

/// A payload that puts books on every cell of the library grid, active or not
fn crowded_payload() -> String {
    let grid = LayoutGrid::library();
    let genres = ["Fiction", "History", "Poetry", "Science"];
    let entries: Vec<String> = grid
        .cells()
        .enumerate()
        .map(|(i, (key, _))| {
            format!(
                r#""{}": {{"genre": "{}", "books": [{{"id": "b{}", "title": "A rather long title number {}", "author": "Author {}"}}, {{"id": "c{}", "title": "Short {}"}}]}}"#,
                key,
                genres[i % genres.len()],
                i,
                i,
                i,
                i,
                i
            )
        })
        .collect();
    format!("{{{}}}", entries.join(","))
}

fn render(catalog: &Catalog, state: &ViewState) -> ShelfDisplayList {
    ShelfLayoutEngine::default().render(&LayoutGrid::library(), catalog, state)
}

#[test]
fn test_inactive_cells_never_have_books() {
    let grid = LayoutGrid::library();
    for payload in [crowded_payload(), DUNE_PAYLOAD.to_string(), "{}".to_string()] {
        let catalog = Catalog::from_json(&payload);
        let display = render(&catalog, &ViewState::default());

        for slot in &display.slots {
            if !grid.is_active(slot.key) {
                assert_eq!(slot.kind, SlotKind::Inactive);
                assert!(slot.books.is_empty(), "inactive cell {} has books", slot.key);
            }
        }
    }
}

#[test]
fn test_spine_titles_respect_max_length() {
    let catalog = Catalog::from_json(&crowded_payload());
    let display = render(&catalog, &ViewState::default());

    for book in display.books() {
        if book.title.chars().count() > 22 {
            assert_eq!(book.display_title.chars().count(), 22);
            assert!(book.display_title.ends_with("..."));
        } else {
            assert_eq!(book.display_title, book.title);
        }
    }
}

#[test]
fn test_filtered_genres_are_dimmed_and_never_highlighted() {
    let catalog = Catalog::from_json(&crowded_payload());
    let mut state = ViewState::default();

    apply_genre_filter(&catalog, &mut state, GenreFilter::Genre("Poetry".into()));
    // "title" and "short" together match every book in the catalog
    for term in ["title", "short", "author", ""] {
        apply_search(&catalog, &mut state, term);

        for (key, slot) in catalog.slots() {
            if slot.genre != "Poetry" {
                assert!(state.is_dimmed(key));
                assert!(slot.books.iter().all(|b| !state.is_highlighted(&b.id)));
            }
        }
    }
}

#[test]
fn test_all_genres_dims_nothing() {
    let catalog = Catalog::from_json(&crowded_payload());
    let mut state = ViewState::default();

    apply_genre_filter(&catalog, &mut state, GenreFilter::Genre("History".into()));
    assert!(!state.dimmed.is_empty());

    apply_genre_filter(&catalog, &mut state, GenreFilter::from_selector("all"));
    assert!(state.dimmed.is_empty());

    let display = render(&catalog, &state);
    assert!(display.slots.iter().all(|slot| !slot.dimmed));
}

#[test]
fn test_render_is_idempotent_except_colors() {
    let catalog = Catalog::from_json(&crowded_payload());
    let state = ViewState::default();

    let strip_colors = |mut display: ShelfDisplayList| {
        for slot in &mut display.slots {
            for book in &mut slot.books {
                book.color.clear();
            }
        }
        display
    };

    let first = strip_colors(render(&catalog, &state));
    let second = strip_colors(render(&catalog, &state));
    assert_eq!(first, second);
}

#[test]
fn test_dune_search_example() {
    let catalog = Catalog::from_json(DUNE_PAYLOAD);
    let mut state = ViewState::default();

    apply_search(&catalog, &mut state, "dun");
    assert!(state.is_highlighted("1"));

    apply_search(&catalog, &mut state, "xyz");
    assert!(!state.is_highlighted("1"));

    let display = render(&catalog, &state);
    let book = display.book("1").unwrap();
    assert_eq!(book.slot, SlotKey::new(0, 0));
    assert!(!book.highlighted);
}
