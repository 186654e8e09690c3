//! Genre filter and free-text search
//!
//! Two independent inputs drive the view state:
//! - the selected genre, which dims every slot of another genre
//! - the search term, which highlights books whose title or author contains it
//!
//! Books inside dimmed slots are never highlighted. Changing the genre always
//! re-runs the search so highlights never outlive the filter they were
//! computed under.

use crate::models::{BookRecord, Catalog, GenreFilter, ViewState};
use serde::Serialize;

/// Outcome of a filter/search pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchSummary {
    pub genre: String,
    pub term: String,
    pub dimmed_slots: usize,
    pub matches: usize,
}

/// Trim and lowercase a raw search input
pub fn normalize_term(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Case-insensitive substring match on title or author.
/// `term` must already be normalized; an empty term matches nothing.
pub fn book_matches(book: &BookRecord, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    book.title.to_lowercase().contains(term)
        || book.author_or_default().to_lowercase().contains(term)
}

/// Select a genre, recompute dimming and re-run the current search
pub fn apply_genre_filter(catalog: &Catalog, state: &mut ViewState, genre: GenreFilter) -> SearchSummary {
    state.selected_genre = genre;
    recompute_dimming(catalog, state);
    recompute_highlights(catalog, state);
    summary(state)
}

/// Set the search term and recompute highlights under the current filter
pub fn apply_search(catalog: &Catalog, state: &mut ViewState, raw_term: &str) -> SearchSummary {
    state.search_term = normalize_term(raw_term);
    recompute_highlights(catalog, state);
    summary(state)
}

/// Recompute everything from the stored inputs, e.g. after the catalog was replaced
pub fn refresh(catalog: &Catalog, state: &mut ViewState) -> SearchSummary {
    recompute_dimming(catalog, state);
    recompute_highlights(catalog, state);
    summary(state)
}

fn recompute_dimming(catalog: &Catalog, state: &mut ViewState) {
    state.dimmed = catalog
        .slots()
        .filter(|(_, slot)| state.selected_genre.excludes(&slot.genre))
        .map(|(key, _)| key)
        .collect();
}

fn recompute_highlights(catalog: &Catalog, state: &mut ViewState) {
    let term = state.search_term.as_str();
    let highlighted = catalog
        .slots()
        .filter(|(key, _)| !state.dimmed.contains(key))
        .flat_map(|(_, slot)| slot.books.iter())
        .filter(|book| book_matches(book, term))
        .map(|book| book.id.clone())
        .collect();
    state.highlighted = highlighted;
}

fn summary(state: &ViewState) -> SearchSummary {
    SearchSummary {
        genre: state.selected_genre.to_string(),
        term: state.search_term.clone(),
        dimmed_slots: state.dimmed.len(),
        matches: state.highlighted.len(),
    }
}
