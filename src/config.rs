//! Page configuration
//!
//! Passed from JavaScript to `startLibrary`. Every field has a default so the
//! page can pass `undefined`, `{}` or only the values it wants to change.

use crate::gateway::ApiEndpoints;
use crate::interaction::{TooltipConfig, DEFAULT_SEARCH_LINK_TEMPLATE};
use crate::models::{LayoutError, LayoutGrid};
use crate::shelf_layout::DEFAULT_TITLE_MAX_LEN;
use serde::{Deserialize, Serialize};

/// Ids of the page elements the DOM layer binds to
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct ElementIds {
    pub grid: String,
    pub tooltip: String,
    pub search_input: String,
    pub search_button: String,
    pub clear_search_button: String,
    pub genre_filter: String,
    pub login_button: String,
    pub logout_button: String,
    pub add_book_modal: String,
    pub open_add_book_button: String,
    pub close_add_book_button: String,
    pub add_book_form: String,
    pub title_input: String,
    pub author_input: String,
    pub slot_select: String,
    pub details_modal: String,
    pub close_details_button: String,
    pub details_title: String,
    pub details_author: String,
    pub search_link: String,
    pub delete_book_button: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            grid: "libraryGrid".into(),
            tooltip: "globalTooltip".into(),
            search_input: "searchInput".into(),
            search_button: "searchButton".into(),
            clear_search_button: "clearSearchButton".into(),
            genre_filter: "genreFilter".into(),
            login_button: "adminLoginButton".into(),
            logout_button: "adminLogoutButton".into(),
            add_book_modal: "addBookModal".into(),
            open_add_book_button: "openAddBookButton".into(),
            close_add_book_button: "closeAddBookButton".into(),
            add_book_form: "addBookForm".into(),
            title_input: "titleInput".into(),
            author_input: "authorInput".into(),
            slot_select: "slotSelect".into(),
            details_modal: "detailsModal".into(),
            close_details_button: "closeDetailsButton".into(),
            details_title: "detailsTitle".into(),
            details_author: "detailsAuthor".into(),
            search_link: "searchLink".into(),
            delete_book_button: "deleteBookButton".into(),
        }
    }
}

/// Complete page configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LibraryConfig {
    /// Backend paths, admin header and create-body field names
    pub endpoints: ApiEndpoints,

    /// Element ids on the host page
    pub elements: ElementIds,

    /// Characters printed on a spine before truncation
    pub title_max_len: usize,

    /// Tooltip spacing
    pub tooltip: TooltipConfig,

    /// Outbound link template, `{query}` is the encoded title
    pub search_link_template: String,

    /// Floor plan override as rows of 0/1; the built-in plan when absent
    pub layout: Option<Vec<Vec<u8>>>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            endpoints: ApiEndpoints::default(),
            elements: ElementIds::default(),
            title_max_len: DEFAULT_TITLE_MAX_LEN,
            tooltip: TooltipConfig::default(),
            search_link_template: DEFAULT_SEARCH_LINK_TEMPLATE.to_string(),
            layout: None,
        }
    }
}

impl LibraryConfig {
    /// Floor plan to render
    pub fn layout_grid(&self) -> Result<LayoutGrid, LayoutError> {
        match &self.layout {
            Some(rows) => LayoutGrid::from_rows(rows),
            None => Ok(LayoutGrid::library()),
        }
    }
}
