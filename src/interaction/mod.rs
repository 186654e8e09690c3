//! Interaction layer
//!
//! Tooltip, dialogs and admin session. These only ever touch presentation
//! state; the catalog is read, never modified, from here.

pub mod add_book;
pub mod details;
pub mod tooltip;

pub use add_book::{slot_options, AddBookDialog, AddBookForm, AddBookOutcome, FormError, SlotOption};
pub use details::{search_link, BookDetails, DeleteOutcome, DeleteRequest, DetailsDialog, DEFAULT_SEARCH_LINK_TEMPLATE};
pub use tooltip::{place_tooltip, Rect, TooltipConfig, TooltipContent, TooltipPlacement, TooltipState};

use crate::models::AdminSession;

/// Interaction state owned by the controller
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionLayer {
    pub session: AdminSession,
    pub tooltip: TooltipState,
    pub add_book: AddBookDialog,
    pub details: DetailsDialog,
}

impl InteractionLayer {
    pub fn new(touch_primary: bool) -> Self {
        Self {
            tooltip: TooltipState::new(touch_primary),
            ..Self::default()
        }
    }

    /// Any dialog visible
    pub fn modal_open(&self) -> bool {
        self.add_book.is_open() || self.details.is_open()
    }
}
