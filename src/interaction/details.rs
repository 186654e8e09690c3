//! Book details dialog and deletion

use crate::gateway::{ApiEndpoints, ApiError, ApiRequest};
use crate::models::{AdminSession, SlotKey};
use crate::shelf_layout::RenderBook;
use serde::{Deserialize, Serialize};

/// Outbound search link; `{query}` is replaced by the URL-encoded title
pub const DEFAULT_SEARCH_LINK_TEMPLATE: &str =
    "https://www.buscalibre.com.ar/libros/search?q={query}&afiliado=d121bda5246c64620456";

/// Build the outbound search link for `title`
pub fn search_link(template: &str, title: &str) -> String {
    template.replace("{query}", &urlencoding::encode(title))
}

/// Everything the dialog displays about one book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDetails {
    pub id: String,
    pub slot: SlotKey,
    pub title: String,
    pub author: String,
    pub search_link: String,
}

impl BookDetails {
    pub fn from_render_book(book: &RenderBook, link_template: &str) -> Self {
        Self {
            id: book.id.clone(),
            slot: book.slot,
            title: book.title.clone(),
            author: book.author.clone(),
            search_link: search_link(link_template, &book.title),
        }
    }
}

/// A confirmed delete, tagged with the book it targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub book_id: String,
    pub request: ApiRequest,
}

/// Result of a delete request as seen by the dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The catalog must be reloaded. `closed_dialog` is false when the dialog
    /// had already moved on to another book or been closed.
    Deleted { closed_dialog: bool },
    /// Dialog stays open showing this message
    Failed(String),
    /// Failed after the dialog stopped showing the book; only logged
    Discarded(String),
}

/// Details dialog state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailsDialog {
    book: Option<BookDetails>,
    /// Id of the book whose delete is in flight
    deleting: Option<String>,
    error: Option<String>,
}

impl DetailsDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `details`. A delete already in flight stays tracked.
    pub fn open(&mut self, details: BookDetails) {
        self.book = Some(details);
        self.error = None;
    }

    pub fn close(&mut self) {
        self.book = None;
        self.error = None;
    }

    pub fn is_open(&self) -> bool {
        self.book.is_some()
    }

    pub fn book(&self) -> Option<&BookDetails> {
        self.book.as_ref()
    }

    /// Whether any delete request is in flight
    pub fn is_deleting(&self) -> bool {
        self.deleting.is_some()
    }

    fn shows(&self, book_id: &str) -> bool {
        self.book.as_ref().is_some_and(|book| book.id == book_id)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the delete button is shown
    pub fn can_delete(&self, session: &AdminSession) -> bool {
        self.is_open() && session.is_admin()
    }

    /// Question put to the user before deleting
    pub fn confirmation_prompt(&self) -> Option<String> {
        self.book
            .as_ref()
            .map(|book| format!("Are you sure you want to delete \"{}\"?", book.title))
    }

    /// Build the delete request once the user has confirmed.
    /// Returns `None` when not confirmed, not admin, or a delete is in flight.
    pub fn delete_request(
        &mut self,
        confirmed: bool,
        endpoints: &ApiEndpoints,
        session: &AdminSession,
    ) -> Option<DeleteRequest> {
        if !confirmed || !self.can_delete(session) || self.is_deleting() {
            return None;
        }
        let book_id = self.book.as_ref()?.id.clone();
        let request = endpoints.delete_book(&book_id, session.credential());
        self.deleting = Some(book_id.clone());
        self.error = None;
        Some(DeleteRequest { book_id, request })
    }

    /// Apply the server's answer to the delete of `book_id`. The dialog is
    /// only touched while it still shows that book.
    pub fn on_delete_response(&mut self, book_id: &str, result: Result<String, ApiError>) -> DeleteOutcome {
        if self.deleting.as_deref() == Some(book_id) {
            self.deleting = None;
        }
        let showing = self.shows(book_id);

        match result {
            Ok(_) => {
                if showing {
                    self.close();
                }
                DeleteOutcome::Deleted { closed_dialog: showing }
            }
            Err(e) => {
                let message = e.user_message();
                if showing {
                    self.error = Some(message.clone());
                    DeleteOutcome::Failed(message)
                } else {
                    DeleteOutcome::Discarded(message)
                }
            }
        }
    }
}
