//! Add-book dialog
//!
//! Admin-only. The selector lists every active slot with its 1-indexed position
//! and genre; submission is validated locally before any request is built.

use crate::gateway::{ApiEndpoints, ApiError, ApiRequest, NewBook};
use crate::models::{AdminSession, Catalog, LayoutGrid, SlotKey};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Label of the leading, empty-valued selector entry
pub const SLOT_PLACEHOLDER_LABEL: &str = "-- Select a shelf --";
/// Genre label for slots that have no record yet
pub const EMPTY_GENRE_LABEL: &str = "Empty";

/// Local validation failure; nothing is sent when one occurs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please select a shelf location.")]
    MissingSlot,

    #[error("Please enter a title.")]
    MissingTitle,

    #[error("Shelf '{0}' does not exist.")]
    UnknownSlot(String),

    #[error("Admin login required.")]
    NotAdmin,

    #[error("A request is already in progress.")]
    Busy,
}

/// One entry of the slot selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotOption {
    /// Slot key text, empty for the placeholder
    pub value: String,
    pub label: String,
}

/// Raw form input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddBookForm {
    pub title: String,
    pub author: String,
    pub slot_key: String,
}

/// Result of a create request as seen by the dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddBookOutcome {
    /// The catalog must be reloaded. `closed_dialog` is false when the form
    /// that sent the request had already been closed or reopened.
    Created { closed_dialog: bool },
    /// Dialog stays open showing this message
    Failed(String),
    /// Failed after its form was closed or reopened; only logged
    Discarded(String),
}

/// Selector entries: placeholder first, then every active slot in row-major order
pub fn slot_options(grid: &LayoutGrid, catalog: &Catalog) -> Vec<SlotOption> {
    let placeholder = SlotOption {
        value: String::new(),
        label: SLOT_PLACEHOLDER_LABEL.to_string(),
    };

    std::iter::once(placeholder)
        .chain(grid.active_slots().map(|key| {
            let genre = catalog
                .get(key)
                .map_or(EMPTY_GENRE_LABEL, |slot| slot.genre.as_str());
            SlotOption {
                value: key.to_string(),
                label: format!("{} ({})", key.label(), genre),
            }
        }))
        .collect()
}

/// Add-book dialog state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddBookDialog {
    open: bool,
    /// Bumped on every open so a response can tell whether its form is still shown
    form_seq: u64,
    /// `form_seq` of the form whose request is in flight
    pending: Option<u64>,
    options: Vec<SlotOption>,
    error: Option<String>,
}

impl AddBookDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open with a freshly built selector. Refused outside admin mode.
    /// A request sent from an earlier form stays in flight.
    pub fn open(&mut self, session: &AdminSession, grid: &LayoutGrid, catalog: &Catalog) -> bool {
        if !session.is_admin() {
            log::warn!("add-book dialog requested without admin mode");
            return false;
        }
        self.open = true;
        self.form_seq += 1;
        self.error = None;
        self.options = slot_options(grid, catalog);
        true
    }

    pub fn close(&mut self) {
        self.open = false;
        self.error = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn options(&self) -> &[SlotOption] {
        &self.options
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validate the form and build the create request.
    /// On error nothing is sent and the message is kept for display.
    pub fn submit(
        &mut self,
        form: &AddBookForm,
        grid: &LayoutGrid,
        endpoints: &ApiEndpoints,
        session: &AdminSession,
    ) -> Result<ApiRequest, FormError> {
        let result = self.validate(form, grid, session).map(|book| {
            endpoints.create_book(&book, session.credential())
        });

        match &result {
            Ok(_) => {
                self.pending = Some(self.form_seq);
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
        result
    }

    fn validate(&self, form: &AddBookForm, grid: &LayoutGrid, session: &AdminSession) -> Result<NewBook, FormError> {
        if !session.is_admin() {
            return Err(FormError::NotAdmin);
        }
        if self.is_pending() {
            return Err(FormError::Busy);
        }

        let raw_slot = form.slot_key.trim();
        if raw_slot.is_empty() {
            return Err(FormError::MissingSlot);
        }

        let title = form.title.trim();
        if title.is_empty() {
            return Err(FormError::MissingTitle);
        }

        let slot_key = raw_slot
            .parse::<SlotKey>()
            .ok()
            .filter(|key| grid.is_active(*key))
            .ok_or_else(|| FormError::UnknownSlot(raw_slot.to_string()))?;

        Ok(NewBook {
            title: title.to_string(),
            author: form.author.trim().to_string(),
            slot_key,
        })
    }

    /// Apply the server's answer to the request in flight. The dialog is
    /// only touched while the form that sent it is still shown.
    pub fn on_response(&mut self, result: Result<String, ApiError>) -> AddBookOutcome {
        let sent_from = self.pending.take();
        let showing = self.open && sent_from == Some(self.form_seq);

        match result {
            Ok(_) => {
                if showing {
                    self.close();
                }
                AddBookOutcome::Created { closed_dialog: showing }
            }
            Err(e) => {
                let message = e.user_message();
                if showing {
                    self.error = Some(message.clone());
                    AddBookOutcome::Failed(message)
                } else {
                    AddBookOutcome::Discarded(message)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::Method;
    use crate::models::{BookRecord, SlotRecord};

    fn admin() -> AdminSession {
        let mut session = AdminSession::new();
        session.login("key");
        session
    }

    fn form(slot: &str) -> AddBookForm {
        AddBookForm {
            title: "Dune".into(),
            author: "Herbert".into(),
            slot_key: slot.into(),
        }
    }

    #[test]
    fn test_options_cover_active_slots() {
        let grid = LayoutGrid::from_rows(&[vec![1, 0], vec![1, 1]]).unwrap();
        let mut catalog = Catalog::new();
        catalog.insert(
            SlotKey::new(1, 1),
            SlotRecord { genre: "Poetry".into(), books: vec![BookRecord::new("1", "Odes", None)] },
        );

        let options = slot_options(&grid, &catalog);

        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                SLOT_PLACEHOLDER_LABEL,
                "Row 1, Col 1 (Empty)",
                "Row 2, Col 1 (Empty)",
                "Row 2, Col 2 (Poetry)",
            ]
        );
        assert_eq!(options[0].value, "");
        assert_eq!(options[3].value, "1-1");
    }

    #[test]
    fn test_open_requires_admin() {
        let mut dialog = AddBookDialog::new();
        assert!(!dialog.open(&AdminSession::new(), &LayoutGrid::library(), &Catalog::new()));
        assert!(!dialog.is_open());

        assert!(dialog.open(&admin(), &LayoutGrid::library(), &Catalog::new()));
        assert_eq!(dialog.options().len(), 54);
    }

    #[test]
    fn test_missing_slot_is_rejected_locally() {
        let grid = LayoutGrid::library();
        let mut dialog = AddBookDialog::new();
        dialog.open(&admin(), &grid, &Catalog::new());

        let err = dialog.submit(&form(""), &grid, &ApiEndpoints::default(), &admin()).unwrap_err();

        assert_eq!(err, FormError::MissingSlot);
        assert_eq!(dialog.error(), Some("Please select a shelf location."));
        assert!(dialog.is_open());
        assert!(!dialog.is_pending());
    }

    #[test]
    fn test_inactive_slot_is_rejected() {
        let grid = LayoutGrid::library();
        let mut dialog = AddBookDialog::new();
        dialog.open(&admin(), &grid, &Catalog::new());

        let err = dialog.submit(&form("0-3"), &grid, &ApiEndpoints::default(), &admin()).unwrap_err();
        assert_eq!(err, FormError::UnknownSlot("0-3".into()));
    }

    #[test]
    fn test_submit_builds_request_and_blocks_resubmit() {
        let grid = LayoutGrid::library();
        let session = admin();
        let mut dialog = AddBookDialog::new();
        dialog.open(&session, &grid, &Catalog::new());

        let request = dialog.submit(&form("2-4"), &grid, &ApiEndpoints::default(), &session).unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.header("X-API-KEY"), Some("key"));
        assert!(dialog.is_pending());

        let again = dialog.submit(&form("2-4"), &grid, &ApiEndpoints::default(), &session);
        assert_eq!(again.unwrap_err(), FormError::Busy);
    }

    #[test]
    fn test_failure_keeps_dialog_open() {
        let grid = LayoutGrid::library();
        let session = admin();
        let mut dialog = AddBookDialog::new();
        dialog.open(&session, &grid, &Catalog::new());
        dialog.submit(&form("0-0"), &grid, &ApiEndpoints::default(), &session).unwrap();

        let outcome = dialog.on_response(Err(ApiError::Server {
            status: 401,
            message: "No autorizado".into(),
        }));

        assert_eq!(outcome, AddBookOutcome::Failed("No autorizado".into()));
        assert!(dialog.is_open());
        assert!(!dialog.is_pending());
    }

    #[test]
    fn test_success_closes_dialog() {
        let grid = LayoutGrid::library();
        let session = admin();
        let mut dialog = AddBookDialog::new();
        dialog.open(&session, &grid, &Catalog::new());
        dialog.submit(&form("0-0"), &grid, &ApiEndpoints::default(), &session).unwrap();

        assert_eq!(dialog.on_response(Ok("{}".into())), AddBookOutcome::Created { closed_dialog: true });
        assert!(!dialog.is_open());
    }

    #[test]
    fn test_reopened_form_is_not_closed_by_earlier_request() {
        let grid = LayoutGrid::library();
        let session = admin();
        let endpoints = ApiEndpoints::default();
        let mut dialog = AddBookDialog::new();
        dialog.open(&session, &grid, &Catalog::new());
        dialog.submit(&form("0-0"), &grid, &endpoints, &session).unwrap();
        dialog.close();

        dialog.open(&session, &grid, &Catalog::new());
        // the first request is still in flight
        assert!(dialog.is_pending());
        assert_eq!(dialog.submit(&form("0-1"), &grid, &endpoints, &session).unwrap_err(), FormError::Busy);

        let outcome = dialog.on_response(Ok("{}".into()));
        assert_eq!(outcome, AddBookOutcome::Created { closed_dialog: false });
        assert!(dialog.is_open());
        assert!(!dialog.is_pending());
        assert!(dialog.submit(&form("0-1"), &grid, &endpoints, &session).is_ok());
    }

    #[test]
    fn test_failure_after_close_is_discarded() {
        let grid = LayoutGrid::library();
        let session = admin();
        let mut dialog = AddBookDialog::new();
        dialog.open(&session, &grid, &Catalog::new());
        dialog.submit(&form("0-0"), &grid, &ApiEndpoints::default(), &session).unwrap();
        dialog.close();

        let outcome = dialog.on_response(Err(ApiError::Network("offline".into())));

        assert!(matches!(outcome, AddBookOutcome::Discarded(_)));
        assert_eq!(dialog.error(), None);
    }
}
