//! Models module for the library shelf
//!
//! Data the rest of the crate works on: the layout grid, the catalog built from
//! the backend payload, the derived view state and the admin session.

pub mod layout;
pub mod catalog;
pub mod view_state;
pub mod session;

// Re-export commonly used types
pub use layout::{LayoutError, LayoutGrid, SlotKey, SlotKeyError};
pub use catalog::{BookRecord, Catalog, SlotRecord, UNKNOWN_AUTHOR};
pub use view_state::{GenreFilter, ViewState, ALL_GENRES};
pub use session::AdminSession;
