//! Library Shelf WASM Module
//!
//! Renders a virtual library floor plan in the browser: shelves of books laid
//! out on a fixed grid, a genre filter, free-text search, hover tooltips and,
//! for administrators, adding and deleting books through the backend API.

pub mod models;
pub mod filter;
pub mod shelf_layout;
pub mod interaction;
pub mod gateway;
pub mod config;
pub mod app;
pub mod dom;
pub mod api;

// Re-export commonly used types
pub use app::{LibraryApp, LoadOutcome, LoadStatus};
pub use config::LibraryConfig;
pub use models::*;
pub use shelf_layout::{RenderBook, RenderSlot, ShelfDisplayList, SlotKind};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    {
        if let Err(e) = console_log::init_with_level(log::Level::Debug) {
            api::helpers::log_warn(&format!("logger already initialized: {}", e));
        }
    }

    log::info!("Library shelf WASM module initialized");
}
