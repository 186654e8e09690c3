//! Library shelf WASM API
//!
//! This module provides the JavaScript-facing API:
//!
//! - `startLibrary(config?)`: bind to the page and load the catalog
//! - `buildDisplayList(payload, config?)`: render a payload without a page
//! - `truncateTitle(title, max)`: the spine truncation rule
//!
//! `helpers` holds the console logging macros and serialization utilities
//! shared by the browser-only code.

pub mod helpers;

use crate::config::LibraryConfig;
use crate::dom::LibraryShell;
use crate::filter;
use crate::models::{Catalog, ViewState};
use crate::shelf_layout::{self, ShelfLayoutEngine};
use helpers::{deserialize, serialize, to_js_error};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

thread_local! {
    // Active page binding; replacing it detaches the previous one's listeners
    static SHELL: RefCell<Option<Rc<LibraryShell>>> = const { RefCell::new(None) };
}

fn config_from_js(config: JsValue) -> Result<LibraryConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(LibraryConfig::default());
    }
    deserialize(config, "Invalid library config")
}

/// Bind to the host page and start loading the catalog
#[wasm_bindgen(js_name = startLibrary)]
pub fn start_library(config: JsValue) -> Result<(), JsValue> {
    let config = config_from_js(config)?;
    let shell = LibraryShell::start(config).map_err(to_js_error)?;
    SHELL.with(|slot| slot.replace(Some(shell)));
    crate::wasm_info!("startLibrary: page bound");
    Ok(())
}

/// Render a catalog payload (JSON text) into a display list
#[wasm_bindgen(js_name = buildDisplayList)]
pub fn build_display_list(payload: &str, config: JsValue) -> Result<JsValue, JsValue> {
    let config = config_from_js(config)?;
    let grid = config.layout_grid().map_err(to_js_error)?;
    let catalog = Catalog::from_json(payload);

    let mut view = ViewState::default();
    filter::refresh(&catalog, &mut view);

    let display = ShelfLayoutEngine::new(config.title_max_len).render(&grid, &catalog, &view);
    serialize(&display, "Display list serialization failed")
}

/// Shorten a title the way spines print it
#[wasm_bindgen(js_name = truncateTitle)]
pub fn truncate_title(title: &str, max: usize) -> String {
    shelf_layout::truncate_title(title, max)
}
