//! Shelf Layout Engine
//!
//! This module turns the layout grid and catalog into a `ShelfDisplayList`
//! with everything the DOM layer needs to build the grid: slot kinds, genres,
//! spine titles, colors, classes and the filter/search flags.

pub mod display_list;
pub mod engine;
pub mod palette;

pub use display_list::{RenderBook, RenderSlot, ShelfDisplayList, SlotKind};
pub use engine::{truncate_title, ShelfLayoutEngine, DEFAULT_TITLE_MAX_LEN};
pub use palette::{random_spine_color, SPINE_COLORS};
