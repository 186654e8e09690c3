//! Browser DOM binding
//!
//! Thin layer between the host page and `LibraryApp`: element lookup, grid
//! mounting and event wiring. Nothing here decides anything; it forwards events
//! to the controller and draws what the controller returns.

pub mod elements;
pub mod mount;
pub mod shell;

pub use elements::{DomError, PageElements};
pub use shell::LibraryShell;
