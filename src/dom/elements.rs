//! Page element lookup

use crate::config::ElementIds;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlAnchorElement, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    Window,
};

/// Failure while binding to the host page
#[derive(Debug, Error)]
pub enum DomError {
    #[error("no browser window available")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("element '{0}' not found")]
    Missing(String),

    #[error("element '{id}' is not a {expected}")]
    WrongType { id: String, expected: &'static str },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("DOM call failed: {0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        DomError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

pub fn window() -> Result<Window, DomError> {
    web_sys::window().ok_or(DomError::NoWindow)
}

pub fn document(window: &Window) -> Result<Document, DomError> {
    window.document().ok_or(DomError::NoDocument)
}

/// Look up `#id` and cast it to the expected element type
pub fn by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, DomError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| DomError::Missing(id.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| DomError::WrongType {
            id: id.to_string(),
            expected: std::any::type_name::<T>(),
        })
}

fn child(parent: &Element, selector: &str) -> Result<Element, DomError> {
    parent
        .query_selector(selector)?
        .ok_or_else(|| DomError::Missing(selector.to_string()))
}

/// Create an element of `tag` as an `HtmlElement`
pub fn create_html(document: &Document, tag: &str) -> Result<HtmlElement, DomError> {
    document
        .create_element(tag)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| DomError::WrongType {
            id: tag.to_string(),
            expected: "HtmlElement",
        })
}

/// Set the CSS `display` of an element
pub fn set_display(element: &HtmlElement, display: &str) -> Result<(), DomError> {
    element.style().set_property("display", display)?;
    Ok(())
}

/// Every element the page binds to
pub struct PageElements {
    pub grid: HtmlElement,
    pub tooltip: HtmlElement,
    pub tooltip_title: Element,
    pub tooltip_author: Element,
    pub search_input: HtmlInputElement,
    pub search_button: HtmlElement,
    pub clear_search_button: HtmlElement,
    pub genre_filter: HtmlSelectElement,
    pub login_button: HtmlElement,
    pub logout_button: Option<HtmlElement>,
    pub add_book_modal: HtmlElement,
    pub open_add_book_button: HtmlElement,
    pub close_add_book_button: HtmlElement,
    pub add_book_form: HtmlFormElement,
    pub title_input: HtmlInputElement,
    pub author_input: HtmlInputElement,
    pub slot_select: HtmlSelectElement,
    pub details_modal: HtmlElement,
    pub close_details_button: HtmlElement,
    pub details_title: HtmlElement,
    pub details_author: HtmlElement,
    pub search_link: HtmlAnchorElement,
    pub delete_book_button: HtmlElement,
}

impl PageElements {
    pub fn find(document: &Document, ids: &ElementIds) -> Result<Self, DomError> {
        let tooltip: HtmlElement = by_id(document, &ids.tooltip)?;
        let tooltip_title = child(&tooltip, ".tooltip-title")?;
        let tooltip_author = child(&tooltip, ".tooltip-author")?;

        Ok(Self {
            grid: by_id(document, &ids.grid)?,
            tooltip,
            tooltip_title,
            tooltip_author,
            search_input: by_id(document, &ids.search_input)?,
            search_button: by_id(document, &ids.search_button)?,
            clear_search_button: by_id(document, &ids.clear_search_button)?,
            genre_filter: by_id(document, &ids.genre_filter)?,
            login_button: by_id(document, &ids.login_button)?,
            // optional: pages without a logout control keep admin mode until reload
            logout_button: by_id(document, &ids.logout_button).ok(),
            add_book_modal: by_id(document, &ids.add_book_modal)?,
            open_add_book_button: by_id(document, &ids.open_add_book_button)?,
            close_add_book_button: by_id(document, &ids.close_add_book_button)?,
            add_book_form: by_id(document, &ids.add_book_form)?,
            title_input: by_id(document, &ids.title_input)?,
            author_input: by_id(document, &ids.author_input)?,
            slot_select: by_id(document, &ids.slot_select)?,
            details_modal: by_id(document, &ids.details_modal)?,
            close_details_button: by_id(document, &ids.close_details_button)?,
            details_title: by_id(document, &ids.details_title)?,
            details_author: by_id(document, &ids.details_author)?,
            search_link: by_id(document, &ids.search_link)?,
            delete_book_button: by_id(document, &ids.delete_book_button)?,
        })
    }
}
