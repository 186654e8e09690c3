//! Building grid elements from the display list

use super::elements::{create_html, DomError};
use crate::shelf_layout::{RenderSlot, ShelfDisplayList, SlotKind};
use gloo::events::EventListener;
use web_sys::{Document, HtmlElement, HtmlOptionElement, HtmlSelectElement};

/// Elements of the current render, parallel to the display list
#[derive(Default)]
pub struct MountedGrid {
    pub slots: Vec<HtmlElement>,
    pub books: Vec<(String, HtmlElement)>,
    /// Per-spine listeners; dropped (and detached) with the render
    pub listeners: Vec<EventListener>,
}

impl MountedGrid {
    /// Restamp classes after a filter or search change
    pub fn apply(&self, display: &ShelfDisplayList) {
        for (element, slot) in self.slots.iter().zip(&display.slots) {
            element.set_class_name(&slot.classes.join(" "));
        }
        for ((_, element), book) in self.books.iter().zip(display.books()) {
            element.set_class_name(&book.classes.join(" "));
        }
    }
}

/// Replace the container's content with one element per slot.
/// Listeners are attached by the caller.
pub fn mount_grid(document: &Document, container: &HtmlElement, display: &ShelfDisplayList) -> Result<MountedGrid, DomError> {
    container.set_inner_html("");
    container
        .style()
        .set_property("grid-template-columns", &format!("repeat({}, 1fr)", display.columns))?;

    let mut mounted = MountedGrid::default();
    for slot in &display.slots {
        let element = build_slot(document, slot, &mut mounted.books)?;
        container.append_child(&element)?;
        mounted.slots.push(element);
    }
    Ok(mounted)
}

fn build_slot(
    document: &Document,
    slot: &RenderSlot,
    books: &mut Vec<(String, HtmlElement)>,
) -> Result<HtmlElement, DomError> {
    let element = create_html(document, "div")?;
    element.set_class_name(&slot.classes.join(" "));

    match slot.kind {
        SlotKind::Shelf => {
            if let Some(genre) = &slot.genre {
                element.set_title(genre);
            }
            for book in &slot.books {
                let spine = create_html(document, "div")?;
                spine.set_class_name(&book.classes.join(" "));
                spine.style().set_property("background-color", &book.color)?;

                let text = create_html(document, "span")?;
                text.set_class_name("spine-text");
                text.set_text_content(Some(&book.display_title));
                spine.append_child(&text)?;

                element.append_child(&spine)?;
                books.push((book.id.clone(), spine));
            }
        }
        SlotKind::Empty => element.set_text_content(slot.label.as_deref()),
        SlotKind::Inactive => {}
    }

    Ok(element)
}

/// Replace the grid with a static error message
pub fn show_grid_error(document: &Document, container: &HtmlElement, message: &str) -> Result<(), DomError> {
    container.set_inner_html("");
    let paragraph = create_html(document, "p")?;
    paragraph.set_class_name("load-error");
    paragraph.set_text_content(Some(message));
    container.append_child(&paragraph)?;
    Ok(())
}

/// Replace a selector's options and restore `selected` when still present
pub fn populate_select<'a>(
    select: &HtmlSelectElement,
    options: impl IntoIterator<Item = (&'a str, &'a str)>,
    selected: &str,
) -> Result<(), DomError> {
    select.set_inner_html("");
    for (value, label) in options {
        let option = HtmlOptionElement::new_with_text_and_value(label, value)?;
        select.append_child(&option)?;
    }
    select.set_value(selected);
    Ok(())
}
