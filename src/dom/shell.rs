//! Page shell
//!
//! Binds page controls to the `LibraryApp` controller and renders its output.
//! Borrows of the controller are always released before awaiting, alerting or
//! touching the DOM in ways that can fire events.

use super::elements::{document, set_display, window, DomError, PageElements};
use super::mount::{mount_grid, populate_select, show_grid_error, MountedGrid};
use crate::app::{LibraryApp, LoadOutcome};
use crate::config::LibraryConfig;
use crate::gateway::{client, ApiError, ApiRequest, ApiResponse};
use crate::interaction::{
    place_tooltip, AddBookForm, AddBookOutcome, BookDetails, DeleteOutcome, DeleteRequest, Rect, TooltipContent,
};
use crate::models::ALL_GENRES;
use crate::{wasm_error, wasm_info, wasm_log, wasm_warn};
use gloo::dialogs::{alert, confirm, prompt};
use gloo::events::{EventListener, EventListenerOptions};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, EventTarget, HtmlElement, KeyboardEvent, Window};

const ALL_GENRES_LABEL: &str = "All genres";
const LOGIN_PROMPT: &str = "Enter the admin key:";
const LOGIN_REQUIRED_MESSAGE: &str = "Admin login required.";
const BOOK_ADDED_MESSAGE: &str = "Book added successfully!";

/// Whether the device has no hover (touch-primary)
fn is_touch_primary(window: &Window) -> bool {
    let has_touch_events = js_sys::Reflect::has(window.as_ref(), &"ontouchstart".into()).unwrap_or(false);
    has_touch_events || window.navigator().max_touch_points() > 0
}

/// Live binding between the page and the controller
pub struct LibraryShell {
    window: Window,
    document: Document,
    elements: PageElements,
    app: RefCell<LibraryApp>,
    mounted: RefCell<MountedGrid>,
    listeners: RefCell<Vec<EventListener>>,
}

impl LibraryShell {
    /// Bind to the page and start the first catalog load
    pub fn start(config: LibraryConfig) -> Result<Rc<Self>, DomError> {
        let window = window()?;
        let document = document(&window)?;
        let elements = PageElements::find(&document, &config.elements)?;
        let touch_primary = is_touch_primary(&window);
        let app = LibraryApp::new(config, touch_primary).map_err(|e| DomError::Config(e.to_string()))?;

        wasm_info!("library shell starting (touch primary: {})", touch_primary);

        let shell = Rc::new(Self {
            window,
            document,
            elements,
            app: RefCell::new(app),
            mounted: RefCell::new(MountedGrid::default()),
            listeners: RefCell::new(Vec::new()),
        });

        shell.bind_controls();
        shell.sync_admin_controls();
        shell.reload();
        Ok(shell)
    }

    // ------------------------------------------------------------------
    // Event plumbing
    // ------------------------------------------------------------------

    fn listener<F>(self: &Rc<Self>, target: &EventTarget, event: &'static str, handler: F) -> EventListener
    where
        F: Fn(&Rc<Self>, &Event) + 'static,
    {
        let weak = Rc::downgrade(self);
        EventListener::new(target, event, move |e| {
            if let Some(shell) = weak.upgrade() {
                handler(&shell, e);
            }
        })
    }

    fn listen<F>(self: &Rc<Self>, target: &EventTarget, event: &'static str, handler: F)
    where
        F: Fn(&Rc<Self>, &Event) + 'static,
    {
        let listener = self.listener(target, event, handler);
        self.listeners.borrow_mut().push(listener);
    }

    /// Close `modal` when the click landed on its backdrop
    fn on_backdrop<F>(self: &Rc<Self>, modal: &HtmlElement, close: F)
    where
        F: Fn(&Rc<Self>) + 'static,
    {
        let modal_target: EventTarget = modal.clone().into();
        self.listen(modal, "click", move |shell, e| {
            if e.target().as_ref() == Some(&modal_target) {
                close(shell);
            }
        });
    }

    fn spawn_request<F>(self: &Rc<Self>, request: ApiRequest, on_done: F)
    where
        F: FnOnce(&Rc<Self>, Result<String, ApiError>) + 'static,
    {
        let weak: Weak<Self> = Rc::downgrade(self);
        wasm_bindgen_futures::spawn_local(async move {
            let result = client::send(&request).await.and_then(ApiResponse::into_result);
            match weak.upgrade() {
                Some(shell) => on_done(&shell, result),
                None => wasm_warn!("page shell dropped before {} completed", request.url),
            }
        });
    }

    fn bind_controls(self: &Rc<Self>) {
        let el = &self.elements;

        // search and filter
        self.listen(&el.search_button, "click", |shell, _| shell.run_search());
        self.listen(&el.search_input, "keydown", |shell, e| {
            if e.dyn_ref::<KeyboardEvent>().is_some_and(|k| k.key() == "Enter") {
                shell.run_search();
            }
        });
        self.listen(&el.clear_search_button, "click", |shell, _| {
            shell.elements.search_input.set_value("");
            shell.app.borrow_mut().clear_search();
            shell.apply_flags();
        });
        self.listen(&el.genre_filter, "change", |shell, _| {
            let value = shell.elements.genre_filter.value();
            shell.app.borrow_mut().set_genre(&value);
            shell.apply_flags();
        });

        // admin
        self.listen(&el.login_button, "click", |shell, _| shell.login());
        if let Some(logout) = &el.logout_button {
            self.listen(logout, "click", |shell, _| {
                shell.app.borrow_mut().logout();
                shell.hide_modal(&shell.elements.add_book_modal);
                shell.sync_admin_controls();
            });
        }

        // add-book dialog
        self.listen(&el.open_add_book_button, "click", |shell, _| shell.open_add_book());
        self.listen(&el.close_add_book_button, "click", |shell, _| shell.close_add_book());
        self.on_backdrop(&el.add_book_modal, |shell| shell.close_add_book());
        let submit = {
            let weak = Rc::downgrade(self);
            EventListener::new_with_options(
                &el.add_book_form,
                "submit",
                EventListenerOptions::enable_prevent_default(),
                move |e| {
                    e.prevent_default();
                    if let Some(shell) = weak.upgrade() {
                        shell.submit_add_book();
                    }
                },
            )
        };
        self.listeners.borrow_mut().push(submit);

        // details dialog
        self.listen(&el.close_details_button, "click", |shell, _| shell.close_details());
        self.on_backdrop(&el.details_modal, |shell| shell.close_details());
        self.listen(&el.delete_book_button, "click", |shell, _| shell.delete_book());
    }

    // ------------------------------------------------------------------
    // Loading and rendering
    // ------------------------------------------------------------------

    /// Fetch the catalog and re-render when it arrives
    pub fn reload(self: &Rc<Self>) {
        let (seq, request) = self.app.borrow_mut().begin_load(js_sys::Date::now() as u64);
        self.spawn_request(request, move |shell, result| {
            let outcome = shell.app.borrow_mut().finish_load(seq, result);
            match outcome {
                LoadOutcome::Rendered => shell.render(),
                LoadOutcome::GridError(message) => {
                    shell.mounted.replace(MountedGrid::default());
                    if let Err(e) = show_grid_error(&shell.document, &shell.elements.grid, &message) {
                        wasm_error!("could not show load error: {}", e);
                    }
                }
                LoadOutcome::ReloadFailed(message) => alert(&message),
            }
        });
    }

    fn render(self: &Rc<Self>) {
        if let Err(e) = self.try_render() {
            wasm_error!("render failed: {}", e);
        }
    }

    fn try_render(self: &Rc<Self>) -> Result<(), DomError> {
        let (display, genres, selected) = {
            let app = self.app.borrow();
            let Some(display) = app.display().cloned() else {
                return Ok(());
            };
            (display, app.genres().to_vec(), app.view().selected_genre.to_string())
        };

        // old spine listeners go with the old elements
        self.mounted.replace(MountedGrid::default());
        set_display(&self.elements.tooltip, "none")?;

        let mut mounted = mount_grid(&self.document, &self.elements.grid, &display)?;
        for (id, spine) in &mounted.books {
            mounted.listeners.extend(self.spine_listeners(id, spine));
        }
        self.mounted.replace(mounted);

        let options = std::iter::once((ALL_GENRES, ALL_GENRES_LABEL))
            .chain(genres.iter().map(|g| (g.as_str(), g.as_str())));
        populate_select(&self.elements.genre_filter, options, &selected)?;

        self.sync_admin_controls();
        wasm_info!("rendered {} slots", display.slots.len());
        Ok(())
    }

    fn spine_listeners(self: &Rc<Self>, id: &str, spine: &HtmlElement) -> [EventListener; 3] {
        let enter_id = id.to_string();
        let leave_id = id.to_string();
        let click_id = id.to_string();
        let anchor = spine.clone();

        [
            self.listener(spine, "mouseenter", move |shell, _| {
                let content = shell.app.borrow_mut().hover_book(&enter_id);
                if let Some(content) = content {
                    if let Err(e) = shell.show_tooltip(&content, &anchor) {
                        wasm_warn!("tooltip failed: {}", e);
                    }
                }
            }),
            self.listener(spine, "mouseleave", move |shell, _| {
                let hide = shell.app.borrow_mut().leave_book(&leave_id);
                if hide {
                    shell.hide_tooltip();
                }
            }),
            self.listener(spine, "click", move |shell, _| {
                let details = shell.app.borrow_mut().click_book(&click_id);
                if let Some(details) = details {
                    shell.show_details(&details);
                }
            }),
        ]
    }

    fn apply_flags(&self) {
        let app = self.app.borrow();
        if let Some(display) = app.display() {
            self.mounted.borrow().apply(display);
        }
    }

    fn run_search(&self) {
        let term = self.elements.search_input.value();
        self.app.borrow_mut().search(&term);
        self.apply_flags();
    }

    // ------------------------------------------------------------------
    // Tooltip
    // ------------------------------------------------------------------

    fn show_tooltip(&self, content: &TooltipContent, anchor: &HtmlElement) -> Result<(), DomError> {
        let el = &self.elements;
        el.tooltip_title.set_text_content(Some(&content.title));
        el.tooltip_author.set_text_content(Some(&content.author));
        set_display(&el.tooltip, "block")?;

        let anchor_rect = anchor.get_bounding_client_rect();
        let tip_rect = el.tooltip.get_bounding_client_rect();
        let viewport_width = self.window.inner_width()?.as_f64().unwrap_or(0.0);

        let placement = place_tooltip(
            Rect::new(anchor_rect.left(), anchor_rect.top(), anchor_rect.width(), anchor_rect.height()),
            tip_rect.width(),
            tip_rect.height(),
            viewport_width,
            &self.app.borrow().config().tooltip,
        );

        let style = el.tooltip.style();
        style.set_property("left", &format!("{}px", placement.left))?;
        style.set_property("top", &format!("{}px", placement.top))?;
        Ok(())
    }

    fn hide_tooltip(&self) {
        if let Err(e) = set_display(&self.elements.tooltip, "none") {
            wasm_warn!("could not hide tooltip: {}", e);
        }
    }

    // ------------------------------------------------------------------
    // Dialogs
    // ------------------------------------------------------------------

    fn show_modal(&self, modal: &HtmlElement) {
        self.hide_tooltip();
        if let Err(e) = set_display(modal, "block") {
            wasm_warn!("could not open dialog: {}", e);
        }
    }

    fn hide_modal(&self, modal: &HtmlElement) {
        if let Err(e) = set_display(modal, "none") {
            wasm_warn!("could not close dialog: {}", e);
        }
    }

    fn show_details(&self, details: &BookDetails) {
        let el = &self.elements;
        el.details_title.set_text_content(Some(&details.title));
        el.details_author.set_text_content(Some(&details.author));
        el.search_link.set_href(&details.search_link);
        self.sync_admin_controls();
        self.show_modal(&el.details_modal);
    }

    fn close_details(&self) {
        self.app.borrow_mut().close_details();
        self.hide_modal(&self.elements.details_modal);
    }

    fn open_add_book(&self) {
        let opened = self.app.borrow_mut().open_add_book();
        if !opened {
            alert(LOGIN_REQUIRED_MESSAGE);
            return;
        }

        let options = self.app.borrow().slot_options().to_vec();
        let pairs = options.iter().map(|o| (o.value.as_str(), o.label.as_str()));
        if let Err(e) = populate_select(&self.elements.slot_select, pairs, "") {
            wasm_error!("could not fill slot selector: {}", e);
        }
        self.elements.add_book_form.reset();
        self.show_modal(&self.elements.add_book_modal);
    }

    fn close_add_book(&self) {
        self.app.borrow_mut().close_add_book();
        self.hide_modal(&self.elements.add_book_modal);
    }

    fn submit_add_book(self: &Rc<Self>) {
        let el = &self.elements;
        let form = AddBookForm {
            title: el.title_input.value(),
            author: el.author_input.value(),
            slot_key: el.slot_select.value(),
        };

        let submitted = self.app.borrow_mut().submit_add_book(&form);
        let request = match submitted {
            Ok(request) => request,
            Err(e) => {
                alert(&e.to_string());
                return;
            }
        };

        self.spawn_request(request, |shell, result| {
            let outcome = shell.app.borrow_mut().finish_add_book(result);
            match outcome {
                AddBookOutcome::Created { closed_dialog } => {
                    if closed_dialog {
                        shell.hide_modal(&shell.elements.add_book_modal);
                    }
                    alert(BOOK_ADDED_MESSAGE);
                    shell.reload();
                }
                AddBookOutcome::Failed(message) => alert(&format!("Could not add the book: {}", message)),
                AddBookOutcome::Discarded(message) => wasm_log!("add-book answer for a closed form: {}", message),
            }
        });
    }

    fn delete_book(self: &Rc<Self>) {
        let Some(question) = self.app.borrow().interaction.details.confirmation_prompt() else {
            return;
        };
        let confirmed = confirm(&question);

        let pending = self.app.borrow_mut().request_delete(confirmed);
        let Some(DeleteRequest { book_id, request }) = pending else {
            return;
        };

        self.spawn_request(request, move |shell, result| {
            let outcome = shell.app.borrow_mut().finish_delete(&book_id, result);
            match outcome {
                DeleteOutcome::Deleted { closed_dialog } => {
                    if closed_dialog {
                        shell.hide_modal(&shell.elements.details_modal);
                    }
                    shell.reload();
                }
                DeleteOutcome::Failed(message) => alert(&format!("Could not delete the book: {}", message)),
                DeleteOutcome::Discarded(message) => {
                    wasm_log!("delete answer for book {} after its dialog moved on: {}", book_id, message)
                }
            }
        });
    }

    // ------------------------------------------------------------------
    // Admin
    // ------------------------------------------------------------------

    fn login(&self) {
        let Some(credential) = prompt(LOGIN_PROMPT, None) else {
            return;
        };
        let ok = self.app.borrow_mut().login(&credential);
        if ok {
            self.sync_admin_controls();
        }
    }

    /// Show or hide admin-only controls
    fn sync_admin_controls(&self) {
        let admin = self.app.borrow().is_admin();
        let (admin_display, visitor_display) = if admin { ("inline-block", "none") } else { ("none", "inline-block") };

        let el = &self.elements;
        let mut updates = vec![
            (&el.open_add_book_button, admin_display),
            (&el.delete_book_button, admin_display),
            (&el.login_button, visitor_display),
        ];
        if let Some(logout) = &el.logout_button {
            updates.push((logout, admin_display));
        }

        for (element, display) in updates {
            if let Err(e) = set_display(element, display) {
                wasm_warn!("could not toggle admin control: {}", e);
            }
        }
    }
}
