//! Library controller
//!
//! `LibraryApp` is the single owner of the catalog, the derived view state, the
//! current display list and the interaction layer. The DOM layer forwards every
//! user action here and renders whatever comes back; network calls are handed
//! out as `ApiRequest` values and their results fed back in.

use crate::config::LibraryConfig;
use crate::filter::{self, SearchSummary};
use crate::gateway::{ApiError, ApiRequest};
use crate::interaction::{
    AddBookForm, AddBookOutcome, BookDetails, DeleteOutcome, DeleteRequest, FormError, InteractionLayer, SlotOption,
    TooltipContent,
};
use crate::models::{Catalog, GenreFilter, LayoutError, LayoutGrid, ViewState};
use crate::shelf_layout::{RenderBook, ShelfDisplayList, ShelfLayoutEngine};

/// Message that replaces the grid when the catalog cannot be loaded
pub const LOAD_FAILURE_MESSAGE: &str = "Could not load the library.";

/// Catalog load lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading { seq: u64 },
    Ready,
    Failed(String),
}

/// What the page should show after a load finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// New display list available
    Rendered,
    /// First load failed: replace the grid with this message
    GridError(String),
    /// Reload failed: keep the previous grid, tell the user
    ReloadFailed(String),
}

/// Controller for one page session
#[derive(Debug)]
pub struct LibraryApp {
    config: LibraryConfig,
    grid: LayoutGrid,
    engine: ShelfLayoutEngine,
    catalog: Catalog,
    genres: Vec<String>,
    view: ViewState,
    display: Option<ShelfDisplayList>,
    status: LoadStatus,
    load_seq: u64,
    pub interaction: InteractionLayer,
}

impl LibraryApp {
    /// Create the controller; fails only on an invalid layout override
    pub fn new(config: LibraryConfig, touch_primary: bool) -> Result<Self, LayoutError> {
        let grid = config.layout_grid()?;
        let engine = ShelfLayoutEngine::new(config.title_max_len);

        Ok(Self {
            config,
            grid,
            engine,
            catalog: Catalog::new(),
            genres: Vec::new(),
            view: ViewState::default(),
            display: None,
            status: LoadStatus::Idle,
            load_seq: 0,
            interaction: InteractionLayer::new(touch_primary),
        })
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    pub fn grid(&self) -> &LayoutGrid {
        &self.grid
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn display(&self) -> Option<&ShelfDisplayList> {
        self.display.as_ref()
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Start a catalog fetch. Returns the sequence number of this load and the
    /// request to send.
    pub fn begin_load(&mut self, timestamp_ms: u64) -> (u64, ApiRequest) {
        self.load_seq += 1;
        self.status = LoadStatus::Loading { seq: self.load_seq };
        log::info!("loading catalog (load #{})", self.load_seq);
        (self.load_seq, self.config.endpoints.fetch_catalog(timestamp_ms))
    }

    /// Apply a finished catalog fetch. Responses are applied in arrival order;
    /// `seq` is only used for logging.
    pub fn finish_load(&mut self, seq: u64, result: Result<String, ApiError>) -> LoadOutcome {
        if seq != self.load_seq {
            log::warn!("applying load #{} while load #{} is the latest", seq, self.load_seq);
        }

        let body = match result {
            Ok(body) => body,
            Err(e) => {
                log::error!("catalog load #{} failed: {}", seq, e);
                return if self.display.is_some() {
                    self.status = LoadStatus::Ready;
                    LoadOutcome::ReloadFailed(e.user_message())
                } else {
                    self.status = LoadStatus::Failed(LOAD_FAILURE_MESSAGE.to_string());
                    LoadOutcome::GridError(LOAD_FAILURE_MESSAGE.to_string())
                };
            }
        };

        self.catalog = Catalog::from_json(&body);
        self.genres = self.catalog.genres();

        // a genre that disappeared with the reload cannot stay selected
        if let GenreFilter::Genre(selected) = &self.view.selected_genre {
            if !self.genres.contains(selected) {
                self.view.selected_genre = GenreFilter::All;
            }
        }
        filter::refresh(&self.catalog, &mut self.view);

        self.display = Some(self.engine.render(&self.grid, &self.catalog, &self.view));
        self.interaction.tooltip.hide();
        self.status = LoadStatus::Ready;
        log::info!(
            "catalog load #{} ready: {} books in {} genres",
            seq,
            self.catalog.book_count(),
            self.genres.len()
        );
        LoadOutcome::Rendered
    }

    // ------------------------------------------------------------------
    // Filter and search
    // ------------------------------------------------------------------

    /// Genre selector changed (`"all"` clears the filter)
    pub fn set_genre(&mut self, selector_value: &str) -> SearchSummary {
        let summary = filter::apply_genre_filter(
            &self.catalog,
            &mut self.view,
            GenreFilter::from_selector(selector_value),
        );
        self.restamp();
        log::debug!("genre filter: {:?}", summary);
        summary
    }

    pub fn search(&mut self, raw_term: &str) -> SearchSummary {
        let summary = filter::apply_search(&self.catalog, &mut self.view, raw_term);
        self.restamp();
        log::debug!("search: {:?}", summary);
        summary
    }

    pub fn clear_search(&mut self) -> SearchSummary {
        self.search("")
    }

    fn restamp(&mut self) {
        if let Some(display) = self.display.as_mut() {
            display.apply_view_state(&self.view);
        }
    }

    /// Book in an undimmed slot
    fn interactive_book(&self, book_id: &str) -> Option<&RenderBook> {
        let display = self.display.as_ref()?;
        let book = display.book(book_id)?;
        let dimmed = display.slot(book.slot).is_some_and(|slot| slot.dimmed);
        (!dimmed).then_some(book)
    }

    // ------------------------------------------------------------------
    // Tooltip
    // ------------------------------------------------------------------

    /// Pointer entered a spine; returns the tooltip content when it should show
    pub fn hover_book(&mut self, book_id: &str) -> Option<TooltipContent> {
        let content = self.interactive_book(book_id).map(|book| TooltipContent {
            book_id: book.id.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
        })?;

        let modal_open = self.interaction.modal_open();
        self.interaction
            .tooltip
            .show(content.clone(), modal_open)
            .then_some(content)
    }

    /// Pointer left a spine; true when the tooltip must be hidden
    pub fn leave_book(&mut self, book_id: &str) -> bool {
        self.interaction.tooltip.leave(book_id)
    }

    // ------------------------------------------------------------------
    // Details / delete
    // ------------------------------------------------------------------

    /// Spine clicked; opens the details dialog for undimmed books
    pub fn click_book(&mut self, book_id: &str) -> Option<BookDetails> {
        let details = self
            .interactive_book(book_id)
            .map(|book| BookDetails::from_render_book(book, &self.config.search_link_template))?;

        self.interaction.tooltip.hide();
        self.interaction.details.open(details.clone());
        Some(details)
    }

    pub fn close_details(&mut self) {
        self.interaction.details.close();
    }

    /// Delete the book shown in the details dialog once confirmed
    pub fn request_delete(&mut self, confirmed: bool) -> Option<DeleteRequest> {
        let pending = self.interaction.details.delete_request(
            confirmed,
            &self.config.endpoints,
            &self.interaction.session,
        );
        if let Some(pending) = &pending {
            log::info!("deleting book {} via {}", pending.book_id, pending.request.url);
        }
        pending
    }

    /// Apply the answer to the delete of `book_id`
    pub fn finish_delete(&mut self, book_id: &str, result: Result<String, ApiError>) -> DeleteOutcome {
        let outcome = self.interaction.details.on_delete_response(book_id, result);
        match &outcome {
            DeleteOutcome::Failed(message) => log::warn!("delete of book {} failed: {}", book_id, message),
            DeleteOutcome::Discarded(message) => {
                log::warn!("delete of book {} failed after its dialog closed: {}", book_id, message)
            }
            DeleteOutcome::Deleted { .. } => log::info!("book {} deleted", book_id),
        }
        outcome
    }

    // ------------------------------------------------------------------
    // Add book
    // ------------------------------------------------------------------

    pub fn open_add_book(&mut self) -> bool {
        self.interaction.tooltip.hide();
        self.interaction
            .add_book
            .open(&self.interaction.session, &self.grid, &self.catalog)
    }

    pub fn close_add_book(&mut self) {
        self.interaction.add_book.close();
    }

    pub fn slot_options(&self) -> &[SlotOption] {
        self.interaction.add_book.options()
    }

    pub fn submit_add_book(&mut self, form: &AddBookForm) -> Result<ApiRequest, FormError> {
        let result = self.interaction.add_book.submit(
            form,
            &self.grid,
            &self.config.endpoints,
            &self.interaction.session,
        );
        match &result {
            Ok(request) => log::info!("adding book via {}", request.url),
            Err(e) => log::warn!("add-book rejected: {}", e),
        }
        result
    }

    pub fn finish_add_book(&mut self, result: Result<String, ApiError>) -> AddBookOutcome {
        let outcome = self.interaction.add_book.on_response(result);
        match &outcome {
            AddBookOutcome::Failed(message) => log::warn!("add-book failed: {}", message),
            AddBookOutcome::Discarded(message) => log::warn!("add-book failed after its form closed: {}", message),
            AddBookOutcome::Created { .. } => log::info!("book added"),
        }
        outcome
    }

    // ------------------------------------------------------------------
    // Admin
    // ------------------------------------------------------------------

    pub fn login(&mut self, credential: &str) -> bool {
        let ok = self.interaction.session.login(credential);
        if ok {
            log::info!("admin mode enabled");
        }
        ok
    }

    pub fn logout(&mut self) {
        self.interaction.session.logout();
        self.interaction.add_book.close();
        log::info!("admin mode disabled");
    }

    pub fn is_admin(&self) -> bool {
        self.interaction.session.is_admin()
    }
}
