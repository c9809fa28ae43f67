//! View state held by the rendering collaborator.
//!
//! Everything the screen needs besides the records themselves (filter
//! selections, search term, selected record, current page) lives here and is
//! passed into the pipeline explicitly. [`ViewState::sync`] notices when the
//! store has loaded a new collection and resets all of it.

use crate::filter::{apply, FilterState};
use crate::models::{Email, EmailId, TokenField};
use crate::store::RecordStore;

/// Filters, search, selection and page for one screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    filters: FilterState,
    search_term: String,
    selected: Option<EmailId>,
    page: usize,
    page_size: usize,
    generation: u64,
}

impl ViewState {
    /// Fresh state paging `page_size` records at a time (0 is treated as 1)
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            filters: FilterState::default(),
            search_term: String::new(),
            selected: None,
            page: 0,
            page_size: page_size.max(1),
            generation: 0,
        }
    }

    /// Reset if `store` has loaded a different collection since the last sync.
    ///
    /// After a reset the first record (if any) is selected. Returns whether a
    /// reset happened.
    pub fn sync(&mut self, store: &RecordStore) -> bool {
        if self.generation == store.generation() {
            return false;
        }
        self.generation = store.generation();
        self.filters.clear();
        self.search_term.clear();
        self.page = 0;
        self.selected = store.records().first().map(|email| email.id);
        true
    }

    /// Current filter selections
    #[must_use]
    pub const fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Replace all filter selections and return to the first page
    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
        self.page = 0;
    }

    /// Toggle one token in one stage and return to the first page
    pub fn toggle_filter(&mut self, field: TokenField, token: &str) -> bool {
        self.page = 0;
        self.filters.toggle(field, token)
    }

    /// Drop every filter selection
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.page = 0;
    }

    /// Current search term, untrimmed as typed
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Replace the search term and return to the first page
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.page = 0;
    }

    /// Currently selected record id
    #[must_use]
    pub const fn selected(&self) -> Option<EmailId> {
        self.selected
    }

    /// Open a record: select it and mark it read in the store
    pub fn select(&mut self, store: &mut RecordStore, id: EmailId) {
        self.selected = Some(id);
        store.mark_read(id);
    }

    /// Close the detail view
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Records passing the current filters and search, in collection order
    #[must_use]
    pub fn visible<'a>(&self, store: &'a RecordStore) -> Vec<&'a Email> {
        apply(store.records(), &self.filters, &self.search_term)
    }

    /// Number of pages needed for `total` records (at least 1)
    #[must_use]
    pub const fn page_count(&self, total: usize) -> usize {
        if total == 0 {
            1
        } else {
            total.div_ceil(self.page_size)
        }
    }

    /// Zero-based current page
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Move to `page`, clamped to the last page for `total` records
    pub fn set_page(&mut self, page: usize, total: usize) {
        self.page = page.min(self.page_count(total) - 1);
    }

    /// Slice of `visible` shown on the current page
    #[must_use]
    pub fn current_page<'v, 'a>(&self, visible: &'v [&'a Email]) -> &'v [&'a Email] {
        visible
            .chunks(self.page_size)
            .nth(self.page)
            .unwrap_or_default()
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(50)
    }
}
