//! Explicit application state. Every interaction is a method that mutates
//! the state and recomputes what depends on it; views are derived on demand.

use std::time::Instant;

use grc_core::errors::GrcError;
use grc_data::{DatasetSource, DatasetStore, GovernanceRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{validate_config, DashboardConfig};
use crate::debounce::Debouncer;
use crate::explorer::{explorer_view, tab_pages, ExplorerState, ExplorerTab, ExplorerView};
use crate::filter::{filter_indices, FilterField, FilterSet};
use crate::focus::FocusMode;
use crate::snapshot::DashboardSnapshot;

/// Top-level view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    /// KPI, chart and table panels with the filter bar.
    #[default]
    Dashboard,
    /// Raw collection browser.
    Explorer,
}

/// Dashboard state over a loaded dataset store.
#[derive(Debug)]
pub struct AppState {
    store: DatasetStore,
    config: DashboardConfig,
    filters: FilterSet,
    filtered: Vec<usize>,
    focus: FocusMode,
    view: ViewMode,
    explorer: ExplorerState,
    search: Debouncer<String>,
}

impl AppState {
    /// Wraps an already loaded store.
    pub fn new(store: DatasetStore, config: DashboardConfig) -> Result<Self, GrcError> {
        validate_config(&config)?;
        let filtered = (0..store.governance().len()).collect();
        let search = Debouncer::new(config.search_debounce());
        Ok(Self {
            store,
            config,
            filters: FilterSet::default(),
            filtered,
            focus: FocusMode::default(),
            view: ViewMode::default(),
            explorer: ExplorerState::default(),
            search,
        })
    }

    /// Loads every collection from `source` and builds the initial state.
    /// Any fetch or decode failure aborts startup.
    pub fn bootstrap<S>(source: &S, config: DashboardConfig) -> Result<Self, GrcError>
    where
        S: DatasetSource + ?Sized,
    {
        validate_config(&config)?;
        let store = DatasetStore::load(source)?;
        info!(
            governance = store.governance().len(),
            quality = store.quality().len(),
            projects = store.projects().len(),
            policies = store.policies().len(),
            "dashboard state ready"
        );
        Self::new(store, config)
    }

    /// Loads from the directory named by the configuration.
    pub fn from_config(config: DashboardConfig) -> Result<Self, GrcError> {
        let source = config.directory_source();
        Self::bootstrap(&source, config)
    }

    /// Loaded collections.
    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    /// Active configuration.
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Raw filter values.
    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Active focus mode.
    pub fn focus(&self) -> FocusMode {
        self.focus
    }

    /// Active view.
    pub fn view(&self) -> ViewMode {
        self.view
    }

    /// Explorer tab, page and committed search.
    pub fn explorer(&self) -> &ExplorerState {
        &self.explorer
    }

    /// Filtered governance view, in collection order.
    pub fn filtered(&self) -> Vec<&GovernanceRecord> {
        let records = self.store.governance();
        self.filtered.iter().filter_map(|&idx| records.get(idx)).collect()
    }

    /// Size of the filtered view.
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    fn recompute(&mut self) {
        self.filtered = filter_indices(self.store.governance(), &self.filters);
        debug!(
            filtered = self.filtered.len(),
            total = self.store.governance().len(),
            "filters applied"
        );
    }

    /// Updates one filter field and recomputes the filtered view.
    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        self.filters.set(field, value);
        self.recompute();
    }

    /// Clears every filter and recomputes.
    pub fn reset_filters(&mut self) {
        self.filters = FilterSet::default();
        self.recompute();
    }

    /// Switches the focus mode. Any mode may follow any other.
    pub fn set_focus(&mut self, focus: FocusMode) {
        debug!(from = ?self.focus, to = ?focus, "focus switched");
        self.focus = focus;
    }

    /// Switches between dashboard and explorer.
    pub fn show_view(&mut self, view: ViewMode) {
        debug!(from = ?self.view, to = ?view, "view switched");
        self.view = view;
    }

    /// Switches explorer tab; page and search go back to their defaults and
    /// any pending keystrokes are dropped.
    pub fn switch_tab(&mut self, tab: ExplorerTab) {
        self.search.cancel();
        self.explorer.switch_tab(tab);
    }

    /// Records a search keystroke. The query is committed by [`tick`](Self::tick)
    /// once the debounce window has passed without further input.
    pub fn search_input(&mut self, text: impl Into<String>, now: Instant) {
        self.search.schedule(text.into(), now);
    }

    /// Commits a debounced search whose window has elapsed. Returns true when
    /// the explorer changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.search.poll(now) {
            Some(query) => {
                debug!(query = %query, "search committed");
                self.explorer.set_search(query);
                true
            }
            None => false,
        }
    }

    /// True while a search keystroke waits for its window.
    pub fn search_pending(&self) -> bool {
        self.search.is_pending()
    }

    fn pages(&self) -> usize {
        tab_pages(&self.store, &self.explorer, self.config.page_size)
    }

    /// Next explorer page, stopping at the last.
    pub fn next_page(&mut self) {
        let pages = self.pages();
        self.explorer.next(pages);
    }

    /// Previous explorer page, stopping at the first.
    pub fn prev_page(&mut self) {
        let pages = self.pages();
        self.explorer.prev(pages);
    }

    /// Jumps to an explorer page, clamped into range.
    pub fn jump_page(&mut self, page: usize) {
        let pages = self.pages();
        self.explorer.jump(page, pages);
    }

    /// Dashboard panels for the current filters and focus.
    pub fn snapshot(&self) -> DashboardSnapshot {
        let filtered = self.filtered();
        DashboardSnapshot::build(
            &self.store,
            &filtered,
            &self.filters,
            self.focus,
            &self.config,
        )
    }

    /// Explorer page for the current tab, page and search.
    pub fn explorer_view(&self) -> ExplorerView {
        explorer_view(
            &self.store,
            &self.config.files,
            &self.explorer,
            self.config.page_size,
        )
    }
}
