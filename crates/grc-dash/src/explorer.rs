//! Paged, searchable browser over the four raw collections.

use grc_data::{DatasetFiles, DatasetKind, DatasetStore, Record};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::paginate::{clamp_page, page_count, paginate, search, PageMeta};
use crate::table::{
    governance_columns, policy_columns, project_columns, quality_columns, Cell, Column,
    ColumnHeader, TableBlock,
};

/// Explorer tab, one per collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExplorerTab {
    /// IT risk and controls.
    #[default]
    Governance,
    /// Data quality.
    Quality,
    /// IT projects.
    Projects,
    /// Policy catalog.
    Policies,
}

impl ExplorerTab {
    /// Tabs in display order.
    pub const ALL: [ExplorerTab; 4] = [
        ExplorerTab::Governance,
        ExplorerTab::Quality,
        ExplorerTab::Projects,
        ExplorerTab::Policies,
    ];

    /// Collection browsed by the tab.
    pub fn kind(self) -> DatasetKind {
        match self {
            ExplorerTab::Governance => DatasetKind::Governance,
            ExplorerTab::Quality => DatasetKind::Quality,
            ExplorerTab::Projects => DatasetKind::Projects,
            ExplorerTab::Policies => DatasetKind::Policies,
        }
    }

    /// Tab title.
    pub fn title(self) -> &'static str {
        match self {
            ExplorerTab::Governance => "Riesgo TI y Controles",
            ExplorerTab::Quality => "Calidad de Datos",
            ExplorerTab::Projects => "Proyectos TI y Estrategia",
            ExplorerTab::Policies => "Catálogo de Políticas",
        }
    }
}

/// Tab, page and search of the explorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerState {
    /// Active tab.
    pub tab: ExplorerTab,
    /// Requested 1-based page.
    pub page: usize,
    /// Committed search query.
    pub search: String,
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self {
            tab: ExplorerTab::default(),
            page: 1,
            search: String::new(),
        }
    }
}

impl ExplorerState {
    /// Switches tab, resetting page and search.
    pub fn switch_tab(&mut self, tab: ExplorerTab) {
        self.tab = tab;
        self.page = 1;
        self.search.clear();
    }

    /// Commits a search query and returns to the first page.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
        self.page = 1;
    }

    /// Moves to `page`, clamped into `[1, pages]`.
    pub fn jump(&mut self, page: usize, pages: usize) {
        self.page = clamp_page(page, pages);
    }

    /// Moves one page forward, stopping at the last page.
    pub fn next(&mut self, pages: usize) {
        self.jump(self.page.saturating_add(1), pages);
    }

    /// Moves one page back, stopping at the first page.
    pub fn prev(&mut self, pages: usize) {
        self.jump(self.page.saturating_sub(1), pages);
    }
}

/// Table body: either rows or an explicit empty result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum TableBody {
    /// Rendered rows of the page.
    Rows {
        /// One cell per header per row.
        rows: Vec<Vec<Cell>>,
    },
    /// Nothing matched.
    NoResults {
        /// Query that produced no rows.
        query: String,
    },
}

/// Everything the explorer panel shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorerView {
    /// Active tab.
    pub tab: ExplorerTab,
    /// Tab title.
    pub title: String,
    /// Source file path, relative to the data directory's parent.
    pub file: String,
    /// Column headers.
    pub headers: Vec<ColumnHeader>,
    /// Page body.
    pub body: TableBody,
    /// Page position.
    pub meta: PageMeta,
    /// `start–end de total`.
    pub range_label: String,
    /// `N registros`.
    pub count_label: String,
}

fn render_tab<R: Record>(
    rows: &[R],
    columns: &[Column<R>],
    query: &str,
    page: usize,
    page_size: usize,
) -> (PageMeta, TableBlock) {
    let matched = search(rows, query);
    let served = paginate(&matched, page, page_size);
    let block = TableBlock::build(columns, served.rows.iter().copied());
    (served.meta, block)
}

/// Number of pages the tab currently spans under its search.
pub fn tab_pages(store: &DatasetStore, state: &ExplorerState, page_size: usize) -> usize {
    let query = state.search.as_str();
    let total = match state.tab {
        ExplorerTab::Governance => search(store.governance(), query).len(),
        ExplorerTab::Quality => search(store.quality(), query).len(),
        ExplorerTab::Projects => search(store.projects(), query).len(),
        ExplorerTab::Policies => search(store.policies(), query).len(),
    };
    page_count(total, page_size)
}

/// Renders the explorer for the current state.
pub fn explorer_view(
    store: &DatasetStore,
    files: &DatasetFiles,
    state: &ExplorerState,
    page_size: usize,
) -> ExplorerView {
    let query = state.search.as_str();
    let (meta, block) = match state.tab {
        ExplorerTab::Governance => render_tab(
            store.governance(),
            &governance_columns(),
            query,
            state.page,
            page_size,
        ),
        ExplorerTab::Quality => render_tab(
            store.quality(),
            &quality_columns(),
            query,
            state.page,
            page_size,
        ),
        ExplorerTab::Projects => render_tab(
            store.projects(),
            &project_columns(),
            query,
            state.page,
            page_size,
        ),
        ExplorerTab::Policies => render_tab(
            store.policies(),
            &policy_columns(),
            query,
            state.page,
            page_size,
        ),
    };
    debug!(
        tab = state.tab.kind().name(),
        page = meta.page,
        pages = meta.pages,
        total = meta.total,
        "explorer page rendered"
    );
    let body = if block.is_empty() {
        TableBody::NoResults {
            query: query.to_string(),
        }
    } else {
        TableBody::Rows { rows: block.rows }
    };
    ExplorerView {
        tab: state.tab,
        title: state.tab.title().to_string(),
        file: format!("data/{}", files.file_for(state.tab.kind())),
        headers: block.headers,
        range_label: meta.range_label(),
        count_label: format!("{} registros", meta.total),
        body,
        meta,
    }
}
