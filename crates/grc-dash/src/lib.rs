#![deny(missing_docs)]
//! Filtering, aggregation, pagination and focus state for the GRC dashboard.
//!
//! [`AppState`] owns the loaded collections and the interactive state;
//! [`DashboardSnapshot`] and [`ExplorerView`] are the serializable outputs
//! handed to whatever draws the dashboard.

pub mod charts;
/// YAML configuration and its validation.
pub mod config;
/// Search debouncing.
pub mod debounce;
pub mod explorer;
/// Filter bar values and the filter engine.
pub mod filter;
pub mod focus;
/// Accepted risk vs risk score grid.
pub mod heatmap;
/// KPI metrics and cards.
pub mod kpi;
/// Search and page slicing.
pub mod paginate;
/// Dashboard snapshot.
pub mod snapshot;
pub mod state;
/// Risk mix per area.
pub mod summary;
pub mod table;
pub mod tone;

pub use charts::{ChartKind, ChartSpec, Series, SeriesStyle};
pub use config::{load_config, validate_config, DashboardConfig};
pub use debounce::Debouncer;
pub use explorer::{explorer_view, ExplorerState, ExplorerTab, ExplorerView, TableBody};
pub use filter::{apply_filters, filter_indices, ActiveFilters, FilterField, FilterSet};
pub use focus::{BottomTable, FocusMode, Panel, TableView};
pub use heatmap::{CellTier, HeatmapCell, HeatmapGrid};
pub use kpi::{compute_kpis, mean, Kpi, KpiContext, KpiSlot, KpiValue, Metric, PLACEHOLDER};
pub use paginate::{page_links, paginate, search, Page, PageLink, PageMeta};
pub use snapshot::DashboardSnapshot;
pub use state::{AppState, ViewMode};
pub use summary::{risk_summary, AreaRiskSummary};
pub use table::{Cell, CellStyle, Column, ColumnHeader, TableBlock};
pub use tone::Tone;
