use grc_core::errors::{ErrorInfo, GrcError};
use grc_core::serde::to_canonical_json_bytes;
use grc_data::{DatasetStore, GovernanceRecord};
use serde::{Deserialize, Serialize};

use crate::charts::{controls_by_area, projects_impact, quality_by_domain, ChartSpec};
use crate::config::DashboardConfig;
use crate::filter::FilterSet;
use crate::focus::{BottomTable, FocusMode, Panel};
use crate::heatmap::HeatmapGrid;
use crate::kpi::{compute_kpis, Kpi, KpiContext};
use crate::summary::{risk_summary, AreaRiskSummary};

/// Everything the dashboard view draws for one state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Active focus mode.
    pub focus: FocusMode,
    /// Raw filter values.
    pub filters: FilterSet,
    /// Records in the filtered view.
    pub filtered_count: usize,
    /// Records in the governance collection.
    pub total_count: usize,
    /// KPI cards in screen order.
    pub kpis: Vec<Kpi>,
    /// Focus-dependent primary chart.
    pub primary_chart: ChartSpec,
    /// Effective vs planned controls.
    pub controls_chart: ChartSpec,
    /// Quality per data domain.
    pub quality_chart: ChartSpec,
    /// Project impact and alignment.
    pub projects_chart: ChartSpec,
    /// Accepted risk against risk score.
    pub heatmap: HeatmapGrid,
    /// Risk mix per area.
    pub risk_summary: Vec<AreaRiskSummary>,
    /// Focus-dependent bottom table.
    pub table: BottomTable,
    /// Panels drawn with emphasis.
    pub highlighted: Vec<Panel>,
}

impl DashboardSnapshot {
    /// Computes every panel from the filtered view.
    pub fn build(
        store: &DatasetStore,
        filtered: &[&GovernanceRecord],
        filters: &FilterSet,
        focus: FocusMode,
        config: &DashboardConfig,
    ) -> Self {
        let ctx = KpiContext { filtered, store };
        Self {
            focus,
            filters: filters.clone(),
            filtered_count: filtered.len(),
            total_count: store.governance().len(),
            kpis: compute_kpis(&ctx, focus),
            primary_chart: focus.primary_chart(filtered, store),
            controls_chart: controls_by_area(filtered),
            quality_chart: quality_by_domain(store.quality()),
            projects_chart: projects_impact(store.projects(), config.projects_chart_limit),
            heatmap: HeatmapGrid::build(filtered),
            risk_summary: risk_summary(filtered),
            table: focus
                .table_view()
                .render(filtered, store, config.decisions_limit),
            highlighted: focus.highlighted_panels(),
        }
    }

    /// Key-sorted JSON bytes, stable across runs.
    pub fn to_canonical_json(&self) -> Result<Vec<u8>, GrcError> {
        to_canonical_json_bytes(self)
    }

    /// JSON tree of the snapshot.
    pub fn to_value(&self) -> Result<serde_json::Value, GrcError> {
        serde_json::to_value(self).map_err(|err| {
            GrcError::Serde(
                ErrorInfo::new("grc_dash.snapshot_encode", err.to_string())
                    .with_context("focus", format!("{:?}", self.focus)),
            )
        })
    }
}
