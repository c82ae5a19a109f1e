//! Focus modes: lenses that swap KPIs, the primary chart and the bottom
//! table without touching stored data.

use grc_data::{DatasetStore, GovernanceRecord, RiskLevel};
use serde::{Deserialize, Serialize};

use crate::charts::{
    alignment_by_area, maturity_radar, quality_dimensions, risk_score_radar, ChartSpec,
};
use crate::kpi::{KpiSlot, Metric};
use crate::table::{decision_columns, project_columns, quality_columns, DecisionRow, TableBlock};

/// Dashboard lens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FocusMode {
    /// Default view.
    #[default]
    Governance,
    /// Risk exposure.
    Risk,
    /// Strategic alignment.
    Alignment,
    /// Data quality.
    DataQuality,
}

/// Panel of the dashboard that a focus mode can highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Panel {
    /// KPI strip.
    Kpis,
    /// Primary radar or bar chart.
    PrimaryChart,
    /// Controls per area.
    Controls,
    /// Risk heatmap.
    Heatmap,
    /// Risk summary next to the heatmap.
    RiskSummary,
    /// Quality per data domain.
    Quality,
    /// Projects impact.
    Projects,
    /// Bottom table.
    Table,
}

/// Dataset shown in the bottom table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableView {
    /// Filtered records joined with policy and project.
    Decisions,
    /// High-risk decisions, highest score first.
    HighRisk,
    /// Projects, best aligned first.
    Projects,
    /// Quality records, worst first.
    Quality,
}

impl FocusMode {
    /// Modes in toolbar order.
    pub const ALL: [FocusMode; 4] = [
        FocusMode::Governance,
        FocusMode::Risk,
        FocusMode::Alignment,
        FocusMode::DataQuality,
    ];

    /// Metric shown in a KPI slot under this mode.
    pub fn metric_for(self, slot: KpiSlot) -> Metric {
        match (self, slot) {
            (FocusMode::Risk, KpiSlot::Maturity) => Metric::RiskWeightedScore,
            (FocusMode::Risk, KpiSlot::Policies) => Metric::RiskExceedance,
            (FocusMode::Alignment, KpiSlot::Policies) => Metric::ProjectImpact,
            (FocusMode::Alignment, KpiSlot::Aligned) => Metric::ProjectAlignment,
            (FocusMode::DataQuality, KpiSlot::Maturity) => Metric::DataCompleteness,
            (FocusMode::DataQuality, KpiSlot::Aligned) => Metric::DataConsistency,
            _ => slot.default_metric(),
        }
    }

    /// Primary chart under this mode.
    pub fn primary_chart(self, filtered: &[&GovernanceRecord], store: &DatasetStore) -> ChartSpec {
        match self {
            FocusMode::Governance => maturity_radar(filtered),
            FocusMode::Risk => risk_score_radar(filtered),
            FocusMode::Alignment => alignment_by_area(filtered),
            FocusMode::DataQuality => quality_dimensions(store.quality()),
        }
    }

    /// Bottom table under this mode.
    pub fn table_view(self) -> TableView {
        match self {
            FocusMode::Governance => TableView::Decisions,
            FocusMode::Risk => TableView::HighRisk,
            FocusMode::Alignment => TableView::Projects,
            FocusMode::DataQuality => TableView::Quality,
        }
    }

    /// Panels drawn with emphasis.
    pub fn highlighted_panels(self) -> Vec<Panel> {
        match self {
            FocusMode::Governance => vec![Panel::Kpis, Panel::PrimaryChart],
            FocusMode::Risk => vec![Panel::PrimaryChart, Panel::Heatmap, Panel::RiskSummary],
            FocusMode::Alignment => vec![Panel::PrimaryChart, Panel::Projects],
            FocusMode::DataQuality => vec![Panel::PrimaryChart, Panel::Quality],
        }
    }
}

/// Rendered bottom table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BottomTable {
    /// Which dataset is shown.
    pub view: TableView,
    /// Panel title.
    pub title: String,
    /// Headers and rows.
    #[serde(flatten)]
    pub block: TableBlock,
    /// `N registros`, counting the rows the view draws from.
    pub count_label: String,
}

fn decisions<'a>(
    records: impl IntoIterator<Item = &'a GovernanceRecord>,
    store: &'a DatasetStore,
) -> Vec<DecisionRow<'a>> {
    records
        .into_iter()
        .map(|record| DecisionRow {
            record,
            policy: store.policy_for_area(&record.it_area),
            project: store.project_for_area(&record.it_area),
        })
        .collect()
}

impl TableView {
    /// Renders the view over the filtered records. Decision views keep at
    /// most `limit` rows.
    pub fn render(
        self,
        filtered: &[&GovernanceRecord],
        store: &DatasetStore,
        limit: usize,
    ) -> BottomTable {
        let (title, block, source_len) = match self {
            TableView::Decisions => {
                let rows = decisions(filtered.iter().copied().take(limit), store);
                (
                    "Trazabilidad de decisiones",
                    TableBlock::build(&decision_columns(), &rows),
                    filtered.len(),
                )
            }
            TableView::HighRisk => {
                let mut high: Vec<&GovernanceRecord> = filtered
                    .iter()
                    .copied()
                    .filter(|r| r.risk == RiskLevel::High)
                    .collect();
                high.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));
                let total = high.len();
                let rows = decisions(high.into_iter().take(limit), store);
                (
                    "Decisiones de alto riesgo",
                    TableBlock::build(&decision_columns(), &rows),
                    total,
                )
            }
            TableView::Projects => {
                let mut projects: Vec<_> = store.projects().iter().collect();
                projects.sort_by(|a, b| b.alignment_score.total_cmp(&a.alignment_score));
                (
                    "Proyectos por alineación",
                    TableBlock::build(&project_columns(), projects),
                    store.projects().len(),
                )
            }
            TableView::Quality => {
                let mut quality: Vec<_> = store.quality().iter().collect();
                quality.sort_by(|a, b| a.quality_pct.total_cmp(&b.quality_pct));
                (
                    "Calidad por dominio",
                    TableBlock::build(&quality_columns(), quality),
                    store.quality().len(),
                )
            }
        };
        BottomTable {
            view: self,
            title: title.to_string(),
            block,
            count_label: format!("{source_len} registros"),
        }
    }
}
