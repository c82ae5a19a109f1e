//! Chart datasets handed to the visualization layer. Nothing here draws.

use std::collections::BTreeMap;

use grc_data::{GovernanceRecord, ProjectRecord, QualityRecord};
use serde::{Deserialize, Serialize};

use crate::kpi::mean;
use crate::tone::{quality_tone, Tone};

/// COBIT domains in radar order.
pub const COBIT_DOMAINS: [&str; 4] = ["Planificar", "Construir", "Ejecutar", "Monitorizar"];

const PROJECT_LABEL_MAX: usize = 22;
const PROJECT_LABEL_KEEP: usize = 20;

/// Identifies a chart dataset shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    /// Mean maturity per COBIT domain.
    MaturityRadar,
    /// Mean risk score per COBIT domain.
    RiskScoreRadar,
    /// Mean aligned-initiative percentage per IT area.
    AlignmentByArea,
    /// Mean of each quality dimension.
    QualityDimensions,
    /// Effective vs planned controls per IT area.
    ControlsByArea,
    /// Quality percentage per data domain.
    QualityByDomain,
    /// Project impact and alignment.
    ProjectsImpact,
}

/// How the renderer should draw a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeriesStyle {
    /// Filled polygon on a radial axis.
    Radar,
    /// Vertical bars.
    Bar,
    /// Horizontal bars.
    HorizontalBar,
    /// Line over the category axis.
    Line,
}

/// One data series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Legend label.
    pub label: String,
    /// One value per category label.
    pub values: Vec<f64>,
    /// Drawing style.
    pub style: SeriesStyle,
    /// Series color.
    pub tone: Tone,
    /// Per-point colors, when they vary.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub point_tones: Vec<Tone>,
}

/// A complete chart dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Shape identifier.
    pub kind: ChartKind,
    /// Panel title.
    pub title: String,
    /// Category labels.
    pub labels: Vec<String>,
    /// Series over the categories.
    pub series: Vec<Series>,
    /// Fixed value axis maximum, when the scale is bounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_max: Option<f64>,
}

fn series(label: &str, values: Vec<f64>, style: SeriesStyle, tone: Tone) -> Series {
    Series {
        label: label.to_string(),
        values,
        style,
        tone,
        point_tones: Vec::new(),
    }
}

fn per_domain<F>(records: &[&GovernanceRecord], field: F) -> Vec<f64>
where
    F: Fn(&GovernanceRecord) -> f64,
{
    COBIT_DOMAINS
        .iter()
        .map(|domain| {
            mean(
                records
                    .iter()
                    .filter(|record| record.cobit_domain == *domain)
                    .map(|record| field(record)),
            )
            .unwrap_or(0.0)
        })
        .collect()
}

fn by_area<'a>(records: &[&'a GovernanceRecord]) -> BTreeMap<&'a str, Vec<&'a GovernanceRecord>> {
    let mut areas: BTreeMap<&str, Vec<&GovernanceRecord>> = BTreeMap::new();
    for &record in records {
        areas.entry(record.it_area.as_str()).or_default().push(record);
    }
    areas
}

/// Mean maturity per COBIT domain; empty domains plot as 0.
pub fn maturity_radar(records: &[&GovernanceRecord]) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::MaturityRadar,
        title: "Madurez COBIT por dominio".into(),
        labels: COBIT_DOMAINS.iter().map(|d| d.to_string()).collect(),
        series: vec![series(
            "Madurez Promedio",
            per_domain(records, |r| f64::from(r.maturity)),
            SeriesStyle::Radar,
            Tone::Cyan,
        )],
        axis_max: Some(5.0),
    }
}

/// Mean risk score per COBIT domain; empty domains plot as 0.
pub fn risk_score_radar(records: &[&GovernanceRecord]) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::RiskScoreRadar,
        title: "Score de riesgo por dominio".into(),
        labels: COBIT_DOMAINS.iter().map(|d| d.to_string()).collect(),
        series: vec![series(
            "Score Promedio",
            per_domain(records, |r| r.risk_score),
            SeriesStyle::Radar,
            Tone::Red,
        )],
        axis_max: Some(100.0),
    }
}

/// Mean aligned-initiative percentage per IT area, areas sorted.
pub fn alignment_by_area(records: &[&GovernanceRecord]) -> ChartSpec {
    let areas = by_area(records);
    let values: Vec<f64> = areas
        .values()
        .map(|subset| mean(subset.iter().map(|r| r.aligned_initiatives_pct)).unwrap_or(0.0))
        .collect();
    ChartSpec {
        kind: ChartKind::AlignmentByArea,
        title: "Iniciativas alineadas por área".into(),
        labels: areas.keys().map(|area| area.to_string()).collect(),
        series: vec![series(
            "Alineadas (%)",
            values,
            SeriesStyle::Bar,
            Tone::Purple,
        )],
        axis_max: Some(100.0),
    }
}

/// Mean of each quality dimension over the whole quality collection.
pub fn quality_dimensions(records: &[QualityRecord]) -> ChartSpec {
    let dims: [(&str, fn(&QualityRecord) -> f64); 4] = [
        ("Calidad", |q| q.quality_pct),
        ("Completitud", |q| q.completeness_pct),
        ("Precisión", |q| q.precision_pct),
        ("Consistencia", |q| q.consistency_pct),
    ];
    ChartSpec {
        kind: ChartKind::QualityDimensions,
        title: "Dimensiones de calidad".into(),
        labels: dims.iter().map(|(label, _)| label.to_string()).collect(),
        series: vec![series(
            "Promedio (%)",
            dims.iter()
                .map(|(_, field)| mean(records.iter().map(field)).unwrap_or(0.0))
                .collect(),
            SeriesStyle::Radar,
            Tone::Green,
        )],
        axis_max: Some(100.0),
    }
}

/// Effective vs planned control sums per IT area, areas sorted.
pub fn controls_by_area(records: &[&GovernanceRecord]) -> ChartSpec {
    let areas = by_area(records);
    let effective: Vec<f64> = areas
        .values()
        .map(|subset| subset.iter().map(|r| f64::from(r.effective_controls)).sum())
        .collect();
    let planned: Vec<f64> = areas
        .values()
        .map(|subset| subset.iter().map(|r| f64::from(r.planned_controls)).sum())
        .collect();
    ChartSpec {
        kind: ChartKind::ControlsByArea,
        title: "Controles efectivos vs planeados".into(),
        labels: areas.keys().map(|area| area.to_string()).collect(),
        series: vec![
            series("Controles Efectivos", effective, SeriesStyle::Bar, Tone::Green),
            series("Controles Planeados", planned, SeriesStyle::Bar, Tone::Cyan),
        ],
        axis_max: None,
    }
}

/// Quality percentage per data domain, lowest first, each bar toned by tier.
pub fn quality_by_domain(records: &[QualityRecord]) -> ChartSpec {
    let mut sorted: Vec<&QualityRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.quality_pct.total_cmp(&b.quality_pct));
    let values: Vec<f64> = sorted.iter().map(|q| q.quality_pct).collect();
    let mut bars = series("Calidad (%)", values.clone(), SeriesStyle::HorizontalBar, Tone::Cyan);
    bars.point_tones = values.iter().copied().map(quality_tone).collect();
    ChartSpec {
        kind: ChartKind::QualityByDomain,
        title: "Calidad de datos por dominio".into(),
        labels: sorted.iter().map(|q| q.data_domain.clone()).collect(),
        series: vec![bars],
        axis_max: Some(100.0),
    }
}

/// Shortens long project names to keep the category axis readable.
pub fn truncate_label(name: &str) -> String {
    if name.chars().count() > PROJECT_LABEL_MAX {
        let kept: String = name.chars().take(PROJECT_LABEL_KEEP).collect();
        format!("{kept}…")
    } else {
        name.to_string()
    }
}

/// Impact bars and alignment line for the first `limit` projects.
pub fn projects_impact(records: &[ProjectRecord], limit: usize) -> ChartSpec {
    let shown = &records[..records.len().min(limit)];
    ChartSpec {
        kind: ChartKind::ProjectsImpact,
        title: "Proyectos TI vs impacto logrado".into(),
        labels: shown.iter().map(|p| truncate_label(&p.name)).collect(),
        series: vec![
            series(
                "Impacto Logrado",
                shown.iter().map(|p| p.impact_pct).collect(),
                SeriesStyle::Bar,
                Tone::Purple,
            ),
            series(
                "Score Alineación",
                shown.iter().map(|p| p.alignment_score).collect(),
                SeriesStyle::Line,
                Tone::Amber,
            ),
        ],
        axis_max: Some(100.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate_label("SOC 24x7"), "SOC 24x7");
        let exact = "a".repeat(22);
        assert_eq!(truncate_label(&exact), exact);
        assert_eq!(
            truncate_label("Modernización del Data Lake Corporativo"),
            "Modernización del Da…"
        );
    }
}
