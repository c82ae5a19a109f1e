//! Declarative table columns and the cells they render.
//!
//! A column is a key, a header label and a plain function from a record to a
//! [`Cell`]. Tables never hold markup; the presentation layer maps a cell's
//! style and tone onto whatever widgets it draws.

use grc_data::{
    display_number, GovernanceRecord, PolicyRecord, Priority, ProjectRecord, QualityRecord,
    RiskLevel,
};
use serde::{Deserialize, Serialize};

use crate::kpi::PLACEHOLDER;
use crate::tone::{
    clamp_pct, compliance_tone, maturity_tone, priority_tone, project_status_tone, quality_tone,
    risk_score_tone, risk_tone, Tone,
};

/// How a cell should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CellStyle {
    /// Plain text.
    Plain,
    /// Monospaced text.
    Mono,
    /// Colored pill.
    Badge,
    /// Inline progress bar followed by the text.
    Bar,
}

/// One rendered table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Display text.
    pub text: String,
    /// Drawing style.
    pub style: CellStyle,
    /// Badge or bar color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
    /// Bar width in percent, for bar cells.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_pct: Option<f64>,
}

impl Cell {
    /// Plain text cell.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: CellStyle::Plain,
            tone: None,
            bar_pct: None,
        }
    }

    /// Monospaced text cell.
    pub fn mono(text: impl Into<String>) -> Self {
        Self {
            style: CellStyle::Mono,
            ..Self::plain(text)
        }
    }

    /// Badge cell.
    pub fn badge(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            style: CellStyle::Badge,
            tone: Some(tone),
            ..Self::plain(text)
        }
    }

    /// Bar cell; the width is clamped into `[0, 100]`.
    pub fn bar(text: impl Into<String>, pct: f64, tone: Tone) -> Self {
        Self {
            text: text.into(),
            style: CellStyle::Bar,
            tone: Some(tone),
            bar_pct: Some(clamp_pct(pct)),
        }
    }

    /// Plain cell for an optional text field.
    pub fn optional(value: Option<&str>) -> Self {
        Self::plain(value.unwrap_or(PLACEHOLDER))
    }
}

/// Typed column descriptor.
pub struct Column<R> {
    /// Field key, matching the dataset's JSON key.
    pub key: &'static str,
    /// Header label.
    pub label: &'static str,
    /// Cell renderer.
    pub render: fn(&R) -> Cell,
}

impl<R> Column<R> {
    /// Builds a column.
    pub fn new(key: &'static str, label: &'static str, render: fn(&R) -> Cell) -> Self {
        Self { key, label, render }
    }

    /// Header of the column.
    pub fn header(&self) -> ColumnHeader {
        ColumnHeader {
            key: self.key.to_string(),
            label: self.label.to_string(),
        }
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Column<R> {}

impl<R> std::fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .finish()
    }
}

/// Serializable column header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnHeader {
    /// Field key.
    pub key: String,
    /// Header label.
    pub label: String,
}

/// Headers plus rendered rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableBlock {
    /// Column headers.
    pub headers: Vec<ColumnHeader>,
    /// One cell per header per row.
    pub rows: Vec<Vec<Cell>>,
}

impl TableBlock {
    /// Renders `rows` through `columns`.
    pub fn build<'r, R: 'r>(columns: &[Column<R>], rows: impl IntoIterator<Item = &'r R>) -> Self {
        Self {
            headers: columns.iter().map(Column::header).collect(),
            rows: rows
                .into_iter()
                .map(|row| columns.iter().map(|column| (column.render)(row)).collect())
                .collect(),
        }
    }

    /// Rendered row count.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no rows were rendered.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Formats a count with Spanish digit grouping. Grouping only starts at five
/// digits, so 8500 stays as is while 12500 becomes `12.500`.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() < 5 {
        return digits;
    }
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// Budget in millions of USD, e.g. `$1.2M`.
pub fn format_budget(musd: f64) -> String {
    format!("${}M", display_number(musd))
}

/// Percentage bar toned by quality tier.
pub fn percent_bar(pct: f64) -> Cell {
    Cell::bar(format!("{}%", display_number(pct)), pct, quality_tone(pct))
}

/// Risk level badge.
pub fn risk_badge(level: RiskLevel) -> Cell {
    Cell::badge(level.label(), risk_tone(level))
}

/// Maturity badge, `n/5`.
pub fn maturity_badge(level: u8) -> Cell {
    Cell::badge(format!("{level}/5"), maturity_tone(level))
}

/// Priority badge; a missing priority shows the placeholder.
pub fn priority_badge(priority: Option<Priority>) -> Cell {
    match priority {
        Some(priority) => Cell::badge(priority.label(), priority_tone(priority)),
        None => Cell::badge(PLACEHOLDER, Tone::Muted),
    }
}

/// Inline risk score bar.
pub fn risk_score_bar(score: f64) -> Cell {
    Cell::bar(display_number(score), score, risk_score_tone(score))
}

/// Explorer columns of the governance collection.
pub fn governance_columns() -> Vec<Column<GovernanceRecord>> {
    vec![
        Column::new("id", "ID", |r: &GovernanceRecord| Cell::mono(r.id.as_str())),
        Column::new("fecha", "Fecha", |r: &GovernanceRecord| Cell::plain(r.date.as_str())),
        Column::new("area_ti", "Área TI", |r: &GovernanceRecord| Cell::plain(r.it_area.as_str())),
        Column::new("dominio_cobit", "Dominio COBIT", |r: &GovernanceRecord| {
            Cell::plain(r.cobit_domain.as_str())
        }),
        Column::new("maturity_cobit", "Madurez", |r: &GovernanceRecord| maturity_badge(r.maturity)),
        Column::new("riesgo", "Riesgo", |r: &GovernanceRecord| risk_badge(r.risk)),
        Column::new("riesgo_score", "Score Riesgo", |r: &GovernanceRecord| {
            Cell::mono(display_number(r.risk_score))
        }),
        Column::new("nivel_riesgo_aceptado", "Nivel Aceptado", |r: &GovernanceRecord| {
            Cell::plain(display_number(r.accepted_risk))
        }),
        Column::new("controles_efectivos", "Controles Ef.", |r: &GovernanceRecord| {
            Cell::plain(r.effective_controls.to_string())
        }),
        Column::new("controles_planeados", "Controles Plan.", |r: &GovernanceRecord| {
            Cell::plain(r.planned_controls.to_string())
        }),
        Column::new("prioridad", "Prioridad", |r: &GovernanceRecord| priority_badge(r.priority)),
    ]
}

/// Explorer columns of the quality collection.
pub fn quality_columns() -> Vec<Column<QualityRecord>> {
    vec![
        Column::new("id", "ID", |r: &QualityRecord| Cell::mono(r.id.as_str())),
        Column::new("dominio_datos", "Dominio", |r: &QualityRecord| {
            Cell::plain(r.data_domain.as_str())
        }),
        Column::new("sistema_origen", "Sistema Origen", |r: &QualityRecord| {
            Cell::optional(r.source_system.as_deref())
        }),
        Column::new("calidad_datos_pct", "Calidad %", |r: &QualityRecord| {
            percent_bar(r.quality_pct)
        }),
        Column::new("registros_total", "Registros", |r: &QualityRecord| {
            Cell::plain(format_count(r.total_records))
        }),
        Column::new("registros_inconsistentes", "Inconsistentes", |r: &QualityRecord| Cell {
            tone: Some(Tone::Amber),
            ..Cell::plain(format_count(r.inconsistent_records))
        }),
        Column::new("completitud_pct", "Completitud", |r: &QualityRecord| {
            Cell::plain(display_number(r.completeness_pct))
        }),
        Column::new("precision_pct", "Precisión", |r: &QualityRecord| {
            Cell::plain(display_number(r.precision_pct))
        }),
        Column::new("consistencia_pct", "Consistencia", |r: &QualityRecord| {
            Cell::plain(display_number(r.consistency_pct))
        }),
        Column::new("estado", "Estado", |r: &QualityRecord| match r.status {
            Some(status) => Cell::badge(status.label(), compliance_tone(status)),
            None => Cell::badge(PLACEHOLDER, Tone::Muted),
        }),
        Column::new("responsable", "Responsable", |r: &QualityRecord| {
            Cell::optional(r.owner.as_deref())
        }),
        Column::new("ult_revision", "Últ. Revisión", |r: &QualityRecord| {
            Cell::optional(r.last_review.as_deref())
        }),
    ]
}

/// Explorer columns of the projects collection.
pub fn project_columns() -> Vec<Column<ProjectRecord>> {
    vec![
        Column::new("id", "ID", |r: &ProjectRecord| Cell::mono(r.id.as_str())),
        Column::new("proyecto_ti", "Proyecto", |r: &ProjectRecord| Cell::plain(r.name.as_str())),
        Column::new("area_ti", "Área TI", |r: &ProjectRecord| Cell::plain(r.it_area.as_str())),
        Column::new("objetivo_estrategico", "Objetivo Est.", |r: &ProjectRecord| {
            Cell::optional(r.strategic_objective.as_deref())
        }),
        Column::new("sponsor", "Sponsor", |r: &ProjectRecord| Cell::optional(r.sponsor.as_deref())),
        Column::new("estado", "Estado", |r: &ProjectRecord| match r.status {
            Some(status) => Cell::badge(status.label(), project_status_tone(status)),
            None => Cell::badge(PLACEHOLDER, Tone::Muted),
        }),
        Column::new("impacto_logrado", "Impacto %", |r: &ProjectRecord| percent_bar(r.impact_pct)),
        Column::new("alineacion_score", "Alineación", |r: &ProjectRecord| {
            percent_bar(r.alignment_score)
        }),
        Column::new("presupuesto_musd", "Presup. MUSD", |r: &ProjectRecord| {
            Cell::plain(format_budget(r.budget_musd))
        }),
        Column::new("prioridad", "Prioridad", |r: &ProjectRecord| priority_badge(r.priority)),
        Column::new("fin_estimado", "Fin Est.", |r: &ProjectRecord| {
            Cell::optional(r.estimated_end.as_deref())
        }),
    ]
}

/// Explorer columns of the policy catalog.
pub fn policy_columns() -> Vec<Column<PolicyRecord>> {
    vec![
        Column::new("id", "ID", |r: &PolicyRecord| Cell::mono(r.id.as_str())),
        Column::new("politica", "Política", |r: &PolicyRecord| Cell::plain(r.name.as_str())),
        Column::new("dominio", "Dominio", |r: &PolicyRecord| Cell::plain(r.domain.as_str())),
        Column::new("area_ti", "Área TI", |r: &PolicyRecord| Cell::plain(r.it_area.as_str())),
        Column::new("version", "Versión", |r: &PolicyRecord| Cell::optional(r.version.as_deref())),
        Column::new("estado", "Estado", |r: &PolicyRecord| match r.status {
            Some(status) => Cell::badge(status.label(), compliance_tone(status)),
            None => Cell::badge(PLACEHOLDER, Tone::Muted),
        }),
        Column::new("nivel_institucionalizacion", "Institucional. %", |r: &PolicyRecord| {
            percent_bar(r.institutionalization_pct)
        }),
        Column::new("criticidad", "Criticidad", |r: &PolicyRecord| priority_badge(r.criticality)),
        Column::new("propietario", "Propietario", |r: &PolicyRecord| {
            Cell::optional(r.owner.as_deref())
        }),
        Column::new("fecha_aprobacion", "Aprobación", |r: &PolicyRecord| {
            Cell::optional(r.approved_on.as_deref())
        }),
        Column::new("ult_revision", "Últ. Revisión", |r: &PolicyRecord| {
            Cell::optional(r.last_review.as_deref())
        }),
    ]
}

/// Governance record joined with the first policy and project of its area.
#[derive(Debug, Clone, Copy)]
pub struct DecisionRow<'a> {
    /// Governance record.
    pub record: &'a GovernanceRecord,
    /// First policy whose area matches, if any.
    pub policy: Option<&'a PolicyRecord>,
    /// First project whose area matches, if any.
    pub project: Option<&'a ProjectRecord>,
}

/// Columns of the decisions table.
pub fn decision_columns<'a>() -> Vec<Column<DecisionRow<'a>>> {
    vec![
        Column::new("id", "ID", |d: &DecisionRow<'a>| Cell::mono(d.record.id.as_str())),
        Column::new("fecha", "Fecha", |d: &DecisionRow<'a>| Cell::plain(d.record.date.as_str())),
        Column::new("area_ti", "Área TI", |d: &DecisionRow<'a>| {
            Cell::plain(d.record.it_area.as_str())
        }),
        Column::new("dominio_cobit", "Dominio COBIT", |d: &DecisionRow<'a>| {
            Cell::plain(d.record.cobit_domain.as_str())
        }),
        Column::new("maturity_cobit", "Madurez", |d: &DecisionRow<'a>| {
            maturity_badge(d.record.maturity)
        }),
        Column::new("riesgo", "Riesgo", |d: &DecisionRow<'a>| risk_badge(d.record.risk)),
        Column::new("riesgo_score", "Score", |d: &DecisionRow<'a>| {
            risk_score_bar(d.record.risk_score)
        }),
        Column::new("controles", "Controles", |d: &DecisionRow<'a>| {
            Cell::plain(format!(
                "{}/{}",
                d.record.effective_controls, d.record.planned_controls
            ))
        }),
        Column::new("politica", "Política", |d: &DecisionRow<'a>| match d.policy {
            Some(policy) => Cell::badge(policy.id.as_str(), Tone::Cyan),
            None => Cell::badge("N/A", Tone::Muted),
        }),
        Column::new("proyecto_ti", "Proyecto", |d: &DecisionRow<'a>| match d.project {
            Some(project) => Cell::plain(project.id.as_str()),
            None => Cell::plain(PLACEHOLDER),
        }),
        Column::new("prioridad", "Prioridad", |d: &DecisionRow<'a>| {
            priority_badge(d.record.priority)
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouping_starts_at_five_digits() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(8500), "8500");
        assert_eq!(format_count(12500), "12.500");
        assert_eq!(format_count(1_250_000), "1.250.000");
    }

    #[test]
    fn budget_and_bar_text() {
        assert_eq!(format_budget(1.2), "$1.2M");
        assert_eq!(format_budget(3.0), "$3M");
        let bar = percent_bar(104.0);
        assert_eq!(bar.text, "104%");
        assert_eq!(bar.bar_pct, Some(100.0));
        assert_eq!(bar.tone, Some(Tone::Green));
    }

    #[test]
    fn missing_priority_renders_placeholder() {
        let cell = priority_badge(None);
        assert_eq!(cell.text, PLACEHOLDER);
        assert_eq!(cell.tone, Some(Tone::Muted));
    }
}
