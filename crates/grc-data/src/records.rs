use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::enums::{ComplianceStatus, Priority, ProjectStatus, RiskLevel};

/// Identifies one of the four dashboard collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DatasetKind {
    /// IT risk and control records.
    Governance,
    /// Data-quality measurements per data domain.
    Quality,
    /// IT projects and their strategic alignment.
    Projects,
    /// Policy catalog.
    Policies,
}

impl DatasetKind {
    /// All collections in load order.
    pub const ALL: [DatasetKind; 4] = [
        DatasetKind::Governance,
        DatasetKind::Quality,
        DatasetKind::Projects,
        DatasetKind::Policies,
    ];

    /// Stable short name used in logs and error context.
    pub fn name(self) -> &'static str {
        match self {
            DatasetKind::Governance => "governance",
            DatasetKind::Quality => "quality",
            DatasetKind::Projects => "projects",
            DatasetKind::Policies => "policies",
        }
    }
}

impl Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Formats a number the way the datasets spell it: integral values without a
/// fractional part, everything else with the shortest round-trip form.
pub fn display_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Common surface of the four record types.
pub trait Record {
    /// Collection the record belongs to.
    const KIND: DatasetKind;

    /// Record identifier.
    fn id(&self) -> &str;

    /// String form of every present field, in declaration order. Absent
    /// optional fields are skipped.
    fn field_values(&self) -> Vec<String>;
}

fn push_opt<T: ToString>(values: &mut Vec<String>, field: &Option<T>) {
    if let Some(value) = field {
        values.push(value.to_string());
    }
}

/// IT risk and control evaluation for one area and COBIT domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernanceRecord {
    /// Record identifier.
    pub id: String,
    /// Evaluation date (ISO `YYYY-MM-DD`).
    #[serde(rename = "fecha", alias = "date")]
    pub date: String,
    /// IT area under evaluation.
    #[serde(rename = "area_ti", alias = "it_area")]
    pub it_area: String,
    /// COBIT domain.
    #[serde(rename = "dominio_cobit", alias = "cobit_domain")]
    pub cobit_domain: String,
    /// COBIT maturity level (0 to 5).
    #[serde(rename = "maturity_cobit", alias = "maturity")]
    pub maturity: u8,
    /// Qualitative risk level.
    #[serde(rename = "riesgo", alias = "risk")]
    pub risk: RiskLevel,
    /// Current risk score (0 to 100).
    #[serde(rename = "riesgo_score", alias = "risk_score")]
    pub risk_score: f64,
    /// Risk level accepted by the business (0 to 100).
    #[serde(rename = "nivel_riesgo_aceptado", alias = "accepted_risk")]
    pub accepted_risk: f64,
    /// Controls operating effectively.
    #[serde(rename = "controles_efectivos", alias = "effective_controls")]
    pub effective_controls: u32,
    /// Controls planned.
    #[serde(rename = "controles_planeados", alias = "planned_controls")]
    pub planned_controls: u32,
    /// Share of institutionalized policies (percent).
    #[serde(
        rename = "porc_politicas_institucionalizadas",
        alias = "institutionalized_policies_pct"
    )]
    pub institutionalized_policies_pct: f64,
    /// Share of IT initiatives aligned with strategy (percent).
    #[serde(
        rename = "porc_iniciativas_ti_alineadas",
        alias = "aligned_initiatives_pct"
    )]
    pub aligned_initiatives_pct: f64,
    /// Treatment priority.
    #[serde(
        rename = "prioridad",
        alias = "priority",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub priority: Option<Priority>,
}

impl Record for GovernanceRecord {
    const KIND: DatasetKind = DatasetKind::Governance;

    fn id(&self) -> &str {
        &self.id
    }

    fn field_values(&self) -> Vec<String> {
        let mut values = vec![
            self.id.clone(),
            self.date.clone(),
            self.it_area.clone(),
            self.cobit_domain.clone(),
            self.maturity.to_string(),
            self.risk.to_string(),
            display_number(self.risk_score),
            display_number(self.accepted_risk),
            self.effective_controls.to_string(),
            self.planned_controls.to_string(),
            display_number(self.institutionalized_policies_pct),
            display_number(self.aligned_initiatives_pct),
        ];
        push_opt(&mut values, &self.priority);
        values
    }
}

/// Data-quality measurement for one data domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityRecord {
    /// Record identifier.
    pub id: String,
    /// Data domain.
    #[serde(rename = "dominio_datos", alias = "data_domain")]
    pub data_domain: String,
    /// Source system feeding the domain.
    #[serde(
        rename = "sistema_origen",
        alias = "source_system",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub source_system: Option<String>,
    /// Overall quality (percent).
    #[serde(rename = "calidad_datos_pct", alias = "quality_pct")]
    pub quality_pct: f64,
    /// Completeness (percent).
    #[serde(rename = "completitud_pct", alias = "completeness_pct")]
    pub completeness_pct: f64,
    /// Precision (percent).
    pub precision_pct: f64,
    /// Consistency (percent).
    #[serde(rename = "consistencia_pct", alias = "consistency_pct")]
    pub consistency_pct: f64,
    /// Records inspected.
    #[serde(rename = "registros_total", alias = "total_records")]
    pub total_records: u64,
    /// Records found inconsistent.
    #[serde(rename = "registros_inconsistentes", alias = "inconsistent_records")]
    pub inconsistent_records: u64,
    /// Compliance status.
    #[serde(
        rename = "estado",
        alias = "status",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<ComplianceStatus>,
    /// Responsible owner.
    #[serde(
        rename = "responsable",
        alias = "owner",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub owner: Option<String>,
    /// Last review date.
    #[serde(
        rename = "ult_revision",
        alias = "last_review",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_review: Option<String>,
}

impl Record for QualityRecord {
    const KIND: DatasetKind = DatasetKind::Quality;

    fn id(&self) -> &str {
        &self.id
    }

    fn field_values(&self) -> Vec<String> {
        let mut values = vec![self.id.clone(), self.data_domain.clone()];
        push_opt(&mut values, &self.source_system);
        values.extend([
            display_number(self.quality_pct),
            display_number(self.completeness_pct),
            display_number(self.precision_pct),
            display_number(self.consistency_pct),
            self.total_records.to_string(),
            self.inconsistent_records.to_string(),
        ]);
        push_opt(&mut values, &self.status);
        push_opt(&mut values, &self.owner);
        push_opt(&mut values, &self.last_review);
        values
    }
}

/// IT project and its contribution to strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Record identifier.
    pub id: String,
    /// Project name.
    #[serde(rename = "proyecto_ti", alias = "name")]
    pub name: String,
    /// Owning IT area.
    #[serde(rename = "area_ti", alias = "it_area")]
    pub it_area: String,
    /// Strategic objective served.
    #[serde(
        rename = "objetivo_estrategico",
        alias = "strategic_objective",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub strategic_objective: Option<String>,
    /// Business sponsor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sponsor: Option<String>,
    /// Delivery status.
    #[serde(
        rename = "estado",
        alias = "status",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<ProjectStatus>,
    /// Achieved impact (percent).
    #[serde(rename = "impacto_logrado", alias = "impact_pct")]
    pub impact_pct: f64,
    /// Alignment score (0 to 100).
    #[serde(rename = "alineacion_score", alias = "alignment_score")]
    pub alignment_score: f64,
    /// Budget in millions of USD.
    #[serde(rename = "presupuesto_musd", alias = "budget_musd")]
    pub budget_musd: f64,
    /// Priority.
    #[serde(
        rename = "prioridad",
        alias = "priority",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub priority: Option<Priority>,
    /// Estimated completion date.
    #[serde(
        rename = "fin_estimado",
        alias = "estimated_end",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_end: Option<String>,
}

impl Record for ProjectRecord {
    const KIND: DatasetKind = DatasetKind::Projects;

    fn id(&self) -> &str {
        &self.id
    }

    fn field_values(&self) -> Vec<String> {
        let mut values = vec![self.id.clone(), self.name.clone(), self.it_area.clone()];
        push_opt(&mut values, &self.strategic_objective);
        push_opt(&mut values, &self.sponsor);
        push_opt(&mut values, &self.status);
        values.extend([
            display_number(self.impact_pct),
            display_number(self.alignment_score),
            display_number(self.budget_musd),
        ]);
        push_opt(&mut values, &self.priority);
        push_opt(&mut values, &self.estimated_end);
        values
    }
}

/// Entry of the policy catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRecord {
    /// Record identifier.
    pub id: String,
    /// Policy name.
    #[serde(rename = "politica", alias = "name")]
    pub name: String,
    /// Governance domain.
    #[serde(rename = "dominio", alias = "domain")]
    pub domain: String,
    /// IT area the policy applies to.
    #[serde(rename = "area_ti", alias = "it_area")]
    pub it_area: String,
    /// Document version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Compliance status.
    #[serde(
        rename = "estado",
        alias = "status",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<ComplianceStatus>,
    /// Institutionalization level (percent).
    #[serde(
        rename = "nivel_institucionalizacion",
        alias = "institutionalization_pct"
    )]
    pub institutionalization_pct: f64,
    /// Criticality.
    #[serde(
        rename = "criticidad",
        alias = "criticality",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub criticality: Option<Priority>,
    /// Policy owner.
    #[serde(
        rename = "propietario",
        alias = "owner",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub owner: Option<String>,
    /// Approval date.
    #[serde(
        rename = "fecha_aprobacion",
        alias = "approved_on",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub approved_on: Option<String>,
    /// Last review date.
    #[serde(
        rename = "ult_revision",
        alias = "last_review",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_review: Option<String>,
}

impl Record for PolicyRecord {
    const KIND: DatasetKind = DatasetKind::Policies;

    fn id(&self) -> &str {
        &self.id
    }

    fn field_values(&self) -> Vec<String> {
        let mut values = vec![
            self.id.clone(),
            self.name.clone(),
            self.domain.clone(),
            self.it_area.clone(),
        ];
        push_opt(&mut values, &self.version);
        push_opt(&mut values, &self.status);
        values.push(display_number(self.institutionalization_pct));
        push_opt(&mut values, &self.criticality);
        push_opt(&mut values, &self.owner);
        push_opt(&mut values, &self.approved_on);
        push_opt(&mut values, &self.last_review);
        values
    }
}
