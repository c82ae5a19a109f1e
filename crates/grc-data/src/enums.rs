use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

fn matches_label(value: &str, labels: &[&str]) -> bool {
    let lowered = value.trim().to_lowercase();
    labels.iter().any(|label| *label == lowered)
}

/// Qualitative risk level of a governance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Low residual risk.
    #[serde(rename = "bajo", alias = "low")]
    Low,
    /// Medium residual risk.
    #[serde(rename = "medio", alias = "medium")]
    Medium,
    /// High residual risk.
    #[serde(rename = "alto", alias = "high")]
    High,
}

impl RiskLevel {
    /// All levels, lowest first.
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    /// Wire label as stored in the datasets.
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "bajo",
            RiskLevel::Medium => "medio",
            RiskLevel::High => "alto",
        }
    }

    /// Weight used by the risk-weighted score (high counts three times as much as low).
    pub fn weight(self) -> f64 {
        match self {
            RiskLevel::Low => 1.0,
            RiskLevel::Medium => 2.0,
            RiskLevel::High => 3.0,
        }
    }

    /// Parses a wire or English label, ignoring case. Unknown labels yield `None`.
    pub fn parse_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| {
            let english = match level {
                RiskLevel::Low => "low",
                RiskLevel::Medium => "medium",
                RiskLevel::High => "high",
            };
            matches_label(value, &[level.label(), english])
        })
    }
}

impl Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Priority of a governance record or project; doubles as policy criticality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    /// Low priority.
    #[serde(rename = "baja", alias = "low")]
    Low,
    /// Medium priority.
    #[serde(rename = "media", alias = "medium")]
    Medium,
    /// High priority.
    #[serde(rename = "alta", alias = "high")]
    High,
}

impl Priority {
    /// All priorities, lowest first.
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Wire label as stored in the datasets.
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "baja",
            Priority::Medium => "media",
            Priority::High => "alta",
        }
    }

    /// Parses a wire or English label, ignoring case. Unknown labels yield `None`.
    pub fn parse_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|priority| {
            let english = match priority {
                Priority::Low => "low",
                Priority::Medium => "medium",
                Priority::High => "high",
            };
            matches_label(value, &[priority.label(), english])
        })
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Compliance status shared by data-quality records and the policy catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComplianceStatus {
    /// Policy is in force.
    #[serde(rename = "vigente", alias = "current")]
    Current,
    /// Domain meets its quality targets.
    #[serde(rename = "conforme", alias = "compliant")]
    Compliant,
    /// Under review.
    #[serde(rename = "en revisión", alias = "en revision", alias = "under review")]
    UnderReview,
    /// Flagged with observations.
    #[serde(rename = "observado", alias = "observed")]
    Observed,
    /// Fails its targets.
    #[serde(rename = "no conforme", alias = "non-compliant")]
    NonCompliant,
}

impl ComplianceStatus {
    /// Every status in declaration order.
    pub const ALL: [ComplianceStatus; 5] = [
        ComplianceStatus::Current,
        ComplianceStatus::Compliant,
        ComplianceStatus::UnderReview,
        ComplianceStatus::Observed,
        ComplianceStatus::NonCompliant,
    ];

    /// Wire label as stored in the datasets.
    pub fn label(self) -> &'static str {
        match self {
            ComplianceStatus::Current => "vigente",
            ComplianceStatus::Compliant => "conforme",
            ComplianceStatus::UnderReview => "en revisión",
            ComplianceStatus::Observed => "observado",
            ComplianceStatus::NonCompliant => "no conforme",
        }
    }
}

impl Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Delivery status of an IT project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProjectStatus {
    /// Delivered.
    #[serde(rename = "completado", alias = "completed")]
    Completed,
    /// Under execution.
    #[serde(rename = "en ejecución", alias = "en ejecucion", alias = "in progress")]
    InProgress,
    /// Still being planned.
    #[serde(rename = "en planificación", alias = "en planificacion", alias = "planned")]
    Planned,
    /// On hold.
    #[serde(rename = "pausado", alias = "paused")]
    Paused,
}

impl ProjectStatus {
    /// Every status in declaration order.
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Completed,
        ProjectStatus::InProgress,
        ProjectStatus::Planned,
        ProjectStatus::Paused,
    ];

    /// Wire label as stored in the datasets.
    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::Completed => "completado",
            ProjectStatus::InProgress => "en ejecución",
            ProjectStatus::Planned => "en planificación",
            ProjectStatus::Paused => "pausado",
        }
    }
}

impl Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
