//! Semantic colors for badges, bars and chart series.

use grc_data::{ComplianceStatus, Priority, ProjectStatus, RiskLevel};
use serde::{Deserialize, Serialize};

/// Semantic color understood by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tone {
    /// Critical / failing.
    Red,
    /// Warning.
    Amber,
    /// Healthy.
    Green,
    /// Informational / primary accent.
    Cyan,
    /// Secondary accent.
    Blue,
    /// Tertiary accent.
    Purple,
    /// Neutral or unknown.
    Muted,
}

/// Badge tone of a risk level.
pub fn risk_tone(level: RiskLevel) -> Tone {
    match level {
        RiskLevel::High => Tone::Red,
        RiskLevel::Medium => Tone::Amber,
        RiskLevel::Low => Tone::Green,
    }
}

/// Badge tone of a priority or criticality.
pub fn priority_tone(priority: Priority) -> Tone {
    match priority {
        Priority::High => Tone::Red,
        Priority::Medium => Tone::Amber,
        Priority::Low => Tone::Muted,
    }
}

/// Badge tone of a COBIT maturity level; levels outside 1..=5 are muted.
pub fn maturity_tone(level: u8) -> Tone {
    match level {
        1 => Tone::Red,
        2 | 3 => Tone::Amber,
        4 => Tone::Green,
        5 => Tone::Cyan,
        _ => Tone::Muted,
    }
}

/// Tone of a quality-style percentage bar.
pub fn quality_tone(pct: f64) -> Tone {
    if pct >= 90.0 {
        Tone::Green
    } else if pct >= 80.0 {
        Tone::Cyan
    } else if pct >= 70.0 {
        Tone::Amber
    } else {
        Tone::Red
    }
}

/// Tone of the inline risk score bar.
pub fn risk_score_tone(score: f64) -> Tone {
    if score > 60.0 {
        Tone::Red
    } else if score > 35.0 {
        Tone::Amber
    } else {
        Tone::Green
    }
}

/// Badge tone of a compliance status.
pub fn compliance_tone(status: ComplianceStatus) -> Tone {
    match status {
        ComplianceStatus::Current | ComplianceStatus::Compliant => Tone::Green,
        ComplianceStatus::UnderReview | ComplianceStatus::Observed => Tone::Amber,
        ComplianceStatus::NonCompliant => Tone::Red,
    }
}

/// Badge tone of a project status.
pub fn project_status_tone(status: ProjectStatus) -> Tone {
    match status {
        ProjectStatus::Completed => Tone::Green,
        ProjectStatus::InProgress => Tone::Cyan,
        ProjectStatus::Planned => Tone::Blue,
        ProjectStatus::Paused => Tone::Amber,
    }
}

/// Clamps a percentage into `[0, 100]`; non-finite input maps to 0.
pub fn clamp_pct(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}
