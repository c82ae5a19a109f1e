use grc_data::{GovernanceRecord, RiskLevel};
use serde::{Deserialize, Serialize};

/// Areas listed in the side panel next to the heatmap, in display order.
pub const SUMMARY_AREAS: [&str; 4] = ["Seguridad", "Operaciones", "Datos", "Infraestructura"];

/// Risk mix of one IT area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaRiskSummary {
    /// IT area.
    pub area: String,
    /// Records in the area.
    pub total: usize,
    /// High-risk records.
    pub high: usize,
    /// Medium-risk records.
    pub medium: usize,
    /// Low-risk records.
    pub low: usize,
}

/// Risk mix per summary area; areas without records are omitted.
pub fn risk_summary(records: &[&GovernanceRecord]) -> Vec<AreaRiskSummary> {
    SUMMARY_AREAS
        .iter()
        .filter_map(|area| {
            let subset: Vec<_> = records.iter().filter(|r| r.it_area == *area).collect();
            if subset.is_empty() {
                return None;
            }
            let count = |level: RiskLevel| subset.iter().filter(|r| r.risk == level).count();
            Some(AreaRiskSummary {
                area: area.to_string(),
                total: subset.len(),
                high: count(RiskLevel::High),
                medium: count(RiskLevel::Medium),
                low: count(RiskLevel::Low),
            })
        })
        .collect()
}
