use grc_data::{DatasetStore, GovernanceRecord, RiskLevel};
use serde::{Deserialize, Serialize};

use crate::focus::FocusMode;
use crate::tone::clamp_pct;

/// Placeholder shown for values that cannot be computed.
pub const PLACEHOLDER: &str = "—";

/// Arithmetic mean, or `None` for an empty input. Never produces NaN for
/// finite input.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Count of records whose risk level is high.
pub fn high_risk_count(records: &[&GovernanceRecord]) -> usize {
    records
        .iter()
        .filter(|record| record.risk == RiskLevel::High)
        .count()
}

/// Result of a KPI computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum KpiValue {
    /// A mean or score.
    Measure(f64),
    /// A record count.
    Count(usize),
    /// Nothing to average over.
    Unavailable,
}

impl KpiValue {
    /// Numeric view of the value, `None` when unavailable.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            KpiValue::Measure(value) => Some(*value),
            KpiValue::Count(count) => Some(*count as f64),
            KpiValue::Unavailable => None,
        }
    }
}

/// Position of a KPI card on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KpiSlot {
    /// First card, maturity by default.
    Maturity,
    /// Second card, institutionalized policies by default.
    Policies,
    /// Third card, aligned initiatives by default.
    Aligned,
    /// Fourth card, data quality by default.
    Quality,
    /// Fifth card, high-risk count.
    HighRisks,
}

impl KpiSlot {
    /// Cards in screen order.
    pub const ALL: [KpiSlot; 5] = [
        KpiSlot::Maturity,
        KpiSlot::Policies,
        KpiSlot::Aligned,
        KpiSlot::Quality,
        KpiSlot::HighRisks,
    ];

    /// Metric shown in the slot when no focus override applies.
    pub fn default_metric(self) -> Metric {
        match self {
            KpiSlot::Maturity => Metric::Maturity,
            KpiSlot::Policies => Metric::InstitutionalizedPolicies,
            KpiSlot::Aligned => Metric::AlignedInitiatives,
            KpiSlot::Quality => Metric::DataQuality,
            KpiSlot::HighRisks => Metric::HighRiskCount,
        }
    }
}

/// A computable dashboard metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    /// Mean COBIT maturity of the filtered view (0 to 5).
    Maturity,
    /// Mean institutionalized-policy percentage of the filtered view.
    InstitutionalizedPolicies,
    /// Mean aligned-initiative percentage of the filtered view.
    AlignedInitiatives,
    /// Mean quality percentage of the whole quality collection.
    DataQuality,
    /// Number of high-risk records in the filtered view.
    HighRiskCount,
    /// Risk score weighted by risk level (high 3, medium 2, low 1).
    RiskWeightedScore,
    /// Mean excess of risk score over the accepted level, floored at zero.
    RiskExceedance,
    /// Mean achieved impact of all projects.
    ProjectImpact,
    /// Mean alignment score of all projects.
    ProjectAlignment,
    /// Mean completeness of all quality records.
    DataCompleteness,
    /// Mean consistency of all quality records.
    DataConsistency,
}

enum Scale {
    Maturity,
    Percent,
    Score,
    Count,
}

impl Metric {
    /// Card title.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Maturity => "Madurez COBIT",
            Metric::InstitutionalizedPolicies => "Políticas institucionalizadas",
            Metric::AlignedInitiatives => "Iniciativas TI alineadas",
            Metric::DataQuality => "Calidad de datos",
            Metric::HighRiskCount => "Riesgos altos",
            Metric::RiskWeightedScore => "Score de riesgo ponderado",
            Metric::RiskExceedance => "Exceso sobre riesgo aceptado",
            Metric::ProjectImpact => "Impacto de proyectos",
            Metric::ProjectAlignment => "Alineación de proyectos",
            Metric::DataCompleteness => "Completitud de datos",
            Metric::DataConsistency => "Consistencia de datos",
        }
    }

    fn scale(self) -> Scale {
        match self {
            Metric::Maturity => Scale::Maturity,
            Metric::HighRiskCount => Scale::Count,
            Metric::RiskWeightedScore | Metric::RiskExceedance => Scale::Score,
            Metric::InstitutionalizedPolicies
            | Metric::AlignedInitiatives
            | Metric::DataQuality
            | Metric::ProjectImpact
            | Metric::ProjectAlignment
            | Metric::DataCompleteness
            | Metric::DataConsistency => Scale::Percent,
        }
    }

    /// Computes the metric. Every mean is unavailable while the filtered
    /// view is empty, including those drawn from the full collections.
    pub fn compute(self, ctx: &KpiContext<'_>) -> KpiValue {
        if let Metric::HighRiskCount = self {
            return KpiValue::Count(high_risk_count(ctx.filtered));
        }
        if ctx.filtered.is_empty() {
            return KpiValue::Unavailable;
        }
        let filtered = ctx.filtered.iter();
        let value = match self {
            Metric::Maturity => mean(filtered.map(|r| f64::from(r.maturity))),
            Metric::InstitutionalizedPolicies => {
                mean(filtered.map(|r| r.institutionalized_policies_pct))
            }
            Metric::AlignedInitiatives => mean(filtered.map(|r| r.aligned_initiatives_pct)),
            Metric::DataQuality => mean(ctx.store.quality().iter().map(|q| q.quality_pct)),
            Metric::RiskWeightedScore => {
                let (weighted, weights) = filtered.fold((0.0, 0.0), |(sum, total), r| {
                    let weight = r.risk.weight();
                    (sum + r.risk_score * weight, total + weight)
                });
                (weights > 0.0).then(|| weighted / weights)
            }
            Metric::RiskExceedance => {
                mean(filtered.map(|r| (r.risk_score - r.accepted_risk).max(0.0)))
            }
            Metric::ProjectImpact => mean(ctx.store.projects().iter().map(|p| p.impact_pct)),
            Metric::ProjectAlignment => {
                mean(ctx.store.projects().iter().map(|p| p.alignment_score))
            }
            Metric::DataCompleteness => {
                mean(ctx.store.quality().iter().map(|q| q.completeness_pct))
            }
            Metric::DataConsistency => {
                mean(ctx.store.quality().iter().map(|q| q.consistency_pct))
            }
            Metric::HighRiskCount => None,
        };
        value.map_or(KpiValue::Unavailable, KpiValue::Measure)
    }

    /// Display string for a computed value.
    pub fn display(self, value: KpiValue) -> String {
        match (value, self.scale()) {
            (KpiValue::Unavailable, _) => PLACEHOLDER.to_string(),
            (KpiValue::Count(count), _) => count.to_string(),
            (KpiValue::Measure(v), Scale::Maturity) => format!("{:.1}", round_to(v, 1)),
            (KpiValue::Measure(v), Scale::Percent) => format!("{:.0}%", round_to(v, 0)),
            (KpiValue::Measure(v), Scale::Score | Scale::Count) => {
                format!("{:.0}", round_to(v, 0))
            }
        }
    }

    /// Progress bar width in percent, clamped to `[0, 100]`.
    pub fn bar_pct(self, value: KpiValue, ctx: &KpiContext<'_>) -> f64 {
        match (value, self.scale()) {
            (KpiValue::Unavailable, _) => 0.0,
            (KpiValue::Count(count), _) => {
                let total = ctx.store.governance().len();
                if total == 0 {
                    0.0
                } else {
                    clamp_pct(count as f64 / total as f64 * 100.0)
                }
            }
            (KpiValue::Measure(v), Scale::Maturity) => clamp_pct(v / 5.0 * 100.0),
            (KpiValue::Measure(v), _) => clamp_pct(v),
        }
    }
}

/// Inputs of a KPI computation.
#[derive(Debug, Clone, Copy)]
pub struct KpiContext<'a> {
    /// Filtered governance view.
    pub filtered: &'a [&'a GovernanceRecord],
    /// Full collections.
    pub store: &'a DatasetStore,
}

/// One rendered KPI card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    /// Card position.
    pub slot: KpiSlot,
    /// Metric shown in the card.
    pub metric: Metric,
    /// Card title.
    pub label: String,
    /// Raw value.
    pub value: KpiValue,
    /// Formatted value.
    pub display: String,
    /// Progress bar width in percent.
    pub bar_pct: f64,
    /// Caption below the value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// Computes the five KPI cards for the active focus mode.
pub fn compute_kpis(ctx: &KpiContext<'_>, focus: FocusMode) -> Vec<Kpi> {
    let evaluated = ctx.filtered.len();
    KpiSlot::ALL
        .into_iter()
        .map(|slot| {
            let metric = focus.metric_for(slot);
            let value = metric.compute(ctx);
            let caption = match slot {
                KpiSlot::Maturity => Some(format!("{evaluated} registros")),
                KpiSlot::HighRisks => Some(format!("de {evaluated} evaluados")),
                _ => None,
            };
            Kpi {
                slot,
                metric,
                label: metric.label().to_string(),
                value,
                display: metric.display(value),
                bar_pct: metric.bar_pct(value, ctx),
                caption,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(Vec::<f64>::new()), None);
        assert_eq!(mean([2.0, 4.0]), Some(3.0));
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(3.25, 1), 3.3);
        assert_eq!(Metric::Maturity.display(KpiValue::Measure(3.25)), "3.3");
        assert_eq!(Metric::DataQuality.display(KpiValue::Measure(78.5)), "79%");
    }

    #[test]
    fn unavailable_displays_placeholder() {
        assert_eq!(Metric::Maturity.display(KpiValue::Unavailable), PLACEHOLDER);
        assert_eq!(KpiValue::Unavailable.as_f64(), None);
    }
}
