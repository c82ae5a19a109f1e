use chrono::NaiveDate;
use grc_data::{GovernanceRecord, Priority, RiskLevel};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Field of the filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterField {
    /// Inclusive lower date bound.
    DateFrom,
    /// Inclusive upper date bound.
    DateTo,
    /// IT area.
    Area,
    /// Risk level.
    Risk,
    /// Priority.
    Priority,
}

/// Raw filter values as entered by the user. An empty string leaves the
/// field unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    /// Inclusive lower bound on the record date (`YYYY-MM-DD`).
    #[serde(default)]
    pub date_from: String,
    /// Inclusive upper bound on the record date (`YYYY-MM-DD`).
    #[serde(default)]
    pub date_to: String,
    /// IT area, compared case-insensitively.
    #[serde(default)]
    pub area: String,
    /// Risk level label (Spanish or English).
    #[serde(default)]
    pub risk: String,
    /// Priority label (Spanish or English).
    #[serde(default)]
    pub priority: String,
}

impl FilterSet {
    /// Sets one field.
    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FilterField::DateFrom => self.date_from = value,
            FilterField::DateTo => self.date_to = value,
            FilterField::Area => self.area = value,
            FilterField::Risk => self.risk = value,
            FilterField::Priority => self.priority = value,
        }
    }

    /// Returns true when no field constrains the view. Malformed values
    /// count as unset.
    pub fn is_empty(&self) -> bool {
        date_bound(&self.date_from).is_none()
            && date_bound(&self.date_to).is_none()
            && non_empty(&self.area).is_none()
            && non_empty(&self.risk).and_then(RiskLevel::parse_label).is_none()
            && non_empty(&self.priority).and_then(Priority::parse_label).is_none()
    }

    /// Normalizes the raw values. Malformed values are dropped and behave as unset.
    pub fn compile(&self) -> ActiveFilters {
        ActiveFilters {
            date_from: checked("date_from", &self.date_from, date_bound),
            date_to: checked("date_to", &self.date_to, date_bound),
            area: non_empty(&self.area).map(str::to_lowercase),
            risk: checked("risk", &self.risk, RiskLevel::parse_label),
            priority: checked("priority", &self.priority, Priority::parse_label),
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Parses a date bound and re-renders it zero-padded, so `2024-1-10`
/// compares like `2024-01-10`.
fn date_bound(value: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(non_empty(value)?, "%Y-%m-%d").ok()?;
    Some(date.format("%Y-%m-%d").to_string())
}

fn checked<T>(field: &str, raw: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
    let value = non_empty(raw)?;
    let parsed = parse(value);
    if parsed.is_none() {
        warn!(field, value, "ignoring malformed filter value");
    }
    parsed
}

/// Validated filter criteria; `None` means unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveFilters {
    /// Inclusive lower date bound, zero-padded `YYYY-MM-DD`.
    pub date_from: Option<String>,
    /// Inclusive upper date bound, zero-padded `YYYY-MM-DD`.
    pub date_to: Option<String>,
    /// Lowercased IT area.
    pub area: Option<String>,
    /// Required risk level.
    pub risk: Option<RiskLevel>,
    /// Required priority.
    pub priority: Option<Priority>,
}

impl ActiveFilters {
    /// Returns true when the record satisfies every active criterion.
    ///
    /// Dates are compared lexicographically, which orders ISO dates correctly.
    pub fn matches(&self, record: &GovernanceRecord) -> bool {
        if let Some(from) = &self.date_from {
            if record.date.as_str() < from.as_str() {
                return false;
            }
        }
        if let Some(to) = &self.date_to {
            if record.date.as_str() > to.as_str() {
                return false;
            }
        }
        if let Some(area) = &self.area {
            if record.it_area.to_lowercase() != *area {
                return false;
            }
        }
        if let Some(risk) = self.risk {
            if record.risk != risk {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if record.priority != Some(priority) {
                return false;
            }
        }
        true
    }
}

/// Positions of the records passing the filters, in collection order.
pub fn filter_indices(records: &[GovernanceRecord], filters: &FilterSet) -> Vec<usize> {
    let active = filters.compile();
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| active.matches(record))
        .map(|(idx, _)| idx)
        .collect()
}

/// Records passing the filters, in collection order.
pub fn apply_filters<'a>(
    records: &'a [GovernanceRecord],
    filters: &FilterSet,
) -> Vec<&'a GovernanceRecord> {
    let active = filters.compile();
    records.iter().filter(|record| active.matches(record)).collect()
}
