use grc_data::GovernanceRecord;
use serde::{Deserialize, Serialize};

/// Number of buckets per axis.
pub const BUCKETS: usize = 5;

/// Inclusive value ranges of the buckets, lowest first.
pub const BUCKET_RANGES: [(u32, u32); BUCKETS] = [(0, 20), (21, 40), (41, 60), (61, 80), (81, 100)];

/// Severity tier of a heatmap cell, derived from its position only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CellTier {
    /// Index sum below 2.
    Low,
    /// Index sum 2 or 3.
    Medium,
    /// Index sum 4 or 5.
    High,
    /// Index sum 6 or more.
    Critical,
}

impl CellTier {
    /// Tier of the cell at `row`, `col` (display indices).
    pub fn at(row: usize, col: usize) -> Self {
        match row + col {
            sum if sum >= 6 => CellTier::Critical,
            sum if sum >= 4 => CellTier::High,
            sum if sum >= 2 => CellTier::Medium,
            _ => CellTier::Low,
        }
    }
}

/// Ascending bucket index of a value in `[0, 100]`. Values are bucketed by
/// upper bound, so 20.5 lands in 21–40. Anything else yields `None`.
pub fn bucket_index(value: f64) -> Option<usize> {
    if !(0.0..=100.0).contains(&value) {
        return None;
    }
    BUCKET_RANGES
        .iter()
        .position(|&(_, hi)| value <= f64::from(hi))
}

fn range_label((lo, hi): (u32, u32)) -> String {
    format!("{lo}–{hi}")
}

/// One cell of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapCell {
    /// Number of records in the cell.
    pub count: usize,
    /// Ids of those records, in filtered order.
    pub record_ids: Vec<String>,
    /// Severity tier; empty cells have none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<CellTier>,
}

/// Co-occurrence grid of accepted risk (rows, highest first) against risk
/// score (columns, lowest first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapGrid {
    /// `cells[row][col]`.
    pub cells: Vec<Vec<HeatmapCell>>,
    /// Column labels (risk score), ascending.
    pub x_labels: Vec<String>,
    /// Row labels (accepted risk), descending.
    pub y_labels: Vec<String>,
    /// Largest cell count, at least 1.
    pub max_count: usize,
    /// Records left out because a value fell outside `[0, 100]`.
    pub excluded: usize,
}

impl HeatmapGrid {
    /// Buckets the records into the grid.
    pub fn build(records: &[&GovernanceRecord]) -> Self {
        let mut counts = [[0usize; BUCKETS]; BUCKETS];
        let mut ids: Vec<Vec<Vec<String>>> = vec![vec![Vec::new(); BUCKETS]; BUCKETS];
        let mut excluded = 0;
        for record in records {
            match (bucket_index(record.accepted_risk), bucket_index(record.risk_score)) {
                (Some(accepted), Some(score)) => {
                    let row = BUCKETS - 1 - accepted;
                    counts[row][score] += 1;
                    ids[row][score].push(record.id.clone());
                }
                _ => excluded += 1,
            }
        }
        let cells = ids
            .into_iter()
            .enumerate()
            .map(|(row, row_ids)| {
                row_ids
                    .into_iter()
                    .enumerate()
                    .map(|(col, record_ids)| {
                        let count = counts[row][col];
                        HeatmapCell {
                            count,
                            record_ids,
                            tier: (count > 0).then(|| CellTier::at(row, col)),
                        }
                    })
                    .collect()
            })
            .collect();
        let max_count = counts.iter().flatten().copied().max().unwrap_or(0).max(1);
        Self {
            cells,
            x_labels: BUCKET_RANGES.iter().copied().map(range_label).collect(),
            y_labels: BUCKET_RANGES.iter().rev().copied().map(range_label).collect(),
            max_count,
            excluded,
        }
    }

    /// Sum of all cell counts.
    pub fn total(&self) -> usize {
        self.cells.iter().flatten().map(|cell| cell.count).sum()
    }

    /// Count of the cell at `row`, `col`.
    pub fn count(&self, row: usize, col: usize) -> usize {
        self.cells
            .get(row)
            .and_then(|cells| cells.get(col))
            .map_or(0, |cell| cell.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_edges() {
        assert_eq!(bucket_index(0.0), Some(0));
        assert_eq!(bucket_index(20.0), Some(0));
        assert_eq!(bucket_index(20.5), Some(1));
        assert_eq!(bucket_index(21.0), Some(1));
        assert_eq!(bucket_index(100.0), Some(4));
        assert_eq!(bucket_index(100.1), None);
        assert_eq!(bucket_index(-1.0), None);
        assert_eq!(bucket_index(f64::NAN), None);
    }

    #[test]
    fn tiers_follow_index_sum() {
        assert_eq!(CellTier::at(0, 0), CellTier::Low);
        assert_eq!(CellTier::at(1, 1), CellTier::Medium);
        assert_eq!(CellTier::at(2, 2), CellTier::High);
        assert_eq!(CellTier::at(4, 2), CellTier::Critical);
        assert_eq!(CellTier::at(4, 4), CellTier::Critical);
    }
}
