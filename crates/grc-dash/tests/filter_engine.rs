use std::path::PathBuf;

use grc_dash::{apply_filters, filter_indices, FilterField, FilterSet};
use grc_data::{DatasetFiles, DatasetStore, DirectorySource, GovernanceRecord, Priority, RiskLevel};
use proptest::prelude::*;

fn fixture_store() -> DatasetStore {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../grc-data/fixtures");
    DatasetStore::load(&DirectorySource::new(dir, DatasetFiles::default())).expect("fixtures")
}

const AREAS: [&str; 3] = ["Seguridad", "Datos", "Operaciones"];

fn record_strategy() -> impl Strategy<Value = GovernanceRecord> {
    (
        1u32..=6,
        1u32..=28,
        0usize..AREAS.len(),
        0usize..3,
        proptest::option::of(0usize..3),
        0u32..=100,
    )
        .prop_map(|(month, day, area, risk, priority, score)| GovernanceRecord {
            id: format!("GOV-{month:02}{day:02}{score:03}"),
            date: format!("2024-{month:02}-{day:02}"),
            it_area: AREAS[area].to_string(),
            cobit_domain: "Ejecutar".into(),
            maturity: 3,
            risk: RiskLevel::ALL[risk],
            risk_score: f64::from(score),
            accepted_risk: 50.0,
            effective_controls: 4,
            planned_controls: 6,
            institutionalized_policies_pct: 70.0,
            aligned_initiatives_pct: 65.0,
            priority: priority.map(|p| Priority::ALL[p]),
        })
}

fn filter_strategy() -> impl Strategy<Value = FilterSet> {
    (
        proptest::option::of(1u32..=6),
        proptest::option::of(1u32..=6),
        proptest::option::of(0usize..AREAS.len()),
        proptest::option::of(0usize..3),
        proptest::option::of(0usize..3),
    )
        .prop_map(|(from, to, area, risk, priority)| FilterSet {
            date_from: from.map(|m| format!("2024-{m:02}-10")).unwrap_or_default(),
            date_to: to.map(|m| format!("2024-{m:02}-20")).unwrap_or_default(),
            area: area.map(|a| AREAS[a].to_uppercase()).unwrap_or_default(),
            risk: risk.map(|r| RiskLevel::ALL[r].label().to_string()).unwrap_or_default(),
            priority: priority
                .map(|p| Priority::ALL[p].label().to_string())
                .unwrap_or_default(),
        })
}

fn satisfies(record: &GovernanceRecord, filters: &FilterSet) -> bool {
    (filters.date_from.is_empty() || record.date >= filters.date_from)
        && (filters.date_to.is_empty() || record.date <= filters.date_to)
        && (filters.area.is_empty() || record.it_area.eq_ignore_ascii_case(&filters.area))
        && (filters.risk.is_empty() || record.risk.label() == filters.risk)
        && (filters.priority.is_empty()
            || record.priority.map(Priority::label) == Some(filters.priority.as_str()))
}

proptest! {
    #[test]
    fn filtering_is_sound_and_complete(
        records in proptest::collection::vec(record_strategy(), 0..40),
        filters in filter_strategy(),
    ) {
        let kept = filter_indices(&records, &filters);
        let expected: Vec<usize> = records
            .iter()
            .enumerate()
            .filter(|(_, record)| satisfies(record, &filters))
            .map(|(idx, _)| idx)
            .collect();
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn filtering_is_idempotent(
        records in proptest::collection::vec(record_strategy(), 0..40),
        filters in filter_strategy(),
    ) {
        let once: Vec<GovernanceRecord> =
            apply_filters(&records, &filters).into_iter().cloned().collect();
        let twice: Vec<GovernanceRecord> =
            apply_filters(&once, &filters).into_iter().cloned().collect();
        prop_assert_eq!(once, twice);
    }
}

#[test]
fn date_from_keeps_later_records() {
    let store = fixture_store();
    let mut filters = FilterSet::default();
    filters.set(FilterField::DateFrom, "2024-01-10");
    let kept = apply_filters(store.governance(), &filters);
    assert_eq!(kept.len(), 23);
    assert!(kept.iter().all(|r| r.date.as_str() >= "2024-01-10"));
    assert_eq!(kept[0].id, "GOV-002");
}

#[test]
fn criteria_are_anded() {
    let store = fixture_store();
    let mut filters = FilterSet::default();
    filters.set(FilterField::Area, "seguridad");
    filters.set(FilterField::Risk, "alto");
    filters.set(FilterField::DateTo, "2024-03-31");
    let ids: Vec<_> = apply_filters(store.governance(), &filters)
        .iter()
        .map(|r| r.id.clone())
        .collect();
    assert_eq!(ids, vec!["GOV-001", "GOV-006", "GOV-011"]);
}

#[test]
fn english_labels_select_the_same_records() {
    let store = fixture_store();
    let mut spanish = FilterSet::default();
    spanish.set(FilterField::Priority, "media");
    let mut english = FilterSet::default();
    english.set(FilterField::Priority, "Medium");
    assert_eq!(
        filter_indices(store.governance(), &spanish),
        filter_indices(store.governance(), &english)
    );
    assert_eq!(filter_indices(store.governance(), &spanish).len(), 8);
}

#[test]
fn malformed_values_behave_as_unset() {
    let store = fixture_store();
    let mut filters = FilterSet::default();
    filters.set(FilterField::DateFrom, "10/01/2024");
    filters.set(FilterField::Risk, "extremo");
    assert!(filters.is_empty());
    assert_eq!(apply_filters(store.governance(), &filters).len(), 24);
}

#[test]
fn unknown_area_yields_empty_view() {
    let store = fixture_store();
    let mut filters = FilterSet::default();
    filters.set(FilterField::Area, "Finanzas");
    assert!(apply_filters(store.governance(), &filters).is_empty());
}

#[test]
fn date_bounds_are_normalized_before_comparison() {
    let store = fixture_store();
    let mut padded = FilterSet::default();
    padded.set(FilterField::DateFrom, "2024-01-10");
    let expected = filter_indices(store.governance(), &padded);
    assert_eq!(expected.len(), 23);

    for raw in ["2024-1-10", " 2024-01-10 ", "\t2024-1-10\n"] {
        let mut filters = FilterSet::default();
        filters.set(FilterField::DateFrom, raw);
        assert_eq!(filters.compile().date_from.as_deref(), Some("2024-01-10"), "{raw:?}");
        assert_eq!(filter_indices(store.governance(), &filters), expected, "{raw:?}");
    }

    let mut upper = FilterSet::default();
    upper.set(FilterField::DateTo, "2024-3-31");
    assert_eq!(upper.compile().date_to.as_deref(), Some("2024-03-31"));
    assert!(!upper.is_empty());
}

#[test]
fn emptiness_check_accepts_only_usable_values() {
    let mut filters = FilterSet::default();
    assert!(filters.is_empty());
    filters.set(FilterField::DateTo, "2024-02-30");
    filters.set(FilterField::Priority, "  ");
    assert!(filters.is_empty());
    filters.set(FilterField::Priority, "High");
    assert!(!filters.is_empty());
}
