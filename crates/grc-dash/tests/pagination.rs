use std::path::PathBuf;

use grc_dash::paginate::page_count;
use grc_dash::{
    explorer_view, paginate, search, ExplorerState, ExplorerTab, PageLink, TableBody,
};
use grc_data::{DatasetFiles, DatasetStore, DirectorySource};
use proptest::prelude::*;

fn fixture_store() -> DatasetStore {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../grc-data/fixtures");
    DatasetStore::load(&DirectorySource::new(dir, DatasetFiles::default())).expect("fixtures")
}

#[test]
fn twenty_three_rows_make_three_pages() {
    let rows: Vec<u32> = (1..=23).collect();
    let page = paginate(&rows, 5, 10);
    assert_eq!(page.meta.pages, 3);
    assert_eq!(page.meta.page, 3);
    assert_eq!(page.rows, &[21, 22, 23]);
    assert_eq!((page.meta.start, page.meta.end), (21, 23));
    assert_eq!(page.meta.range_label(), "21–23 de 23");
    assert!(page.meta.has_prev);
    assert!(!page.meta.has_next);
    assert_eq!(
        page.meta.links,
        vec![PageLink::Page(1), PageLink::Page(2), PageLink::Page(3)]
    );
}

#[test]
fn page_zero_clamps_to_first() {
    let rows: Vec<u32> = (1..=23).collect();
    let page = paginate(&rows, 0, 10);
    assert_eq!(page.meta.page, 1);
    assert_eq!(page.rows.len(), 10);
    assert!(!page.meta.has_prev);
}

proptest! {
    #[test]
    fn pages_cover_rows_exactly_once(total in 0usize..120, size in 1usize..15) {
        let rows: Vec<usize> = (0..total).collect();
        let pages = page_count(total, size);
        prop_assert_eq!(pages, total.div_ceil(size).max(1));
        let mut seen = Vec::new();
        for page in 1..=pages {
            let served = paginate(&rows, page, size);
            prop_assert_eq!(served.meta.page, page);
            prop_assert!(served.rows.len() <= size);
            seen.extend_from_slice(served.rows);
        }
        prop_assert_eq!(seen, rows);
    }

    #[test]
    fn served_page_is_always_in_range(
        total in 0usize..80,
        size in 1usize..12,
        requested in 0usize..50,
    ) {
        let rows: Vec<usize> = (0..total).collect();
        let served = paginate(&rows, requested, size);
        prop_assert!(served.meta.page >= 1);
        prop_assert!(served.meta.page <= served.meta.pages);
    }
}

#[test]
fn search_ignores_case_and_matches_any_field() {
    let store = fixture_store();
    assert_eq!(search(store.governance(), "").len(), 24);
    let lower = search(store.governance(), "seguridad");
    let upper = search(store.governance(), "SEGURIDAD");
    assert_eq!(lower.len(), 5);
    assert_eq!(lower, upper);

    // Matches an optional field (source system) as well.
    let quality = search(store.quality(), "sap");
    let ids: Vec<_> = quality.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, vec!["DQ-003", "DQ-004"]);

    // Numbers match on their displayed form.
    assert_eq!(search(store.projects(), "4.5").len(), 1);
}

#[test]
fn explorer_view_renders_requested_tab() {
    let store = fixture_store();
    let mut state = ExplorerState::default();
    state.jump(3, 3);
    let view = explorer_view(&store, &DatasetFiles::default(), &state, 10);
    assert_eq!(view.title, "Riesgo TI y Controles");
    assert_eq!(view.file, "data/governance_risk_data.json");
    assert_eq!(view.headers.len(), 11);
    assert_eq!(view.count_label, "24 registros");
    assert_eq!(view.range_label, "21–24 de 24");
    match view.body {
        TableBody::Rows { rows } => {
            assert_eq!(rows.len(), 4);
            assert_eq!(rows[0][0].text, "GOV-021");
        }
        TableBody::NoResults { .. } => panic!("expected rows"),
    }
}

#[test]
fn explorer_reports_empty_search() {
    let store = fixture_store();
    let mut state = ExplorerState::default();
    state.switch_tab(ExplorerTab::Policies);
    state.set_search("blockchain");
    let view = explorer_view(&store, &DatasetFiles::default(), &state, 10);
    assert_eq!(
        view.body,
        TableBody::NoResults {
            query: "blockchain".into()
        }
    );
    assert_eq!(view.meta.pages, 1);
    assert_eq!(view.meta.total, 0);
    assert_eq!(view.headers[1].label, "Política");
}

#[test]
fn quality_tab_formats_counts_and_bars() {
    let store = fixture_store();
    let mut state = ExplorerState::default();
    state.switch_tab(ExplorerTab::Quality);
    let view = explorer_view(&store, &DatasetFiles::default(), &state, 10);
    let TableBody::Rows { rows } = view.body else {
        panic!("expected rows");
    };
    let first = &rows[0];
    assert_eq!(first[3].text, "93%");
    assert_eq!(first[4].text, "120.450");
    // 8640 stays ungrouped.
    assert_eq!(rows[4][4].text, "8640");
}
