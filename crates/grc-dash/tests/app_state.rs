use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use assert_json_diff::assert_json_include;
use grc_core::GrcError;
use grc_dash::{
    load_config, AppState, ChartKind, DashboardConfig, ExplorerTab, FilterField, FocusMode,
    KpiValue, Panel, TableView, Tone, ViewMode,
};
use grc_data::{DatasetFiles, DatasetKind, MemorySource};
use serde_json::json;
use tempfile::tempdir;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../grc-data/fixtures")
}

fn fixture_state() -> AppState {
    let config = DashboardConfig {
        data_dir: fixture_dir(),
        ..DashboardConfig::default()
    };
    AppState::from_config(config).expect("bootstrap")
}

fn copy_fixtures(target: &Path) {
    fs::create_dir_all(target).expect("mkdir");
    for kind in DatasetKind::ALL {
        let name = DatasetFiles::default().file_for(kind).to_string();
        fs::copy(fixture_dir().join(&name), target.join(&name)).expect("copy fixture");
    }
}

#[test]
fn snapshot_shape_under_default_focus() {
    let state = fixture_state();
    let value = state.snapshot().to_value().expect("json");
    assert_json_include!(
        actual: value,
        expected: json!({
            "focus": "governance",
            "filtered_count": 24,
            "total_count": 24,
            "kpis": [{
                "slot": "maturity",
                "metric": "maturity",
                "label": "Madurez COBIT",
                "display": "2.8",
                "caption": "24 registros"
            }],
            "primary_chart": { "kind": "maturity-radar", "axis_max": 5.0 },
            "heatmap": { "excluded": 0 },
            "table": { "view": "decisions", "count_label": "24 registros" },
            "highlighted": ["kpis", "primary-chart"]
        })
    );
}

#[test]
fn decisions_join_policy_and_project_by_area() {
    let state = fixture_state();
    let snapshot = state.snapshot();
    let table = &snapshot.table;
    assert_eq!(table.block.rows.len(), 15);
    let first = &table.block.rows[0];
    let col = |key: &str| {
        table
            .block
            .headers
            .iter()
            .position(|h| h.key == key)
            .expect("column")
    };
    assert_eq!(first[col("politica")].text, "POL-001");
    assert_eq!(first[col("politica")].tone, Some(Tone::Cyan));
    assert_eq!(first[col("proyecto_ti")].text, "PRY-002");
    assert_eq!(first[col("controles")].text, "4/8");
    assert_eq!(first[col("riesgo_score")].tone, Some(Tone::Red));
}

#[test]
fn focus_switches_chart_table_and_kpis() {
    let mut state = fixture_state();
    let expected = [
        (FocusMode::Risk, ChartKind::RiskScoreRadar, TableView::HighRisk),
        (FocusMode::DataQuality, ChartKind::QualityDimensions, TableView::Quality),
        (FocusMode::Alignment, ChartKind::AlignmentByArea, TableView::Projects),
        (FocusMode::Governance, ChartKind::MaturityRadar, TableView::Decisions),
        (FocusMode::Risk, ChartKind::RiskScoreRadar, TableView::HighRisk),
    ];
    for (focus, chart, table) in expected {
        state.set_focus(focus);
        let snapshot = state.snapshot();
        assert_eq!(snapshot.focus, focus);
        assert_eq!(snapshot.primary_chart.kind, chart);
        assert_eq!(snapshot.table.view, table);
    }

    let snapshot = state.snapshot();
    assert!(snapshot.highlighted.contains(&Panel::Heatmap));
    assert_eq!(snapshot.table.block.rows.len(), 8);
    assert_eq!(snapshot.table.count_label, "8 registros");
    assert_eq!(snapshot.table.block.rows[0][0].text, "GOV-021");
}

#[test]
fn filters_recompute_the_view() {
    let mut state = fixture_state();
    state.set_filter(FilterField::Area, "Datos");
    assert_eq!(state.filtered_len(), 5);
    let snapshot = state.snapshot();
    assert_eq!(snapshot.heatmap.total(), 5);
    assert_eq!(snapshot.risk_summary.len(), 1);
    assert_eq!(snapshot.kpis[4].value, KpiValue::Count(0));

    state.set_filter(FilterField::Risk, "alto");
    assert_eq!(state.filtered_len(), 0);
    let empty = state.snapshot();
    assert_eq!(empty.kpis[0].value, KpiValue::Unavailable);
    assert!(empty.table.block.rows.is_empty());

    state.reset_filters();
    assert_eq!(state.filtered_len(), 24);
    assert_eq!(state.filters(), &Default::default());
}

#[test]
fn interactions_apply_regardless_of_active_view() {
    let mut state = fixture_state();
    state.show_view(ViewMode::Explorer);
    state.set_filter(FilterField::Area, "Datos");
    assert_eq!(state.filtered_len(), 5);
    assert_eq!(state.snapshot().filtered_count, 5);

    state.show_view(ViewMode::Dashboard);
    assert_eq!(state.view(), ViewMode::Dashboard);
    let view = state.explorer_view();
    assert_eq!(view.meta.total, 24);

    state.reset_filters();
    assert_eq!(state.filtered_len(), 24);
}

#[test]
fn search_is_debounced_and_resets_page() {
    let mut state = fixture_state();
    state.show_view(ViewMode::Explorer);
    state.jump_page(3);
    assert_eq!(state.explorer().page, 3);

    let start = Instant::now();
    state.search_input("seg", start);
    state.search_input("seguridad", start + Duration::from_millis(100));
    assert!(!state.tick(start + Duration::from_millis(300)));
    assert_eq!(state.explorer().page, 3);
    assert!(state.tick(start + Duration::from_millis(350)));
    assert!(!state.search_pending());

    assert_eq!(state.explorer().search, "seguridad");
    assert_eq!(state.explorer().page, 1);
    let view = state.explorer_view();
    assert_eq!(view.meta.total, 5);
    assert_eq!(view.meta.pages, 1);

    state.next_page();
    assert_eq!(state.explorer().page, 1);
}

#[test]
fn tab_switch_drops_pending_search() {
    let mut state = fixture_state();
    state.show_view(ViewMode::Explorer);
    let start = Instant::now();
    state.search_input("sap", start);
    state.switch_tab(ExplorerTab::Quality);
    assert!(!state.tick(start + Duration::from_secs(1)));
    let view = state.explorer_view();
    assert_eq!(view.meta.total, 6);
    assert_eq!(view.file, "data/data_quality.json");
}

#[test]
fn canonical_snapshot_is_stable() {
    let state = fixture_state();
    let first = state.snapshot().to_canonical_json().expect("json");
    let second = state.snapshot().to_canonical_json().expect("json");
    assert_eq!(first, second);
}

#[test]
fn config_resolves_relative_data_dir() {
    let dir = tempdir().expect("dir");
    copy_fixtures(&dir.path().join("datasets"));
    let path = dir.path().join("dashboard.yaml");
    fs::write(&path, "data_dir: datasets\npage_size: 5\n").expect("write config");

    let config = load_config(&path).expect("config");
    assert_eq!(config.data_dir, dir.path().join("datasets"));
    assert_eq!(config.page_size, 5);
    assert_eq!(config.search_debounce_ms, 250);
    assert_eq!(config.decisions_limit, 15);

    let mut state = AppState::from_config(config).expect("bootstrap");
    state.show_view(ViewMode::Explorer);
    assert_eq!(state.explorer_view().meta.pages, 5);
}

#[test]
fn invalid_config_is_rejected() {
    let dir = tempdir().expect("dir");
    let path = dir.path().join("dashboard.yaml");
    fs::write(&path, "page_size: 0\n").expect("write config");
    let err = load_config(&path).expect_err("zero page size");
    assert!(matches!(err, GrcError::Config(_)));
    assert_eq!(err.info().code, "grc_dash.config_page_size");

    let err = load_config(dir.path().join("missing.yaml")).expect_err("missing");
    assert_eq!(err.info().code, "grc_dash.config_read");

    let err = AppState::from_config(DashboardConfig {
        decisions_limit: 0,
        ..DashboardConfig::default()
    })
    .expect_err("zero limit");
    assert_eq!(err.info().code, "grc_dash.config_decisions_limit");
}

#[test]
fn partial_source_fails_startup() {
    let governance = fs::read(fixture_dir().join("governance_risk_data.json")).expect("read");
    let source = MemorySource::new().with(DatasetKind::Governance, governance);
    let err = AppState::bootstrap(&source, DashboardConfig::default()).expect_err("incomplete");
    assert!(matches!(err, GrcError::Load(_)));
    assert_eq!(err.info().context.get("dataset").map(String::as_str), Some("quality"));
}
