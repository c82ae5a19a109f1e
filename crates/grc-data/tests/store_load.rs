use std::fs;
use std::path::PathBuf;

use grc_core::GrcError;
use grc_data::{
    DatasetFiles, DatasetKind, DatasetStore, DirectorySource, MemorySource, Priority, RiskLevel,
};
use tempfile::tempdir;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

fn copy_fixtures(target: &std::path::Path) {
    for kind in DatasetKind::ALL {
        let name = DatasetFiles::default().file_for(kind).to_string();
        fs::copy(fixture_dir().join(&name), target.join(&name)).expect("copy fixture");
    }
}

#[test]
fn loads_all_fixture_collections() {
    let source = DirectorySource::new(fixture_dir(), DatasetFiles::default());
    let store = DatasetStore::load(&source).expect("load");
    assert_eq!(store.governance().len(), 24);
    assert_eq!(store.quality().len(), 6);
    assert_eq!(store.projects().len(), 6);
    assert_eq!(store.policies().len(), 5);

    let first = &store.governance()[0];
    assert_eq!(first.id, "GOV-001");
    assert_eq!(first.risk, RiskLevel::High);
    assert_eq!(first.priority, Some(Priority::High));
    assert_eq!(first.it_area, "Seguridad");
}

#[test]
fn manifest_records_counts_and_hashes_in_load_order() {
    let source = DirectorySource::new(fixture_dir(), DatasetFiles::default());
    let store = DatasetStore::load(&source).expect("load");
    let kinds: Vec<_> = store.manifest().entries.iter().map(|e| e.kind).collect();
    assert_eq!(kinds, DatasetKind::ALL.to_vec());
    let quality = store.manifest().entry(DatasetKind::Quality).expect("entry");
    assert_eq!(quality.records, 6);
    assert_eq!(quality.sha256.len(), 64);
    assert!(quality.location.ends_with("data_quality.json"));

    let again = DatasetStore::load(&source).expect("reload");
    assert_eq!(store.manifest(), again.manifest());
}

#[test]
fn missing_file_fails_the_whole_load() {
    let dir = tempdir().expect("dir");
    copy_fixtures(dir.path());
    fs::remove_file(dir.path().join("projects_alignment.json")).expect("remove");
    let source = DirectorySource::new(dir.path(), DatasetFiles::default());
    let err = DatasetStore::load(&source).expect_err("must fail");
    assert!(matches!(err, GrcError::Load(_)));
    assert_eq!(err.info().code, "grc_data.fetch");
    assert_eq!(
        err.info().context.get("dataset").map(String::as_str),
        Some("projects")
    );
}

#[test]
fn malformed_document_reports_the_dataset() {
    let dir = tempdir().expect("dir");
    copy_fixtures(dir.path());
    fs::write(dir.path().join("policies_catalog.json"), b"[{\"id\": 1").expect("write");
    let source = DirectorySource::new(dir.path(), DatasetFiles::default());
    let err = DatasetStore::load(&source).expect_err("must fail");
    assert!(matches!(err, GrcError::Serde(_)));
    assert_eq!(
        err.info().context.get("dataset").map(String::as_str),
        Some("policies")
    );
}

#[test]
fn unknown_enumeration_value_is_a_schema_error() {
    let governance = r#"[{
        "id": "GOV-1", "fecha": "2024-01-01", "area_ti": "Datos", "dominio_cobit": "Ejecutar",
        "maturity_cobit": 3, "riesgo": "extremo", "riesgo_score": 50, "nivel_riesgo_aceptado": 40,
        "controles_efectivos": 1, "controles_planeados": 2,
        "porc_politicas_institucionalizadas": 50, "porc_iniciativas_ti_alineadas": 50
    }]"#;
    let source = MemorySource::new()
        .with(DatasetKind::Governance, governance)
        .with(DatasetKind::Quality, "[]")
        .with(DatasetKind::Projects, "[]")
        .with(DatasetKind::Policies, "[]");
    let err = DatasetStore::load(&source).expect_err("unknown risk");
    assert!(matches!(err, GrcError::Serde(_)));
}

#[test]
fn memory_source_accepts_english_keys() {
    let governance = r#"[{
        "id": "GOV-1", "date": "2024-01-01", "it_area": "Datos", "cobit_domain": "Ejecutar",
        "maturity": 3, "risk": "high", "risk_score": 80, "accepted_risk": 40,
        "effective_controls": 1, "planned_controls": 2,
        "institutionalized_policies_pct": 50, "aligned_initiatives_pct": 60
    }]"#;
    let source = MemorySource::new()
        .with(DatasetKind::Governance, governance)
        .with(DatasetKind::Quality, "[]")
        .with(DatasetKind::Projects, "[]")
        .with(DatasetKind::Policies, "[]");
    let store = DatasetStore::load(&source).expect("load");
    assert_eq!(store.governance()[0].risk, RiskLevel::High);
    assert_eq!(store.governance()[0].priority, None);
    assert_eq!(store.len(DatasetKind::Quality), 0);
    assert!(!store.is_empty());
}

#[test]
fn unregistered_memory_dataset_fails() {
    let source = MemorySource::new().with(DatasetKind::Governance, "[]");
    let err = DatasetStore::load(&source).expect_err("missing quality");
    assert_eq!(
        err.info().context.get("dataset").map(String::as_str),
        Some("quality")
    );
}

#[test]
fn area_lookups_return_first_match() {
    let source = DirectorySource::new(fixture_dir(), DatasetFiles::default());
    let store = DatasetStore::load(&source).expect("load");
    assert_eq!(
        store.project_for_area("Seguridad").map(|p| p.id.as_str()),
        Some("PRY-002")
    );
    assert_eq!(
        store.policy_for_area("Datos").map(|p| p.id.as_str()),
        Some("POL-002")
    );
    assert!(store.policy_for_area("Legal").is_none());
}
