//! Persistence flow tests against a real temporary directory

use leakscope_core::inputs::RawInputs;
use leakscope_core::{compute_dashboard, project, store, DemoProfile};

#[test]
fn first_run_load_yields_sample_without_touching_disk() {
    let dir = tempfile::tempdir().unwrap();
    let dashboard = store::load(dir.path());
    assert_eq!(dashboard.business_name, "My Service Business");
    // Loading must not create the store directory.
    assert!(!dir.path().join(".leakscope").exists());
}

#[test]
fn saved_profile_survives_reload_and_projects() {
    let dir = tempfile::tempdir().unwrap();
    let dashboard = compute_dashboard(&DemoProfile::Struggling.inputs());
    store::save(dir.path(), &dashboard).unwrap();

    let loaded = store::load(dir.path());
    assert_eq!(loaded, dashboard);

    // Projection reads the reloaded bundle the same way it reads a fresh one.
    assert_eq!(project(&loaded), project(&dashboard));
}

#[test]
fn resave_overwrites_previous_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    store::save(dir.path(), &compute_dashboard(&DemoProfile::New.inputs())).unwrap();

    let mut inputs = RawInputs::default();
    inputs.business_name = "Second Save".to_string();
    store::save(dir.path(), &compute_dashboard(&inputs)).unwrap();

    let loaded = store::load(dir.path());
    assert_eq!(loaded.business_name, "Second Save");
}

#[test]
fn snapshot_on_disk_is_camel_case_json() {
    let dir = tempfile::tempdir().unwrap();
    store::save(dir.path(), &compute_dashboard(&RawInputs::default())).unwrap();

    let text = std::fs::read_to_string(store::store_path(dir.path())).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let obj = value.as_object().unwrap();
    assert!(obj.contains_key("revenueLeak"));
    assert!(obj.contains_key("totalRevenueLeak"));
    assert!(obj.contains_key("weeklySummary"));
}

#[test]
fn truncated_snapshot_falls_back_to_sample() {
    let dir = tempfile::tempdir().unwrap();
    store::save(dir.path(), &compute_dashboard(&DemoProfile::New.inputs())).unwrap();

    // Simulate a partially written file.
    let path = store::store_path(dir.path());
    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::write(&path, &text[..text.len() / 2]).unwrap();

    let loaded = store::load(dir.path());
    assert_eq!(loaded.business_name, "My Service Business");
}
