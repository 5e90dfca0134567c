use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[allow(deprecated)]
fn aquasite(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("aquasite").expect("binary");
    cmd.current_dir(workdir)
        .env_remove("AQUASITE_CMS_URL")
        .env_remove("AQUASITE_CMS_TOKEN")
        .env_remove("AQUASITE_LANG")
        .env_remove("AQUASITE_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn run_json(workdir: &Path, args: &[&str]) -> (bool, Value) {
    let output = aquasite(workdir).args(args).output().expect("command run");
    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    (output.status.success(), body)
}

fn slugs(body: &Value) -> Vec<String> {
    body["projects"]
        .as_array()
        .expect("projects array")
        .iter()
        .map(|p| p["slug"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn status_filter_narrows_listing() {
    let temp = tempdir().unwrap();
    let file = fixture("projects.json");
    let (ok, body) = run_json(
        temp.path(),
        &["--from-file", file.to_str().unwrap(), "projects", "--status", "Operational", "--json"],
    );
    assert!(ok, "{body}");
    assert_eq!(body["status"], "ok");
    assert_eq!(slugs(&body), vec!["lagos-ras"]);
    assert_eq!(body["total"], 3);
    assert_eq!(body["selection"]["status"], "Operational");
    assert_eq!(body["selection"]["species"], "All Species");
}

#[test]
fn species_filter_is_case_insensitive() {
    let temp = tempdir().unwrap();
    let file = fixture("projects.json");
    let (ok, body) = run_json(
        temp.path(),
        &["--from-file", file.to_str().unwrap(), "projects", "--species", "shrimp", "--json"],
    );
    assert!(ok);
    assert_eq!(slugs(&body), vec!["lagos-ras", "hanoi-biofloc"]);
}

#[test]
fn no_filters_lists_everything_in_source_order() {
    let temp = tempdir().unwrap();
    let file = fixture("projects.json");
    let (ok, body) = run_json(temp.path(), &["--from-file", file.to_str().unwrap(), "projects", "--json"]);
    assert!(ok);
    assert_eq!(slugs(&body), vec!["lagos-ras", "hanoi-biofloc", "sturgeon-concept"]);
    assert_eq!(body["empty"], false);
    assert_eq!(body["message"], Value::Null);
}

#[test]
fn region_filter_excludes_records_without_location() {
    let temp = tempdir().unwrap();
    let file = fixture("projects.json");
    let (ok, body) = run_json(
        temp.path(),
        &[
            "--from-file",
            file.to_str().unwrap(),
            "projects",
            "--region",
            "Nigeria",
            "--species",
            "Sturgeon",
            "--json",
        ],
    );
    assert!(ok, "an empty result is not a failure");
    assert_eq!(body["count"], 0);
    assert_eq!(body["empty"], true);
    assert_eq!(body["resetOffered"], true);
    assert_eq!(body["message"], "No projects match the selected filters.");
}

#[test]
fn empty_catalog_is_reported_as_no_projects() {
    let temp = tempdir().unwrap();
    let file = fixture("empty.json");
    let (ok, body) = run_json(temp.path(), &["--from-file", file.to_str().unwrap(), "projects", "--json"]);
    assert!(ok);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["resetOffered"], false);
    assert_eq!(body["message"], "No projects have been published yet.");
}

#[test]
fn failed_load_is_an_error_not_an_empty_listing() {
    let temp = tempdir().unwrap();
    let (ok, body) = run_json(
        temp.path(),
        &["--from-file", "missing.json", "projects", "--json"],
    );
    assert!(!ok);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Projects could not be loaded. Please try again later.");
    assert!(body.get("projects").is_none());
}

#[test]
fn facets_are_derived_from_listing() {
    let temp = tempdir().unwrap();
    let file = fixture("projects.json");
    let (ok, body) = run_json(temp.path(), &["--from-file", file.to_str().unwrap(), "facets", "--json"]);
    assert!(ok);
    assert_eq!(
        body["facets"]["regions"],
        serde_json::json!(["Nigeria", "Vietnam"])
    );
    assert_eq!(
        body["facets"]["species"],
        serde_json::json!(["Shrimp", "Sturgeon", "Tilapia", "Trout"])
    );
    assert_eq!(body["facets"]["systemTypes"][3], "Flow-through");
}

#[test]
fn ukrainian_listing_uses_ukrainian_labels() {
    let temp = tempdir().unwrap();
    let file = fixture("projects.json");
    aquasite(temp.path())
        .args(["--from-file", file.to_str().unwrap(), "--lang", "uk", "projects"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 проєкт"))
        .stdout(predicate::str::contains("Діючий | УЗВ"))
        .stdout(predicate::str::contains("ferma-lagos"));
}

#[test]
fn text_empty_state_offers_reset() {
    let temp = tempdir().unwrap();
    let file = fixture("projects.json");
    aquasite(temp.path())
        .args(["--from-file", file.to_str().unwrap(), "projects", "--region", "Chile"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No projects match the selected filters."))
        .stdout(predicate::str::contains("Reset filters"));
}

#[test]
fn project_detail_by_slug() {
    let temp = tempdir().unwrap();
    let file = fixture("projects.json");
    aquasite(temp.path())
        .args(["--from-file", file.to_str().unwrap(), "project", "lagos-ras"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lagos RAS Farm"))
        .stdout(predicate::str::contains("Recirculating tilapia & shrimp farm."))
        .stdout(predicate::str::contains("Capital expenditure: 1 200 000 USD"))
        .stdout(predicate::str::contains("ROI: 18.50%"));
}

#[test]
fn unknown_slug_fails() {
    let temp = tempdir().unwrap();
    let file = fixture("projects.json");
    let (ok, body) = run_json(
        temp.path(),
        &["--from-file", file.to_str().unwrap(), "project", "nowhere", "--json"],
    );
    assert!(!ok);
    assert_eq!(body["message"], "Project not found");
}

#[test]
fn invalid_status_is_rejected() {
    let temp = tempdir().unwrap();
    let file = fixture("projects.json");
    aquasite(temp.path())
        .args(["--from-file", file.to_str().unwrap(), "projects", "--status", "Dormant"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --status"));
}

#[test]
fn config_file_supplies_source_and_language() {
    let temp = tempdir().unwrap();
    fs::copy(fixture("projects.json"), temp.path().join("export.json")).unwrap();
    fs::write(
        temp.path().join("aquasite.toml"),
        "[cms]\nexport = \"export.json\"\n\n[site]\nlanguage = \"uk\"\n",
    )
    .unwrap();

    let (ok, body) = run_json(temp.path(), &["projects", "--json"]);
    assert!(ok, "{body}");
    assert_eq!(body["language"], "uk");
    assert_eq!(slugs(&body), vec!["ferma-lagos"]);
}

#[test]
fn missing_source_configuration_fails() {
    let temp = tempdir().unwrap();
    aquasite(temp.path())
        .args(["projects"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No project source configured"));
}
