//! Integration tests for assoc_runtime.
//!
//! Temporary directories come from `tempfile` and are removed on drop.

use std::fs;
use std::path::PathBuf;
use std::thread;

use assoc_graph::hashing::fingerprint;
use assoc_graph::invariants::try_validate_invariants;
use assoc_graph::{Association, GraphError};
use pretty_assertions::assert_eq;

use assoc_runtime::config::IngestConfig;
use assoc_runtime::dictionary::{build_graph, dictionary_hash, export_to_file, Selection};
use assoc_runtime::error::IngestError;
use assoc_runtime::ingest::{build_dictionary, AssociationDictionary};
use assoc_runtime::shared::SharedGraph;
use assoc_runtime::sheet::read_rows_from_file;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("associations.tsv")
}

fn load_fixture() -> AssociationDictionary {
    let config = IngestConfig::default();
    let rows = read_rows_from_file(&fixture_path(), config.delimiter)
        .expect("Failed to read fixture sheet");
    build_dictionary(&rows, &config).expect("Failed to ingest fixture sheet")
}

// ─────────────────────────────────────────────────────────────
// Ingestion
// ─────────────────────────────────────────────────────────────

#[test]
fn fixture_ingests_every_entry() {
    let dict = load_fixture();
    let incentives: Vec<&str> = dict.iter().map(|e| e.incentive.as_str()).collect();
    assert_eq!(incentives, vec!["house", "sun", "river", "forest", "night"]);

    let house = dict.get("house").unwrap();
    assert_eq!(house.male.as_ref().unwrap().summary, "12");
    assert_eq!(house.male.as_ref().unwrap().reactions.len(), 3);
    assert_eq!(house.female.as_ref().unwrap().reactions.len(), 3);

    assert!(dict.get("river").unwrap().female.is_none());
    assert!(dict.get("night").unwrap().male.is_none());
}

// ─────────────────────────────────────────────────────────────
// Export
// ─────────────────────────────────────────────────────────────

#[test]
fn export_writes_readable_json() {
    let dict = load_fixture();
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("nested").join("dictionary.json");

    export_to_file(&dict, &path).expect("export");
    let text = fs::read_to_string(&path).expect("read back");

    let value: serde_json::Value = serde_json::from_str(&text).expect("valid JSON");
    assert_eq!(value["forest"]["female"]["reactions"][1][0], "glade");
    assert_eq!(value["forest"]["female"]["summary"], "6");
    assert!(value["river"]["female"].is_null());

    let digest = sha2_hex(text.as_bytes());
    assert_eq!(digest, dictionary_hash(&dict).unwrap());
}

fn sha2_hex(bytes: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

// ─────────────────────────────────────────────────────────────
// Graph building
// ─────────────────────────────────────────────────────────────

#[test]
fn both_groups_build_full_graph() {
    let graph = build_graph(&load_fixture(), Selection::Both).unwrap();
    assert_eq!(graph.shape(), (5, 15));
    assert_eq!(try_validate_invariants(&graph), Ok(()));

    assert_eq!(
        graph.lookup("house").unwrap(),
        vec![
            Association::new("home", 7),
            Association::new("building", 4),
            Association::new("roof", 3),
            Association::new("cottage", 3),
            Association::new("hut", 4),
        ]
    );
    assert_eq!(
        graph.lookup_reverse("darkness").unwrap(),
        vec![Association::new("night", 5)]
    );
}

#[test]
fn single_gender_graphs_skip_missing_groups() {
    let dict = load_fixture();

    let male = build_graph(&dict, Selection::Male).unwrap();
    assert_eq!(male.shape(), (4, 8));
    assert!(!male.contains_incentive("night"));

    let female = build_graph(&dict, Selection::Female).unwrap();
    assert_eq!(female.shape(), (4, 8));
    assert!(matches!(
        female.lookup("river"),
        Err(GraphError::UnknownIncentive(_))
    ));
    assert_eq!(female.count("house", "home").unwrap(), 2);
}

#[test]
fn rebuild_from_sheet_is_deterministic() {
    let h1 = fingerprint(&build_graph(&load_fixture(), Selection::Both).unwrap());
    let h2 = fingerprint(&build_graph(&load_fixture(), Selection::Both).unwrap());
    assert_eq!(h1, h2, "two ingestions of the same sheet diverged");
}

// ─────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────

#[test]
fn config_file_overrides_layout() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config_path = dir.path().join("ingest.json");
    fs::write(&config_path, r#"{ "delimiter": ";" }"#).unwrap();
    let config = IngestConfig::from_json_file(&config_path).unwrap();

    let sheet_path = dir.path().join("sheet.csv");
    fs::write(&sheet_path, "cat;dog;3;3\n;mouse;2\n").unwrap();
    let rows = read_rows_from_file(&sheet_path, config.delimiter).unwrap();
    let dict = build_dictionary(&rows, &config).unwrap();
    let graph = build_graph(&dict, Selection::Male).unwrap();

    assert_eq!(
        graph.lookup("cat").unwrap(),
        vec![Association::new("dog", 3), Association::new("mouse", 2)]
    );
}

#[test]
fn missing_config_file_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = IngestConfig::from_json_file(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, IngestError::Io(_)));
}

// ─────────────────────────────────────────────────────────────
// Shared access
// ─────────────────────────────────────────────────────────────

#[test]
fn shared_graph_readers_see_consistent_shapes() {
    let base = build_graph(&load_fixture(), Selection::Both).unwrap();
    let (base_rows, base_cols) = base.shape();
    let shared = SharedGraph::new(base);

    thread::scope(|s| {
        s.spawn(|| {
            for i in 0..50 {
                shared
                    .add(format!("w{}", i), [(format!("r{}", i), 1), ("home".to_string(), 2)])
                    .unwrap();
            }
        });
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..50 {
                    let snapshot = shared.snapshot();
                    assert_eq!(try_validate_invariants(&snapshot), Ok(()));
                    let (rows, cols) = snapshot.shape();
                    assert_eq!(rows - base_rows, cols - base_cols);
                    assert_eq!(shared.count("house", "home").unwrap(), 7);
                }
            });
        }
    });

    assert_eq!(shared.shape(), (base_rows + 50, base_cols + 50));
    assert_eq!(shared.lookup_reverse("home").unwrap().len(), 51);
    assert_eq!(
        shared.add("w0", [("x".to_string(), 1)]),
        Err(GraphError::DuplicateIncentive("w0".to_string()))
    );
}
