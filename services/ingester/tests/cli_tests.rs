//! Runs the ingester binary against generated input files.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use cube_store::RegionalStore;
use test_utils::RegionalCsv;

fn run_ingester(output: &Path, stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_ingester"))
        .arg("--output")
        .arg(output)
        .arg("--log-level")
        .arg("warn")
        .env_remove("CMIP6_STORE")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start ingester");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");

    child.wait_with_output().expect("Failed to wait for ingester")
}

#[test]
fn test_prints_store_name_on_success() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store_path = dir.path().join("CMIP6.zarr");
    let file = RegionalCsv::new("tas", "land", "CESM2", "ssp245")
        .ensemble("r1")
        .regions(&["world", "SAH"])
        .row("2015-01", &[12.3, 30.1])
        .row("2015-02", &[12.9, 31.0])
        .write_to(dir.path())
        .unwrap();

    let output = run_ingester(&store_path, &format!("{}\n", file.display()));

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        store_path.display().to_string()
    );

    let store = RegionalStore::open(&store_path).unwrap();
    assert_eq!(
        store
            .read_labeled("tas", "CESM2", "ssp245", "world", "land", "2015-01")
            .unwrap(),
        12.3
    );
    assert_eq!(
        store
            .read_labeled("tas", "CESM2", "ssp245", "SAH", "land", "2015-02")
            .unwrap(),
        31.0
    );
}

#[test]
fn test_failure_prints_nothing() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store_path = dir.path().join("CMIP6.zarr");

    let output = run_ingester(&store_path, "not/a_drs_path.csv\n");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(!output.stderr.is_empty());
}
