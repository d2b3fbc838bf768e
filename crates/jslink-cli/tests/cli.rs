//! End-to-end tests for the `jslink` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const X: &str = "/**\n * @module X\n * @requires Y\n * @export x.out.js\n */\nvar x = y + 1;\n";
const Y: &str = "/** @module Y */\nvar y = 1;\n";

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    for (rel, content) in files {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
        fs::write(path, content).expect("write fixture");
    }
    dir
}

fn jslink(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("jslink").expect("binary");
    cmd.current_dir(root).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn build_writes_bundle_and_prints_summary() {
    let dir = project(&[("src/x.js", X), ("src/y.js", Y)]);

    jslink(dir.path())
        .args(["build", "src"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "2 files, 2 modules processed for 1 export directive.",
        ));

    let bundle = fs::read_to_string(dir.path().join("out/x.out.js")).unwrap();
    assert_eq!(bundle, format!("{Y}{X}"));
}

#[test]
fn build_fails_on_orphans_unless_lenient() {
    let dir = project(&[("src/x.js", X)]);

    jslink(dir.path())
        .args(["build", "src"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("orphan module"))
        .stderr(predicate::str::contains("--no-strict"));
    assert!(!dir.path().join("out").exists());

    jslink(dir.path())
        .args(["build", "src", "--no-strict"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Orphan modules: Y"));
}

#[test]
fn build_refuses_to_overwrite() {
    let dir = project(&[("src/x.js", X), ("src/y.js", Y), ("dist/x.out.js", "old")]);

    jslink(dir.path())
        .args(["build", "src", "-d", "dist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--overwrite"));

    jslink(dir.path())
        .args(["build", "src", "-d", "dist", "--overwrite"])
        .assert()
        .success();
    assert_ne!(fs::read_to_string(dir.path().join("dist/x.out.js")).unwrap(), "old");
}

#[test]
fn dry_run_writes_only_export_map() {
    let dir = project(&[("src/x.js", X), ("src/y.js", Y)]);

    jslink(dir.path())
        .args(["build", "src", "--dry-run", "--export-map", "deps.dot"])
        .assert()
        .success();

    assert!(!dir.path().join("out").exists());
    let dot = fs::read_to_string(dir.path().join("deps.dot")).unwrap();
    assert!(dot.contains("\"Y\"->\"X\";"));
}

#[test]
fn config_file_supplies_sources() {
    let dir = project(&[
        ("src/x.js", X),
        ("src/y.js", Y),
        ("jslink.toml", "sources = [\"src\"]\ndestination = \"build\"\n"),
    ]);

    jslink(dir.path()).arg("build").assert().success();
    assert!(dir.path().join("build/x.out.js").exists());
}

#[test]
fn environment_overrides_config_file() {
    let dir = project(&[
        ("src/x.js", X),
        ("src/y.js", Y),
        ("jslink.toml", "sources = [\"src\"]\ndestination = \"build\"\n"),
    ]);

    jslink(dir.path())
        .arg("build")
        .env("JSLINK_DESTINATION", "from-env")
        .assert()
        .success();
    assert!(dir.path().join("from-env/x.out.js").exists());
    assert!(!dir.path().join("build").exists());
}

#[test]
fn missing_sources_are_reported() {
    let dir = project(&[]);

    jslink(dir.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no sources specified"));

    jslink(dir.path())
        .args(["check", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("source path not found"));
}

#[test]
fn check_prints_json_report() {
    let dir = project(&[("src/x.js", X), ("src/y.js", Y), ("src/notes.txt", "")]);

    let output = jslink(dir.path())
        .args(["check", "src", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["definedModules"], serde_json::json!(["X", "Y"]));
    assert_eq!(report["orphanModules"], serde_json::json!([]));
    assert_eq!(report["numberOfExports"], 1);
    assert_eq!(report["filesIgnored"], 1);
}

#[test]
fn check_lists_modules() {
    let dir = project(&[("src/x.js", X), ("src/y.js", Y)]);

    jslink(dir.path())
        .args(["check", "src"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 defined modules"))
        .stdout(predicate::str::contains("1 export directive"));
}

#[test]
fn graph_prints_digraph() {
    let dir = project(&[("src/x.js", X)]);

    jslink(dir.path())
        .args(["graph", "src"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph jslink {"))
        .stdout(predicate::str::contains("\"Y\"->\"X\";"));
}

#[test]
fn version_flag() {
    Command::cargo_bin("jslink")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("jslink"));
}
