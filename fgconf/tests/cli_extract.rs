use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn path_as_str(path: &Path) -> &str {
    path.to_str().expect("path should be valid utf-8")
}

const TWO_INTERFACES: &str = r#"config system interface
    edit "internal"
        set ip 10.0.0.1
        set mode static
    next
    edit "external"
        set ip 20.0.0.1
    next
end
"#;

#[test]
fn extract_writes_interfaces_csv() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("fgfw.conf");
    let output = dir.path().join("interfaces.csv");
    fs::write(&input, TWO_INTERFACES).expect("write input");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fgconf"));
    cmd.arg("extract")
        .arg(path_as_str(&input))
        .arg("--output")
        .arg(path_as_str(&output))
        .assert()
        .success()
        .stdout(predicate::str::contains("records=2 fields=3"));

    let csv = fs::read_to_string(&output).expect("csv output");
    assert_eq!(
        csv,
        "\"name\",\"ip\",\"mode\"\n\"internal\",\"10.0.0.1\",\"static\"\n\"external\",\"20.0.0.1\",\"\"\n"
    );
}

#[test]
fn extract_defaults_output_name_per_section() {
    let dir = tempdir().expect("tempdir");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fgconf"));
    cmd.current_dir(dir.path())
        .arg("extract")
        .arg(fixture("fixtures/fgfw.conf"))
        .arg("--section")
        .arg("ippool")
        .assert()
        .success();

    let csv = fs::read_to_string(dir.path().join("ippools-out.csv")).expect("default output");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "\"name\",\"startip\",\"endip\",\"type\",\"comments\""
    );
    assert_eq!(lines.len(), 3);
}

#[test]
fn extract_vip_honors_newline_skip_header_and_delimiter() {
    let dir = tempdir().expect("tempdir");
    let output = dir.path().join("vip.csv");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fgconf"));
    cmd.arg("extract")
        .arg(fixture("fixtures/fgfw.conf"))
        .arg("--section")
        .arg("vip")
        .arg("-o")
        .arg(path_as_str(&output))
        .arg("-n")
        .arg("-s")
        .arg("--delimiter")
        .arg(";")
        .assert()
        .success();

    let csv = fs::read_to_string(&output).expect("csv output");
    assert_eq!(
        csv.lines().collect::<Vec<_>>(),
        vec![
            "\"web-server\";\"203.0.113.6\";\"wan1\";\"enable\";\"10.10.10.20\";\"443\";\"443\"",
            "",
            "\"mail-server\";\"203.0.113.7\";\"any\";\"\";\"10.10.10.25\";\"\";\"\"",
            "",
        ]
    );
}

#[test]
fn extract_with_no_records_writes_nothing() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("fgfw.conf");
    let output = dir.path().join("vip.csv");
    fs::write(&input, TWO_INTERFACES).expect("write input");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fgconf"));
    cmd.arg("extract")
        .arg(path_as_str(&input))
        .arg("--section")
        .arg("vip")
        .arg("--output")
        .arg(path_as_str(&output))
        .assert()
        .success()
        .stderr(predicate::str::contains("no vip records found"));

    assert!(!output.exists());
}

#[test]
fn extract_json_prints_records() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fgconf"));
    cmd.arg("extract")
        .arg(fixture("fixtures/fgfw.conf"))
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"records\""))
        .stdout(predicate::str::contains("\"name\": \"wan1\""))
        .stdout(predicate::str::contains("\"allowaccess\": \"ping https ssh http fgfm\""));
}

#[test]
fn extract_custom_marker() {
    let dir = tempdir().expect("tempdir");
    let output = dir.path().join("addresses.csv");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fgconf"));
    cmd.arg("extract")
        .arg(fixture("fixtures/fgfw.conf"))
        .arg("--marker")
        .arg("config firewall address")
        .arg("--output")
        .arg(path_as_str(&output))
        .assert()
        .success();

    let csv = fs::read_to_string(&output).expect("csv output");
    assert!(csv.starts_with("\"name\",\"uuid\"\n\"all\","));
}

#[test]
fn extract_section_from_sections_file() {
    let dir = tempdir().expect("tempdir");
    let catalogue = dir.path().join("sections.toml");
    fs::write(
        &catalogue,
        r#"
[[section]]
name = "address"
marker = "config firewall address"
output = "addresses-out.csv"
"#,
    )
    .expect("write catalogue");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fgconf"));
    cmd.current_dir(dir.path())
        .arg("extract")
        .arg(fixture("fixtures/fgfw.conf"))
        .arg("--section")
        .arg("address")
        .arg("--sections-file")
        .arg(path_as_str(&catalogue))
        .assert()
        .success();

    assert!(dir.path().join("addresses-out.csv").exists());
}

#[test]
fn extract_rejects_unknown_section() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fgconf"));
    cmd.arg("extract")
        .arg(fixture("fixtures/fgfw.conf"))
        .arg("--section")
        .arg("policy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown section 'policy'"));
}

#[test]
fn extract_missing_input_fails() {
    let dir = tempdir().expect("tempdir");
    let missing = dir.path().join("missing.conf");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fgconf"));
    cmd.arg("extract")
        .arg(path_as_str(&missing))
        .arg("--output")
        .arg(path_as_str(&dir.path().join("out.csv")))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn extract_refuses_to_overwrite_input() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("fgfw.conf");
    fs::write(&input, TWO_INTERFACES).expect("write input");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fgconf"));
    cmd.arg("extract")
        .arg(path_as_str(&input))
        .arg("--output")
        .arg(path_as_str(&input))
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to overwrite input file"));

    assert_eq!(fs::read_to_string(&input).expect("input intact"), TWO_INTERFACES);
}

#[test]
fn extract_refuses_input_spelled_through_parent_segments() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("fgfw.conf");
    fs::write(&input, TWO_INTERFACES).expect("write input");
    let disguised = dir.path().join("not-created").join("..").join("fgfw.conf");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fgconf"));
    cmd.arg("extract")
        .arg(path_as_str(&input))
        .arg("-o")
        .arg(path_as_str(&disguised))
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to overwrite input file"));

    assert_eq!(fs::read_to_string(&input).expect("input intact"), TWO_INTERFACES);
}

#[test]
fn extract_text_lists_records() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fgconf"));
    cmd.arg("extract")
        .arg(fixture("fixtures/fgfw.conf"))
        .arg("--format")
        .arg("text")
        .assert()
        .success()
        .stdout(predicate::str::contains("- wan1\n  vdom: root"))
        .stdout(predicate::str::contains("  alias: uplink"))
        .stdout(predicate::str::contains("- dmz"));
}
