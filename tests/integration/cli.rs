//! Tests for the `tiercache` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tiercache::constants::CONFIG_PATH_ENV;
use tiercache::test_utils::FormatterFixture;

fn tiercache() -> Command {
    let mut cmd = Command::cargo_bin("tiercache").unwrap();
    cmd.env_remove(CONFIG_PATH_ENV).env_remove("RUST_LOG");
    cmd
}

fn fixture_with_view() -> FormatterFixture {
    let fixture = FormatterFixture::new().unwrap();
    let schema_dir = fixture.add_schema("iso19139", None).unwrap();
    let formatter_dir = fixture.add_formatter("iso19139", "xsl-view", None).unwrap();
    fixture.write(&formatter_dir, "view.xsl", "<view/>\n").unwrap();
    fixture.write(&schema_dir, "layout.xsl", "<layout/>\n").unwrap();
    fixture.write(&fixture.root_formatter_dir(), "header.html", "<header/>\n").unwrap();
    fixture
}

fn resolve(fixture: &FormatterFixture) -> Command {
    let mut cmd = tiercache();
    cmd.arg("resolve")
        .arg("--formatter-dir")
        .arg(fixture.formatter_dir("iso19139", "xsl-view"))
        .arg("--schema-dir")
        .arg(fixture.schema_formatter_dir("iso19139"))
        .arg("--root-formatter-dir")
        .arg(fixture.root_formatter_dir());
    cmd
}

#[test]
fn test_resolve_prints_content_from_each_tier() {
    let fixture = fixture_with_view();

    resolve(&fixture)
        .args(["view.xsl", "layout.xsl", "header.html"])
        .assert()
        .success()
        .stdout("<view/>\n<layout/>\n<header/>\n");
}

#[test]
fn test_resolve_stats_show_cache_hits() {
    let fixture = fixture_with_view();

    resolve(&fixture)
        .args(["--stats", "view.xsl", "view.xsl"])
        .assert()
        .success()
        .stdout("<view/>\n<view/>\n")
        .stderr(predicate::str::contains("cache: hits=1"))
        .stderr(predicate::str::contains("entries=1"));
}

#[test]
fn test_resolve_json_output() {
    let fixture = fixture_with_view();

    let output = resolve(&fixture)
        .args(["--format", "json", "--stats", "--var", "lang=eng", "view.xsl"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let result = &json["results"][0];
    assert_eq!(result["template"], "<view/>\n");
    assert_eq!(result["substitutions"]["lang"], "eng");
    assert!(result["file"].as_str().unwrap().ends_with("view.xsl"));
    assert_eq!(json["stats"]["entries"], 1);
    assert_eq!(json["stats"]["capacity"], 12_800_000);
}

#[test]
fn test_resolve_missing_template_fails() {
    let fixture = fixture_with_view();

    resolve(&fixture)
        .arg("missing.xsl")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to resolve template 'missing.xsl'"))
        .stderr(predicate::str::contains("There is no file: missing.xsl in any of:"));
}

#[test]
fn test_resolve_follows_parent_schema_from_settings() {
    let fixture = fixture_with_view();
    let schema_dir = fixture.schema_formatter_dir("iso19139");
    fixture.declare_dependency(&schema_dir, "iso19115-3").unwrap();
    let parent_dir = fixture.add_schema("iso19115-3", None).unwrap();
    fixture.write(&parent_dir, "common.xsl", "<common/>\n").unwrap();

    let settings = fixture
        .write(fixture.path(), "tiercache.toml", "schema_plugins_dir = \"schemas\"\n")
        .unwrap();

    resolve(&fixture)
        .env(CONFIG_PATH_ENV, &settings)
        .arg("common.xsl")
        .assert()
        .success()
        .stdout("<common/>\n");
}

#[test]
fn test_check_config_defaults() {
    tiercache()
        .arg("check-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("max_size_kb = 100000"))
        .stdout(predicate::str::contains("capacity = 12800000"))
        .stdout(predicate::str::contains("segments = 4"));
}

#[test]
fn test_check_config_rejects_zero_size() {
    tiercache()
        .args(["check-config", "--max-size-kb", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("maxSizeKB is too small: 0"));
}

#[test]
fn test_check_config_rejects_oversized() {
    tiercache()
        .args(["check-config", "--max-size-kb", "16777216"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "maxSizeKB is too large: 16777216 max allowed value is: 16777215",
        ));
}

#[test]
fn test_check_config_reads_settings_file() {
    let fixture = FormatterFixture::new().unwrap();
    let settings = fixture
        .write(fixture.path(), "tiercache.toml", "[cache]\nmax_size_kb = 1\nconcurrency_level = 1\n")
        .unwrap();

    tiercache()
        .arg("--config")
        .arg(&settings)
        .arg("check-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("capacity = 128"))
        .stdout(predicate::str::contains("segments = 1"));
}

#[test]
fn test_invalid_settings_file_fails() {
    let fixture = FormatterFixture::new().unwrap();
    let settings = fixture.write(fixture.path(), "tiercache.toml", "[cache\n").unwrap();

    tiercache()
        .env(CONFIG_PATH_ENV, &settings)
        .arg("check-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}
