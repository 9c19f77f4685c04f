//! Development mode: cache reads are skipped, writes still happen.

use std::fs;

use crate::common::Project;

#[test]
fn test_dev_mode_sees_every_edit() {
    let project = Project::new();
    project.set_dev_mode(true);
    let file = project.fixture.write(&project.formatter_dir, "view.xsl", "v1").unwrap();

    assert_eq!(project.resolve("view.xsl").unwrap().template(), "v1");
    fs::write(&file, "v2").unwrap();
    assert_eq!(project.resolve("view.xsl").unwrap().template(), "v2");

    let stats = project.templates.cache().stats();
    assert_eq!(stats.hits, 0);
    assert_eq!(stats.misses, 0);
}

#[test]
fn test_dev_mode_refreshes_entry_for_later_cached_reads() {
    let project = Project::new();
    let file = project.fixture.write(&project.formatter_dir, "view.xsl", "v1").unwrap();
    assert_eq!(project.resolve("view.xsl").unwrap().template(), "v1");

    fs::write(&file, "v2").unwrap();
    project.set_dev_mode(true);
    assert_eq!(project.resolve("view.xsl").unwrap().template(), "v2");

    // Back in production mode the refreshed entry is served even after the
    // file disappears.
    fs::remove_file(&file).unwrap();
    project.set_dev_mode(false);
    assert_eq!(project.resolve("view.xsl").unwrap().template(), "v2");
    assert_eq!(project.templates.cache().len(), 1);
}

#[test]
fn test_switching_modes_between_tiers() {
    let project = Project::new();
    let formatter_file = project.fixture.write(&project.formatter_dir, "a.xml", "<A/>").unwrap();
    project.fixture.write(&project.schema_dir, "a.xml", "<B/>").unwrap();

    let first = project.resolve("a.xml").unwrap();
    assert_eq!(first.template(), "<A/>");
    assert_eq!(first.file(), formatter_file);

    fs::remove_file(&formatter_file).unwrap();

    let cached = project.resolve("a.xml").unwrap();
    assert_eq!(cached.template(), "<A/>");
    assert_eq!(cached.file(), formatter_file);

    project.set_dev_mode(true);
    let fresh = project.resolve("a.xml").unwrap();
    assert_eq!(fresh.template(), "<B/>");
    assert_eq!(fresh.file(), project.schema_dir.join("a.xml"));
}

#[test]
fn test_dev_mode_reports_missing_file_despite_cache() {
    let project = Project::new();
    let file = project.fixture.write(&project.root_dir, "view.xsl", "root").unwrap();
    project.resolve("view.xsl").unwrap();
    fs::remove_file(&file).unwrap();

    project.set_dev_mode(true);
    let err = project.resolve("view.xsl").unwrap_err();
    assert!(err.is_not_found());
}
