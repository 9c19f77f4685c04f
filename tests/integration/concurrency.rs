//! Many threads sharing one resolver.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use tiercache::config::CacheConfig;
use tiercache::schema::{ConfigLoader, ConfigScope, FormatterConfig, SystemFlags};
use tiercache::templating::{Substitutions, TemplateCache, TemplateError};

use crate::common::Project;

/// Declares no dependency, recording how many loads overlap in time.
#[derive(Default)]
struct OverlapRecorder {
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: AtomicUsize,
}

impl ConfigLoader for OverlapRecorder {
    fn load(&self, _dir: &Path, _scope: ConfigScope<'_>) -> Result<FormatterConfig, TemplateError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(10));
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(FormatterConfig::default())
    }
}

#[test]
fn test_one_resolution_at_a_time() {
    let project = Project::new();
    project.fixture.write(&project.root_dir, "view.xsl", "<view/>").unwrap();

    let recorder = Arc::new(OverlapRecorder::default());
    let templates = TemplateCache::new(
        &CacheConfig::default(),
        Arc::new(SystemFlags::new(false)),
        Arc::new(project.fixture.registry()),
    )
    .unwrap()
    .with_config_loader(recorder.clone());

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..3 {
                    let result = templates
                        .create_file_result(
                            &project.formatter_dir,
                            Some(&project.schema_dir),
                            &project.root_dir,
                            "view.xsl",
                            Substitutions::new(),
                        )
                        .unwrap();
                    assert_eq!(result.template(), "<view/>");
                }
            });
        }
    });

    // Every resolution walks the parent chain, even when the root tier is cached.
    assert_eq!(recorder.calls.load(Ordering::SeqCst), 24);
    assert_eq!(recorder.max_in_flight.load(Ordering::SeqCst), 1);
}

#[test]
fn test_parallel_resolutions_agree() {
    let project = Project::new();
    let names: Vec<String> = (0..16).map(|i| format!("t{i}.xml")).collect();
    for (i, name) in names.iter().enumerate() {
        let dir = if i % 2 == 0 { &project.formatter_dir } else { &project.root_dir };
        project.fixture.write(dir, name, &format!("<t{i}/>")).unwrap();
    }

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..4 {
                    for (i, name) in names.iter().enumerate() {
                        let result = project.resolve(name).unwrap();
                        assert_eq!(result.template(), format!("<t{i}/>"));
                    }
                }
            });
        }
    });

    let cache = project.templates.cache();
    assert_eq!(cache.len(), names.len() as u64);
    assert!(cache.stats().hits >= (8 * 4 - 1) * names.len() as u64);
}

#[test]
fn test_dev_mode_toggle_under_load() {
    let project = Project::new();
    project.fixture.write(&project.formatter_dir, "view.xsl", "<view/>").unwrap();

    thread::scope(|scope| {
        scope.spawn(|| {
            for i in 0..50 {
                project.set_dev_mode(i % 2 == 0);
            }
        });
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..25 {
                    assert_eq!(project.resolve("view.xsl").unwrap().template(), "<view/>");
                }
            });
        }
    });

    assert_eq!(project.templates.cache().len(), 1);
}
