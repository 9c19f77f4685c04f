//! Weight-bounded eviction observed through resolution.

use std::fs;

use tiercache::cache::WeightedCache;
use tiercache::config::CacheConfig;
use tiercache::utils::canonical_path;

use crate::common::Project;

fn small_project() -> Project {
    // 2 KB -> capacity 256, one segment
    Project::with_config(CacheConfig {
        max_size_kb: 2,
        concurrency_level: 1,
    })
}

#[test]
fn test_evicted_template_is_read_from_disk_again() {
    let project = small_project();
    assert_eq!(project.templates.cache().capacity(), 256);

    let body = "x".repeat(100);
    let a = project.fixture.write(&project.formatter_dir, "a.xml", &body).unwrap();
    project.fixture.write(&project.formatter_dir, "b.xml", &body).unwrap();

    project.resolve("a.xml").unwrap();
    project.resolve("b.xml").unwrap();

    let cache = project.templates.cache();
    assert_eq!(cache.len(), 1);
    assert!(cache.total_weight() <= cache.capacity());
    assert_eq!(cache.stats().evictions, 1);

    fs::write(&a, "fresh").unwrap();
    assert_eq!(project.resolve("a.xml").unwrap().template(), "fresh");
}

#[test]
fn test_recently_used_template_survives() {
    // 4 KB -> capacity 512; every entry weighs 220, so two fit and a third evicts.
    let project = Project::with_config(CacheConfig {
        max_size_kb: 4,
        concurrency_level: 1,
    });
    let keys: Vec<String> = ["a.xml", "b.xml", "c.xml"]
        .iter()
        .map(|name| {
            let key = canonical_path(&project.formatter_dir.join(name)).unwrap();
            key.display().to_string()
        })
        .collect();
    for (name, key) in ["a.xml", "b.xml", "c.xml"].iter().zip(&keys) {
        let body = "x".repeat(220 - key.chars().count());
        project.fixture.write(&project.formatter_dir, name, &body).unwrap();
        assert_eq!(WeightedCache::weigh(key, &body), 220);
    }

    let cache = project.templates.cache();
    for name in ["a.xml", "b.xml", "a.xml", "c.xml"] {
        project.resolve(name).unwrap();
        cache.run_pending_tasks();
    }

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.total_weight(), 440);
    assert!(cache.contains_key(&keys[0]));
    assert!(!cache.contains_key(&keys[1]));
    assert!(cache.contains_key(&keys[2]));
}
