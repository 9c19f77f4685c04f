//! Shared helpers for the integration suite.

use std::path::PathBuf;
use std::sync::Arc;

use tiercache::config::CacheConfig;
use tiercache::schema::SystemFlags;
use tiercache::templating::{FileResult, Substitutions, TemplateCache, TemplateError};
use tiercache::test_utils::{FormatterFixture, init_test_logging};

/// Schema `iso19139` with formatter `xsl-view`, plus handles on every tier.
pub struct Project {
    pub fixture: FormatterFixture,
    pub flags: Arc<SystemFlags>,
    pub templates: TemplateCache,
    pub formatter_dir: PathBuf,
    pub schema_dir: PathBuf,
    pub root_dir: PathBuf,
}

impl Project {
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    pub fn with_config(config: CacheConfig) -> Self {
        init_test_logging(None);

        let fixture = FormatterFixture::new().unwrap();
        let schema_dir = fixture.add_schema("iso19139", None).unwrap();
        let formatter_dir = fixture.add_formatter("iso19139", "xsl-view", None).unwrap();
        let root_dir = fixture.root_formatter_dir();

        let flags = Arc::new(SystemFlags::new(false));
        let templates =
            TemplateCache::new(&config, flags.clone(), Arc::new(fixture.registry())).unwrap();

        Self {
            fixture,
            flags,
            templates,
            formatter_dir,
            schema_dir,
            root_dir,
        }
    }

    pub fn resolve(&self, path: &str) -> Result<FileResult, TemplateError> {
        self.templates.create_file_result(
            &self.formatter_dir,
            Some(&self.schema_dir),
            &self.root_dir,
            path,
            Substitutions::new(),
        )
    }

    pub fn set_dev_mode(&self, dev_mode: bool) {
        self.flags.set_dev_mode(dev_mode);
    }
}
