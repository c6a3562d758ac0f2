use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::infra::{
    config::{apply_env_overrides, load, AppConfig},
    contracts::ConfigAdapter,
};

/// Loads defaults, then the TOML file, then environment overrides.
#[derive(Debug, Clone, Default)]
pub struct FileConfigAdapter {
    path: Option<PathBuf>,
}

impl FileConfigAdapter {
    pub fn new(path: Option<&Path>) -> Self {
        Self {
            path: path.map(Path::to_path_buf),
        }
    }
}

impl ConfigAdapter for FileConfigAdapter {
    fn load(&self) -> Result<AppConfig> {
        let mut config = load(self.path.as_deref())?;
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        Ok(config)
    }
}
