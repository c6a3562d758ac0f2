use std::path::PathBuf;

use serde::Deserialize;

use crate::infra::config::{AppConfig, BusConfig, IdentityConfig, LogConfig};

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub bus: Option<FileBusConfig>,
    pub identity: Option<FileIdentityConfig>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(bus) = self.bus {
            bus.merge_into(&mut config.bus);
        }

        if let Some(identity) = self.identity {
            identity.merge_into(&mut config.identity);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }

        if let Some(file) = self.file {
            config.file = Some(file);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileBusConfig {
    pub url: Option<String>,
    pub drain_timeout_ms: Option<u64>,
}

impl FileBusConfig {
    fn merge_into(self, config: &mut BusConfig) {
        if let Some(url) = self.url {
            config.url = url;
        }

        if let Some(timeout_ms) = self.drain_timeout_ms {
            config.drain_timeout_ms = timeout_ms;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileIdentityConfig {
    pub name: Option<String>,
}

impl FileIdentityConfig {
    fn merge_into(self, config: &mut IdentityConfig) {
        if let Some(name) = self.name {
            config.name = name;
        }
    }
}
