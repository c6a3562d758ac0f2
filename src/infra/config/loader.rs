use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::infra::{
    config::{file_config::FileConfig, AppConfig},
    error::AppError,
};

const LOCAL_CONFIG_PATH: &str = "termchat.toml";
const APP_DIR_NAME: &str = "termchat";
const DEBUG_LOG_FILE: &str = "debug.log";

pub fn load(path: Option<&Path>) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::default();

    let Some(config_path) = path.map(Path::to_path_buf).or_else(default_config_path) else {
        return Ok(config);
    };

    if !config_path.exists() {
        return Ok(config);
    }

    let raw = fs::read_to_string(&config_path).map_err(|source| AppError::ConfigRead {
        path: config_path.clone(),
        source,
    })?;

    let file_config: FileConfig = toml::from_str(&raw).map_err(|source| AppError::ConfigParse {
        path: config_path,
        source,
    })?;

    file_config.merge_into(&mut config);
    Ok(config)
}

/// Applies `NATS_URL`, `CHAT_NAME` and `DEBUG` on top of file values.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

    if let Some(url) = non_empty("NATS_URL") {
        config.bus.url = url;
    }

    if let Some(name) = non_empty("CHAT_NAME") {
        config.identity.name = name;
    }

    if non_empty("DEBUG").is_some() {
        config.logging.level = "debug".to_owned();
        if config.logging.file.is_none() {
            config.logging.file = Some(PathBuf::from(DEBUG_LOG_FILE));
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_PATH);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join("config.toml"))
}
