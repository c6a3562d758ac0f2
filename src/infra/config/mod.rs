mod adapter;
mod app_config;
mod file_config;
mod loader;

pub use adapter::FileConfigAdapter;
pub use app_config::{AppConfig, BusConfig, IdentityConfig, LogConfig};
pub use loader::{apply_env_overrides, load};
