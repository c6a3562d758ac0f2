use std::time::Duration;

use tracing_appender::non_blocking::WorkerGuard;

use crate::infra::config::AppConfig;

#[derive(Debug)]
pub struct AppContext {
    pub config: AppConfig,
    /// Keeps the file log writer alive until the context is dropped.
    _log_guard: Option<WorkerGuard>,
}

impl AppContext {
    pub fn new(config: AppConfig, log_guard: Option<WorkerGuard>) -> Self {
        Self {
            config,
            _log_guard: log_guard,
        }
    }

    pub fn drain_timeout(&self) -> Duration {
        Duration::from_millis(self.config.bus.drain_timeout_ms)
    }
}
