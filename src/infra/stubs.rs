use std::{cell::RefCell, time::Duration};

use anyhow::Result;

use crate::{
    bus::BusError,
    infra::{config::AppConfig, contracts::ConfigAdapter},
    usecases::contracts::{MessageBus, Publication},
};

#[derive(Debug, Clone, Default)]
pub struct StubConfigAdapter;

impl ConfigAdapter for StubConfigAdapter {
    fn load(&self) -> Result<AppConfig> {
        Ok(AppConfig::default())
    }
}

/// Bus double that records every call as a short human-readable line.
#[derive(Debug, Default)]
pub struct RecordingBus {
    log: RefCell<Vec<String>>,
    fail_publish: bool,
    fail_drain: bool,
}

impl MessageBus for RecordingBus {
    fn publish(&self, publication: &Publication) -> Result<(), BusError> {
        if self.fail_publish {
            return Err(BusError::Closed);
        }

        let line = match publication {
            Publication::Chat(message) => format!(
                "publish {} {}",
                publication.topic(),
                message.transcript_text()
            ),
            Publication::Presence(event) => format!(
                "publish {} {}={}",
                publication.topic(),
                event.user_name,
                event.logged_in
            ),
        };
        self.log.borrow_mut().push(line);
        Ok(())
    }

    fn drain(&mut self, _timeout: Duration) -> Result<(), BusError> {
        self.log.get_mut().push("drain".to_owned());
        if self.fail_drain {
            return Err(BusError::DrainTimeout);
        }
        Ok(())
    }
}

impl RecordingBus {
    pub fn failing_publish() -> Self {
        Self {
            fail_publish: true,
            ..Self::default()
        }
    }

    pub fn failing_drain() -> Self {
        Self {
            fail_drain: true,
            ..Self::default()
        }
    }

    pub fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_config_returns_defaults() {
        let adapter = StubConfigAdapter;
        let config = adapter.load().expect("stub config must load");

        assert_eq!(config, AppConfig::default());
    }
}
