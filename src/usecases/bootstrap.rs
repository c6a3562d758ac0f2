use std::{
    path::Path,
    sync::mpsc::{self, Sender},
};

use crate::{
    bus::{BusError, NatsBus},
    domain::events::AppEvent,
    infra::{
        self,
        config::{AppConfig, FileConfigAdapter},
        contracts::ConfigAdapter,
        error::AppError,
    },
    ui::ChannelEventSource,
    usecases::{
        context::AppContext,
        contracts::{CHAT_TOPIC, USER_TOPIC},
        session::DefaultSessionController,
    },
};

/// Values given on the command line; they win over file and environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigOverrides<'a> {
    pub config_path: Option<&'a Path>,
    pub url: Option<&'a str>,
    pub name: Option<&'a str>,
}

/// Everything the shell loop needs once the bus is connected.
pub struct Session {
    pub inbound_tx: Sender<AppEvent>,
    pub event_source: ChannelEventSource,
    pub controller: DefaultSessionController,
    pub bus: NatsBus,
}

pub fn bootstrap(overrides: ConfigOverrides<'_>) -> Result<AppContext, AppError> {
    let config = build_config(overrides)?;
    let log_guard = infra::logging::init(&config.logging)?;

    Ok(AppContext::new(config, log_guard))
}

fn build_config(overrides: ConfigOverrides<'_>) -> Result<AppConfig, AppError> {
    let config_adapter = FileConfigAdapter::new(overrides.config_path);
    build_config_with(&config_adapter, overrides)
}

fn build_config_with(
    adapter: &dyn ConfigAdapter,
    overrides: ConfigOverrides<'_>,
) -> Result<AppConfig, AppError> {
    let mut config = adapter
        .load()
        .map_err(|error| error.downcast::<AppError>().unwrap_or_else(AppError::Other))?;
    apply_cli_overrides(&mut config, overrides);

    Ok(config)
}

fn apply_cli_overrides(config: &mut AppConfig, overrides: ConfigOverrides<'_>) {
    if let Some(url) = overrides.url {
        config.bus.url = url.to_owned();
    }

    if let Some(name) = overrides.name {
        config.identity.name = name.to_owned();
    }
}

/// Connects and subscribes before the event loop starts; any failure here
/// aborts the process.
pub fn compose_session(context: &AppContext) -> Result<Session, BusError> {
    let (inbound_tx, inbound_rx) = mpsc::channel();

    let mut bus = NatsBus::connect(&context.config.bus.url, inbound_tx.clone())?;
    bus.subscribe(CHAT_TOPIC)?;
    bus.subscribe(USER_TOPIC)?;

    Ok(Session {
        inbound_tx,
        event_source: ChannelEventSource::new(inbound_rx),
        controller: DefaultSessionController::initialize(context.config.identity.name.clone()),
        bus,
    })
}
