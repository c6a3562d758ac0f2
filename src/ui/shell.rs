use std::{sync::mpsc::Sender, time::Duration};

use anyhow::Result;

use crate::{
    domain::{events::AppEvent, session_state::SessionState},
    usecases::{
        context::AppContext,
        contracts::{AppEventSource, MessageBus, SessionController},
        outbound::{dispatch, ShellFlow},
    },
};

use super::{event_source::TerminalInputReader, terminal::TerminalSession, view};

const INBOUND_CHANNEL_CLOSED: &str = "SHELL_INBOUND_CHANNEL_CLOSED";

pub fn start(
    context: &AppContext,
    event_source: &mut dyn AppEventSource,
    controller: &mut dyn SessionController,
    bus: &mut dyn MessageBus,
    inbound_tx: Sender<AppEvent>,
) -> Result<()> {
    tracing::info!(
        log_level = %context.config.logging.level,
        bus_url = %context.config.bus.url,
        user = %context.config.identity.name,
        "starting TUI shell"
    );

    let mut terminal = TerminalSession::new()?;
    let (width, height) = terminal.size()?;
    controller.handle_event(AppEvent::Resize { width, height });

    let _input_reader = TerminalInputReader::start(inbound_tx)?;

    run_event_loop(
        event_source,
        controller,
        bus,
        context.drain_timeout(),
        |state| terminal.draw(|frame| view::render(frame, state)),
    )
}

/// Processes one event at a time: render, wait for the next event, fold it
/// into the controller, then run the resulting bus actions.
fn run_event_loop<D>(
    event_source: &mut dyn AppEventSource,
    controller: &mut dyn SessionController,
    bus: &mut dyn MessageBus,
    drain_timeout: Duration,
    mut draw: D,
) -> Result<()>
where
    D: FnMut(&SessionState) -> Result<()>,
{
    let join = controller.announce();
    if dispatch(bus, controller, join, drain_timeout) == ShellFlow::Exit {
        return Ok(());
    }

    loop {
        draw(controller.state())?;

        let Some(event) = event_source.next_event()? else {
            tracing::warn!(
                code = INBOUND_CHANNEL_CLOSED,
                "all event producers are gone; leaving without logout"
            );
            return Ok(());
        };

        let actions = controller.handle_event(event);
        if dispatch(bus, controller, actions, drain_timeout) == ShellFlow::Exit {
            return Ok(());
        }
    }
}
