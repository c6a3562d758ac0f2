//! Runs the actions produced by the session controller against the bus.

use std::time::Duration;

use super::contracts::{MessageBus, OutboundAction, SessionController};
use crate::domain::events::AppEvent;

const OUTBOUND_PUBLISH_FAILED: &str = "BUS_PUBLISH_FAILED";
const OUTBOUND_DRAIN_FAILED: &str = "BUS_DRAIN_FAILED";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellFlow {
    Continue,
    Exit,
}

/// Executes `actions` in order. Publish failures are reported back to the
/// controller as internal errors; a failed drain is logged and exit proceeds.
pub fn dispatch(
    bus: &mut dyn MessageBus,
    controller: &mut dyn SessionController,
    actions: Vec<OutboundAction>,
    drain_timeout: Duration,
) -> ShellFlow {
    for action in actions {
        match action {
            OutboundAction::Publish(publication) => {
                if let Err(error) = bus.publish(&publication) {
                    tracing::warn!(
                        code = OUTBOUND_PUBLISH_FAILED,
                        topic = publication.topic(),
                        error = %error,
                        "publication dropped"
                    );
                    let follow_up =
                        controller.handle_event(AppEvent::InternalError(error.to_string()));
                    debug_assert!(follow_up.is_empty());
                }
            }
            OutboundAction::Drain => {
                if let Err(error) = bus.drain(drain_timeout) {
                    tracing::warn!(
                        code = OUTBOUND_DRAIN_FAILED,
                        error = %error,
                        "bus drain incomplete; pending publications may be lost"
                    );
                }
            }
            OutboundAction::Exit => return ShellFlow::Exit,
        }
    }

    ShellFlow::Continue
}
