//! Domain layer: session state and the values that flow into it.

pub mod events;
pub mod message;
pub mod message_input_state;
pub mod roster;
pub mod session_state;
pub mod transcript;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
