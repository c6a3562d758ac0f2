//! Use case layer: the session controller and the workflows around it.

pub mod bootstrap;
pub mod context;
pub mod contracts;
pub mod outbound;
pub mod session;

/// Returns the usecases module name for smoke checks.
pub fn module_name() -> &'static str {
    "usecases"
}
