//! Event trait for inputs fed to a state holder.

use std::fmt::Debug;

/// Trait for events dispatched through [`send`](crate::machine::StateHolder::send).
///
/// Events describe something that happened (a click, a timer tick). The
/// holder never inspects them beyond [`name`](Event::name), which is used for
/// logging and transition history.
pub trait Event: Debug {
    /// Get the event's name for display/logging.
    fn name(&self) -> &str;
}
