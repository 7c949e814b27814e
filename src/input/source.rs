//! The input-source collaborator.

use crate::input::notification::InputNotification;

/// Producer of input notifications for one surface.
///
/// Implementations deliver, per interaction, exactly one down, any number of moves
/// and one up or cancel, in timestamp order.
pub trait InputSource {
    /// Next notification, or `None` once the source is exhausted.
    fn next_notification(&mut self) -> Option<InputNotification>;

    /// Whether the underlying platform accepts passive (non-blocking) listeners.
    fn supports_passive_listeners(&self) -> bool {
        false
    }
}

/// Options a recognizer uses when it attaches to a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListenerOptions {
    /// Listeners promise never to block scrolling.
    pub passive: bool,
}

impl ListenerOptions {
    pub fn for_source(source: &dyn InputSource) -> Self {
        Self {
            passive: source.supports_passive_listeners(),
        }
    }
}

impl<S: InputSource + ?Sized> InputSource for Box<S> {
    fn next_notification(&mut self) -> Option<InputNotification> {
        (**self).next_notification()
    }

    fn supports_passive_listeners(&self) -> bool {
        (**self).supports_passive_listeners()
    }
}
