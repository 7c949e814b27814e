//! Event publication.
//!
//! A generic listener registry plus the concrete event names and payloads the
//! recognizer publishes through it.

pub mod dispatcher;
pub mod touch_event;

pub use dispatcher::{EventDispatcher, ListenerId};
pub use touch_event::{Delta, EventName, TouchEvent};
