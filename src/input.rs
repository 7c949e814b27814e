//! Input subsystem.
//!
//! Tagged notifications, the input-source collaborator trait and recorded traces
//! that implement it.

pub mod notification;
pub mod source;
pub mod trace;

// Public re-exports for convenience. Modules outside this crate should prefer importing
// from `crate::input` rather than reaching into submodules.
pub use notification::{InputNotification, NotificationKind, Point};
pub use source::{InputSource, ListenerOptions};
pub use trace::{parse_trace, TraceSource};
