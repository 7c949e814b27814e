//! # rtouch - Single-Contact Gesture Recognition
//!
//! Turns a stream of pointer/touch notifications (down, moves, up or cancel) into
//! semantic gestures and publishes typed events for every phase of an interaction.
//!
//! ## Features
//!
//! - **Tap, press and swipe**: ordered threshold rules evaluated once per release
//! - **Directional swipes**: `swipe` followed by `swipe-left`/`-right`/`-up`/`-down`
//! - **Lifecycle events**: `start`, `started`, `move`, `end`, `cancel`, `destroy`
//! - **Frame throttling**: optional `throttle` event carrying the latest move per frame
//! - **Trace replay**: recorded interactions can be replayed from text files
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`input`] - Tagged notifications, the input-source trait and recorded traces
//! - [`session`] - Per-interaction statistics
//! - [`gesture`] - Thresholds and the classifier
//! - [`events`] - Event names, payloads and the listener registry
//! - [`recognizer`] - Controller tying a session, a dispatcher and thresholds together
//! - [`replay`] - Feeding an input source through a recognizer
//!
//! ## Example
//!
//! ```
//! use rtouch::{EventName, GestureRecognizer, InputNotification, Point};
//!
//! let mut recognizer = GestureRecognizer::new();
//! recognizer.on(EventName::SwipeRight, |event| {
//!     println!("swiped {}px", event.delta.x);
//! });
//!
//! recognizer.handle(&InputNotification::down(0.0, Point::new(0.0, 0.0)));
//! let events = recognizer.handle(&InputNotification::up(100.0, Point::new(50.0, 0.0)));
//! assert_eq!(events.last().map(|e| e.name), Some(EventName::SwipeRight));
//! ```

// Core modules
pub mod error;
pub mod events;
pub mod gesture;
pub mod input;
pub mod session;

// Components
pub mod recognizer;
pub mod replay;

// Re-export commonly used types for convenience
pub use error::{Result, TouchError};

// Public API surface for external usage
pub use events::{Delta, EventDispatcher, EventName, ListenerId, TouchEvent};
pub use gesture::{classify, classify_direction, Direction, Gesture, GestureThresholds};
pub use input::{InputNotification, InputSource, NotificationKind, Point, TraceSource};
pub use recognizer::{GestureRecognizer, RecognizerState};
pub use replay::{replay, ReplayOptions, ReplayReport};
pub use session::InteractionSession;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
