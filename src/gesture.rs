//! Gesture classification.
//!
//! Pure functions that turn the final metrics of an interaction into a gesture label,
//! together with the thresholds they are evaluated against.

pub mod classifier;
pub mod config;
pub mod direction;

pub use classifier::{classify, Gesture, InteractionMetrics};
pub use config::{GestureThresholds, PressThresholds, SwipeThresholds, TapThresholds};
pub use direction::{classify_direction, Direction};
