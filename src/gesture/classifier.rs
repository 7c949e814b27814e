//! Ordered decision list mapping interaction metrics to a gesture.

use crate::gesture::config::GestureThresholds;
use crate::gesture::direction::{classify_direction, Direction};
use std::fmt;

/// Result of classifying a finished interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    None,
    Tap,
    Press,
    Swipe(Direction),
}

impl Gesture {
    pub fn as_str(self) -> &'static str {
        match self {
            Gesture::None => "none",
            Gesture::Tap => "tap",
            Gesture::Press => "press",
            Gesture::Swipe(_) => "swipe",
        }
    }

    pub fn is_none(self) -> bool {
        self == Gesture::None
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gesture::Swipe(direction) => write!(f, "swipe-{direction}"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Final statistics of an interaction, as seen by the classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionMetrics {
    /// Milliseconds between down and up.
    pub duration: f64,
    /// Net horizontal displacement in px.
    pub dist_x: f64,
    /// Net vertical displacement in px.
    pub dist_y: f64,
    /// Horizontal speed in px/ms; zero when the duration is not positive.
    pub velocity_x: f64,
    pub direction: Direction,
}

impl InteractionMetrics {
    /// Derive velocity and direction from raw totals.
    pub fn from_totals(duration: f64, dist_x: f64, dist_y: f64) -> Self {
        let velocity_x = if duration > 0.0 && duration.is_finite() {
            dist_x.abs() / duration
        } else {
            0.0
        };

        Self {
            duration,
            dist_x,
            dist_y,
            velocity_x,
            direction: classify_direction(dist_x, dist_y),
        }
    }
}

/// Classify an interaction. The first matching rule wins: tap, press, swipe.
///
/// A non-positive or non-finite duration (same-timestamp down/up or a clock that went
/// backwards) matches nothing.
pub fn classify(metrics: &InteractionMetrics, thresholds: &GestureThresholds) -> Gesture {
    let InteractionMetrics {
        duration,
        dist_x,
        dist_y,
        velocity_x,
        direction,
    } = *metrics;

    if !(duration.is_finite() && duration > 0.0) {
        return Gesture::None;
    }

    let tap = &thresholds.tap;
    if duration > tap.time
        && duration < tap.maxtime
        && dist_x.abs() < tap.threshold
        && dist_y.abs() < tap.threshold
    {
        return Gesture::Tap;
    }

    let press = &thresholds.press;
    if duration > press.time && dist_x.abs() < press.threshold && dist_y.abs() < press.threshold
    {
        return Gesture::Press;
    }

    let swipe = &thresholds.swipe;
    if thresholds.allows_swipe(direction)
        && dist_x.abs() > swipe.threshold
        && velocity_x > swipe.velocity
    {
        return Gesture::Swipe(direction);
    }

    Gesture::None
}
