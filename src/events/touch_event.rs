//! Names and payloads of the events published by the recognizer.

use crate::error::TouchError;
use crate::gesture::{Direction, Gesture, InteractionMetrics};
use crate::input::Point;
use std::fmt;
use std::str::FromStr;

/// Every event name a recognizer can publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventName {
    Start,
    Started,
    Move,
    Throttle,
    End,
    Cancel,
    Destroy,
    Tap,
    Press,
    Swipe,
    SwipeLeft,
    SwipeRight,
    SwipeUp,
    SwipeDown,
}

impl EventName {
    pub const ALL: [EventName; 14] = [
        EventName::Start,
        EventName::Started,
        EventName::Move,
        EventName::Throttle,
        EventName::End,
        EventName::Cancel,
        EventName::Destroy,
        EventName::Tap,
        EventName::Press,
        EventName::Swipe,
        EventName::SwipeLeft,
        EventName::SwipeRight,
        EventName::SwipeUp,
        EventName::SwipeDown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventName::Start => "start",
            EventName::Started => "started",
            EventName::Move => "move",
            EventName::Throttle => "throttle",
            EventName::End => "end",
            EventName::Cancel => "cancel",
            EventName::Destroy => "destroy",
            EventName::Tap => "tap",
            EventName::Press => "press",
            EventName::Swipe => "swipe",
            EventName::SwipeLeft => "swipe-left",
            EventName::SwipeRight => "swipe-right",
            EventName::SwipeUp => "swipe-up",
            EventName::SwipeDown => "swipe-down",
        }
    }

    /// Directional sub-event published after `swipe`.
    pub fn swipe_toward(direction: Direction) -> Option<EventName> {
        match direction {
            Direction::Left => Some(EventName::SwipeLeft),
            Direction::Right => Some(EventName::SwipeRight),
            Direction::Up => Some(EventName::SwipeUp),
            Direction::Down => Some(EventName::SwipeDown),
            Direction::None => None,
        }
    }

    /// Event names published for a classification result, in emission order.
    pub fn for_gesture(gesture: Gesture) -> Vec<EventName> {
        match gesture {
            Gesture::None => Vec::new(),
            Gesture::Tap => vec![EventName::Tap],
            Gesture::Press => vec![EventName::Press],
            Gesture::Swipe(direction) => std::iter::once(EventName::Swipe)
                .chain(EventName::swipe_toward(direction))
                .collect(),
        }
    }

    /// True for the lifecycle events of an interaction, false for gesture results.
    pub fn is_lifecycle(self) -> bool {
        matches!(
            self,
            EventName::Start
                | EventName::Started
                | EventName::Move
                | EventName::Throttle
                | EventName::End
                | EventName::Cancel
                | EventName::Destroy
        )
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventName {
    type Err = TouchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        EventName::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TouchError::invalid_argument(format!("unknown event name '{wanted}'")))
    }
}

/// Cumulative displacement since the interaction began.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Delta {
    pub x: f64,
    pub y: f64,
}

impl Delta {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Payload handed to listeners.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    pub name: EventName,
    /// Timestamp of the notification that produced the event, in ms.
    pub time_ms: f64,
    /// Contact point of that notification, when it carried one.
    pub point: Option<Point>,
    /// Cumulative displacement at the time of the event.
    pub delta: Delta,
    /// Final metrics; present on `end` and on gesture events.
    pub metrics: Option<InteractionMetrics>,
}

impl TouchEvent {
    pub fn new(name: EventName, time_ms: f64, point: Option<Point>, delta: Delta) -> Self {
        Self {
            name,
            time_ms,
            point,
            delta,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: InteractionMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Copy of this event under a different name.
    pub fn renamed(&self, name: EventName) -> Self {
        Self {
            name,
            ..self.clone()
        }
    }
}
