//! Tagged input notifications delivered by an input source.

use std::fmt;

/// Pixel coordinates in the input source's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Phase of the interaction a notification belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Down,
    Move,
    Up,
    Cancel,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Down => "down",
            NotificationKind::Move => "move",
            NotificationKind::Up => "up",
            NotificationKind::Cancel => "cancel",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One notification from the input source.
///
/// `contacts` lists the points still touching the surface; `changed` lists points
/// whose state changed with this notification (on release the lifted contact is only
/// found there).
#[derive(Debug, Clone, PartialEq)]
pub struct InputNotification {
    pub kind: NotificationKind,
    pub time_ms: f64,
    pub contacts: Vec<Point>,
    pub changed: Vec<Point>,
    /// Pinch-zoom scale reported by the platform, if any.
    pub scale: Option<f64>,
}

impl InputNotification {
    pub fn new(kind: NotificationKind, time_ms: f64) -> Self {
        Self {
            kind,
            time_ms,
            contacts: Vec::new(),
            changed: Vec::new(),
            scale: None,
        }
    }

    pub fn down(time_ms: f64, point: Point) -> Self {
        Self::new(NotificationKind::Down, time_ms).with_contact(point)
    }

    pub fn moved(time_ms: f64, point: Point) -> Self {
        Self::new(NotificationKind::Move, time_ms).with_contact(point)
    }

    /// Release of `point`; the lifted contact is reported as changed only.
    pub fn up(time_ms: f64, point: Point) -> Self {
        Self::new(NotificationKind::Up, time_ms).with_changed(point)
    }

    pub fn cancel(time_ms: f64) -> Self {
        Self::new(NotificationKind::Cancel, time_ms)
    }

    pub fn with_contact(mut self, point: Point) -> Self {
        self.contacts.push(point);
        self
    }

    pub fn with_changed(mut self, point: Point) -> Self {
        self.changed.push(point);
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// First active contact.
    pub fn primary_point(&self) -> Option<Point> {
        self.contacts.first().copied()
    }

    /// Point at which the contact was lifted: the first changed contact, falling back
    /// to the first active one.
    pub fn release_point(&self) -> Option<Point> {
        self.changed
            .first()
            .or_else(|| self.contacts.first())
            .copied()
    }

    /// More than one simultaneous contact, or a pinch scale other than 1.
    pub fn is_multi_touch(&self) -> bool {
        self.contacts.len() > 1 || self.scale.is_some_and(|scale| scale != 1.0)
    }
}
