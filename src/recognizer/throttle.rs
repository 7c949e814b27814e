//! Frame-rate limiting of `move` events.
//!
//! Moves can arrive far more often than a consumer can redraw. The throttle keeps only
//! the latest move and hands it out, renamed to `throttle`, when the next rendering
//! frame is ticked.

use crate::events::{EventName, TouchEvent};

#[derive(Debug, Clone, Default)]
pub struct MoveThrottle {
    pending: Option<TouchEvent>,
}

impl MoveThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a move, replacing any move still waiting for a frame.
    pub fn push(&mut self, event: &TouchEvent) {
        self.pending = Some(event.renamed(EventName::Throttle));
    }

    /// Flush the latest move for the frame starting at `frame_ms`.
    pub fn flush(&mut self, frame_ms: f64) -> Option<TouchEvent> {
        self.pending.take().map(|mut event| {
            event.time_ms = frame_ms;
            event
        })
    }

    /// Drop any pending move.
    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// Return true when there is no pending move to be flushed.
    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Delta;
    use crate::input::Point;

    fn moved(time_ms: f64, dx: f64) -> TouchEvent {
        TouchEvent::new(
            EventName::Move,
            time_ms,
            Some(Point::new(dx, 0.0)),
            Delta::new(dx, 0.0),
        )
    }

    #[test]
    fn keeps_only_latest_move() {
        let mut throttle = MoveThrottle::new();
        throttle.push(&moved(1.0, 2.0));
        throttle.push(&moved(5.0, 7.0));

        let event = throttle.flush(16.0).unwrap();
        assert_eq!(event.name, EventName::Throttle);
        assert_eq!(event.delta, Delta::new(7.0, 0.0));
        assert_eq!(event.time_ms, 16.0);
        assert!(throttle.flush(32.0).is_none());
    }

    #[test]
    fn clear_discards_pending() {
        let mut throttle = MoveThrottle::new();
        throttle.push(&moved(1.0, 2.0));
        assert!(!throttle.is_empty());
        throttle.clear();
        assert!(throttle.is_empty());
        assert!(throttle.flush(16.0).is_none());
    }
}
