//! Per-interaction statistics.
//!
//! An [`InteractionSession`] tracks one down → move* → up/cancel cycle and produces the
//! events of each phase. It keeps only the minimal sufficient statistics: where the
//! contact started, where it was last seen, the running sum of per-move deltas and the
//! two timestamps. Gesture classification happens once, at release.

use crate::events::{Delta, EventName, TouchEvent};
use crate::gesture::{classify, Gesture, GestureThresholds, InteractionMetrics};
use crate::input::Point;

/// What a finished interaction produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    pub gesture: Gesture,
    pub metrics: InteractionMetrics,
    /// `end` followed by the gesture events, in emission order.
    pub events: Vec<TouchEvent>,
}

/// Mutable state of the interaction in progress.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionSession {
    start_point: Point,
    start_time: f64,
    last_point: Point,
    cumulative: Delta,
    end_time: Option<f64>,
    has_moved: bool,
}

impl InteractionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new interaction, discarding whatever was tracked before.
    pub fn begin(&mut self, point: Point, time_ms: f64) -> TouchEvent {
        *self = Self {
            start_point: point,
            start_time: time_ms,
            last_point: point,
            cumulative: Delta::default(),
            end_time: None,
            has_moved: false,
        };
        TouchEvent::new(EventName::Start, time_ms, Some(point), self.cumulative)
    }

    /// Record a move to `point`. The first move after `begin` is announced with
    /// `started` ahead of its `move`.
    pub fn update(&mut self, point: Point, time_ms: f64) -> Vec<TouchEvent> {
        self.accumulate(point);

        let mut events = Vec::with_capacity(2);
        if !self.has_moved {
            self.has_moved = true;
            events.push(TouchEvent::new(
                EventName::Started,
                time_ms,
                Some(point),
                self.cumulative,
            ));
        }
        events.push(TouchEvent::new(
            EventName::Move,
            time_ms,
            Some(point),
            self.cumulative,
        ));
        events
    }

    /// Close the interaction at `point` and classify it.
    ///
    /// The release point is folded into the running totals, so the cumulative delta
    /// always equals the net displacement from the start point.
    pub fn finish(
        &mut self,
        point: Option<Point>,
        time_ms: f64,
        thresholds: &GestureThresholds,
    ) -> SessionOutcome {
        if let Some(point) = point {
            self.accumulate(point);
        }
        self.end_time = Some(time_ms);
        self.has_moved = false;

        let metrics = InteractionMetrics::from_totals(
            time_ms - self.start_time,
            self.cumulative.x,
            self.cumulative.y,
        );
        let gesture = classify(&metrics, thresholds);

        let end = TouchEvent::new(EventName::End, time_ms, point, self.cumulative)
            .with_metrics(metrics);
        let mut events = Vec::with_capacity(3);
        events.extend(
            EventName::for_gesture(gesture)
                .into_iter()
                .map(|name| end.renamed(name)),
        );
        events.insert(0, end);

        SessionOutcome {
            gesture,
            metrics,
            events,
        }
    }

    /// Abandon the interaction without classifying it.
    pub fn cancel(&mut self, time_ms: f64) -> TouchEvent {
        *self = Self::default();
        TouchEvent::new(EventName::Cancel, time_ms, None, self.cumulative)
    }

    fn accumulate(&mut self, point: Point) {
        self.cumulative.x += point.x - self.last_point.x;
        self.cumulative.y += point.y - self.last_point.y;
        self.last_point = point;
    }

    pub fn start_point(&self) -> Point {
        self.start_point
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn last_point(&self) -> Point {
        self.last_point
    }

    pub fn cumulative_delta(&self) -> Delta {
        self.cumulative
    }

    /// Set once the interaction has been released.
    pub fn end_time(&self) -> Option<f64> {
        self.end_time
    }

    pub fn has_moved(&self) -> bool {
        self.has_moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::Direction;

    fn names(events: &[TouchEvent]) -> Vec<EventName> {
        events.iter().map(|event| event.name).collect()
    }

    #[test]
    fn begin_resets_previous_state() {
        let mut session = InteractionSession::new();
        session.begin(Point::new(0.0, 0.0), 0.0);
        session.update(Point::new(30.0, 4.0), 10.0);
        assert!(session.has_moved());

        let start = session.begin(Point::new(100.0, 100.0), 50.0);
        assert_eq!(start.name, EventName::Start);
        assert_eq!(start.point, Some(Point::new(100.0, 100.0)));
        assert!(!session.has_moved());
        assert!(session.cumulative_delta().is_zero());
        assert_eq!(session.end_time(), None);
        assert_eq!(session.start_time(), 50.0);
        assert_eq!(session.last_point(), Point::new(100.0, 100.0));
    }

    #[test]
    fn first_move_announces_started() {
        let mut session = InteractionSession::new();
        session.begin(Point::new(10.0, 10.0), 0.0);

        let first = session.update(Point::new(12.0, 9.0), 16.0);
        assert_eq!(names(&first), vec![EventName::Started, EventName::Move]);
        assert_eq!(first[1].delta, Delta::new(2.0, -1.0));

        let second = session.update(Point::new(20.0, 9.0), 32.0);
        assert_eq!(names(&second), vec![EventName::Move]);
        assert_eq!(second[0].delta, Delta::new(10.0, -1.0));
    }

    #[test]
    fn release_point_is_folded_into_totals() {
        let mut session = InteractionSession::new();
        session.begin(Point::new(0.0, 0.0), 0.0);
        let outcome = session.finish(
            Some(Point::new(50.0, 0.0)),
            100.0,
            &GestureThresholds::default(),
        );

        assert_eq!(outcome.gesture, Gesture::Swipe(Direction::Right));
        assert_eq!(outcome.metrics.velocity_x, 0.5);
        assert_eq!(
            names(&outcome.events),
            vec![EventName::End, EventName::Swipe, EventName::SwipeRight]
        );
        assert!(outcome.events.iter().all(|e| e.metrics == Some(outcome.metrics)));
        assert_eq!(session.end_time(), Some(100.0));
        assert_eq!(session.start_point(), Point::new(0.0, 0.0));
    }

    #[test]
    fn finish_without_gesture_only_ends() {
        let mut session = InteractionSession::new();
        session.begin(Point::new(0.0, 0.0), 0.0);
        session.update(Point::new(3.0, 3.0), 50.0);
        let outcome = session.finish(None, 100.0, &GestureThresholds::default());

        assert_eq!(outcome.gesture, Gesture::None);
        assert_eq!(outcome.metrics.direction, Direction::None);
        assert_eq!(names(&outcome.events), vec![EventName::End]);
    }

    #[test]
    fn same_timestamp_release_is_not_a_gesture() {
        let mut session = InteractionSession::new();
        session.begin(Point::new(0.0, 0.0), 40.0);
        let outcome = session.finish(
            Some(Point::new(80.0, 0.0)),
            40.0,
            &GestureThresholds::default(),
        );
        assert_eq!(outcome.gesture, Gesture::None);
        assert_eq!(outcome.metrics.duration, 0.0);
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut session = InteractionSession::new();
        session.begin(Point::new(5.0, 5.0), 0.0);
        session.update(Point::new(25.0, 5.0), 20.0);

        let first = session.cancel(30.0);
        let after_first = session.clone();
        let second = session.cancel(31.0);

        assert_eq!(first.name, EventName::Cancel);
        assert_eq!(second.name, EventName::Cancel);
        assert_eq!(session, after_first);
        assert_eq!(session, InteractionSession::default());
    }
}
