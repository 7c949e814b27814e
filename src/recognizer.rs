//! Gesture recognizer.
//!
//! Routes tagged input notifications to the interaction session, publishes every
//! resulting event through its own dispatcher and returns the same events to the
//! caller. The recognizer is single-threaded and run-to-completion: each call processes
//! one notification fully before returning.

pub mod throttle;

use crate::error::Result;
use crate::events::{EventDispatcher, EventName, ListenerId, TouchEvent};
use crate::gesture::{Gesture, GestureThresholds};
use crate::input::{InputNotification, InputSource, ListenerOptions, NotificationKind};
use crate::session::InteractionSession;
use log::{debug, trace};
use throttle::MoveThrottle;

/// Lifecycle of a recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognizerState {
    /// Waiting for a down notification.
    Idle,
    /// An interaction is in progress.
    Tracking,
    /// Detached for good; nothing is processed or published anymore.
    Destroyed,
}

/// Single-contact gesture recognizer for one surface.
#[derive(Debug)]
pub struct GestureRecognizer {
    session: InteractionSession,
    thresholds: GestureThresholds,
    dispatcher: EventDispatcher<EventName, TouchEvent>,
    throttle: MoveThrottle,
    throttle_enabled: bool,
    state: RecognizerState,
    listener_options: Option<ListenerOptions>,
    last_gesture: Option<Gesture>,
}

impl GestureRecognizer {
    /// Recognizer using the default thresholds.
    pub fn new() -> Self {
        Self::build(GestureThresholds::default())
    }

    /// Recognizer using custom thresholds, which are validated first.
    pub fn with_thresholds(thresholds: GestureThresholds) -> Result<Self> {
        thresholds.validate()?;
        Ok(Self::build(thresholds))
    }

    fn build(thresholds: GestureThresholds) -> Self {
        Self {
            session: InteractionSession::new(),
            thresholds,
            dispatcher: EventDispatcher::new(),
            throttle: MoveThrottle::new(),
            throttle_enabled: true,
            state: RecognizerState::Idle,
            listener_options: None,
            last_gesture: None,
        }
    }

    /// Enable or disable the per-frame `throttle` event.
    pub fn set_throttle_enabled(&mut self, enabled: bool) {
        self.throttle_enabled = enabled;
        if !enabled {
            self.throttle.clear();
        }
    }

    pub fn on<F>(&mut self, name: EventName, listener: F) -> ListenerId
    where
        F: FnMut(&TouchEvent) + 'static,
    {
        self.dispatcher.on(name, listener)
    }

    pub fn once<F>(&mut self, name: EventName, listener: F) -> ListenerId
    where
        F: FnMut(&TouchEvent) + 'static,
    {
        self.dispatcher.once(name, listener)
    }

    pub fn off(&mut self, name: EventName, id: ListenerId) -> bool {
        self.dispatcher.off(name, id)
    }

    /// Start receiving notifications from `source`.
    pub fn attach(&mut self, source: &dyn InputSource) -> ListenerOptions {
        let options = ListenerOptions::for_source(source);
        if self.state != RecognizerState::Destroyed {
            debug!("attaching to input source (passive listeners: {})", options.passive);
            self.listener_options = Some(options);
        }
        options
    }

    /// Process one notification and return the events it produced.
    pub fn handle(&mut self, notification: &InputNotification) -> Vec<TouchEvent> {
        if self.state == RecognizerState::Destroyed {
            trace!("recognizer destroyed; dropping {}", notification.kind);
            return Vec::new();
        }

        let events = match notification.kind {
            NotificationKind::Down => self.on_down(notification),
            NotificationKind::Move => self.on_move(notification),
            NotificationKind::Up => self.on_up(notification),
            NotificationKind::Cancel => self.on_cancel(notification),
        };
        self.publish(events)
    }

    /// Tick a rendering frame, publishing the latest move as `throttle` if one arrived
    /// since the previous frame.
    pub fn tick_frame(&mut self, frame_ms: f64) -> Option<TouchEvent> {
        if self.state == RecognizerState::Destroyed {
            return None;
        }
        let event = self.throttle.flush(frame_ms)?;
        self.dispatcher.emit(event.name, &event);
        Some(event)
    }

    /// Detach and publish `destroy`. Later calls are no-ops.
    pub fn destroy(&mut self, time_ms: f64) -> Option<TouchEvent> {
        if self.state == RecognizerState::Destroyed {
            return None;
        }
        debug!("destroying recognizer");
        self.state = RecognizerState::Destroyed;
        self.listener_options = None;
        self.throttle.clear();

        let event = TouchEvent::new(
            EventName::Destroy,
            time_ms,
            None,
            self.session.cumulative_delta(),
        );
        self.dispatcher.emit(event.name, &event);
        self.dispatcher.clear();
        Some(event)
    }

    fn on_down(&mut self, notification: &InputNotification) -> Vec<TouchEvent> {
        let Some(point) = notification.primary_point() else {
            debug!("down at {}ms without a contact point; ignored", notification.time_ms);
            return Vec::new();
        };
        if self.state == RecognizerState::Tracking {
            debug!("down while an interaction is in progress; restarting session");
        }

        self.throttle.clear();
        self.state = RecognizerState::Tracking;
        vec![self.session.begin(point, notification.time_ms)]
    }

    fn on_move(&mut self, notification: &InputNotification) -> Vec<TouchEvent> {
        if self.state != RecognizerState::Tracking {
            return Vec::new();
        }
        if notification.is_multi_touch() {
            trace!("multi-touch move at {}ms ignored", notification.time_ms);
            return Vec::new();
        }
        let Some(point) = notification.primary_point() else {
            debug!("move at {}ms without a contact point; ignored", notification.time_ms);
            return Vec::new();
        };

        let events = self.session.update(point, notification.time_ms);
        if self.throttle_enabled {
            if let Some(last) = events.last() {
                self.throttle.push(last);
            }
        }
        events
    }

    fn on_up(&mut self, notification: &InputNotification) -> Vec<TouchEvent> {
        if self.state != RecognizerState::Tracking {
            return Vec::new();
        }
        let Some(point) = notification.release_point() else {
            debug!("up at {}ms without a contact point; ignored", notification.time_ms);
            return Vec::new();
        };

        let outcome = self
            .session
            .finish(Some(point), notification.time_ms, &self.thresholds);
        debug!(
            "interaction finished: {} (duration {}ms, delta {},{})",
            outcome.gesture, outcome.metrics.duration, outcome.metrics.dist_x, outcome.metrics.dist_y
        );
        self.state = RecognizerState::Idle;
        self.last_gesture = Some(outcome.gesture);
        outcome.events
    }

    fn on_cancel(&mut self, notification: &InputNotification) -> Vec<TouchEvent> {
        if self.state != RecognizerState::Tracking {
            return Vec::new();
        }
        self.throttle.clear();
        self.state = RecognizerState::Idle;
        vec![self.session.cancel(notification.time_ms)]
    }

    fn publish(&mut self, events: Vec<TouchEvent>) -> Vec<TouchEvent> {
        for event in &events {
            self.dispatcher.emit(event.name, event);
        }
        events
    }

    pub fn state(&self) -> RecognizerState {
        self.state
    }

    pub fn session(&self) -> &InteractionSession {
        &self.session
    }

    pub fn thresholds(&self) -> &GestureThresholds {
        &self.thresholds
    }

    /// Options recorded by the last `attach`, cleared by `destroy`.
    pub fn listener_options(&self) -> Option<ListenerOptions> {
        self.listener_options
    }

    /// Classification of the most recently released interaction.
    pub fn last_gesture(&self) -> Option<Gesture> {
        self.last_gesture
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Delta;
    use crate::gesture::Direction;
    use crate::input::{Point, TraceSource};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn names(events: &[TouchEvent]) -> Vec<EventName> {
        events.iter().map(|event| event.name).collect()
    }

    #[test]
    fn notifications_before_down_are_ignored() {
        let mut recognizer = GestureRecognizer::new();
        assert!(recognizer
            .handle(&InputNotification::moved(5.0, Point::new(1.0, 1.0)))
            .is_empty());
        assert!(recognizer
            .handle(&InputNotification::up(9.0, Point::new(1.0, 1.0)))
            .is_empty());
        assert!(recognizer.handle(&InputNotification::cancel(10.0)).is_empty());
        assert_eq!(recognizer.state(), RecognizerState::Idle);
    }

    #[test]
    fn listeners_receive_published_events() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut recognizer = GestureRecognizer::new();
        for name in [EventName::Start, EventName::End, EventName::Tap] {
            let seen = Rc::clone(&seen);
            recognizer.on(name, move |event| seen.borrow_mut().push(event.name));
        }

        recognizer.handle(&InputNotification::down(0.0, Point::new(0.0, 0.0)));
        recognizer.handle(&InputNotification::up(250.0, Point::new(0.0, 0.0)));

        assert_eq!(
            *seen.borrow(),
            vec![EventName::Start, EventName::End, EventName::Tap]
        );
        assert_eq!(recognizer.last_gesture(), Some(Gesture::Tap));
    }

    #[test]
    fn multi_touch_moves_do_not_change_totals() {
        let mut recognizer = GestureRecognizer::new();
        recognizer.handle(&InputNotification::down(0.0, Point::new(0.0, 0.0)));
        recognizer.handle(&InputNotification::moved(10.0, Point::new(4.0, 0.0)));

        let pinch = InputNotification::moved(20.0, Point::new(30.0, 0.0))
            .with_contact(Point::new(90.0, 90.0));
        let zoom = InputNotification::moved(30.0, Point::new(60.0, 0.0)).with_scale(0.8);
        assert!(recognizer.handle(&pinch).is_empty());
        assert!(recognizer.handle(&zoom).is_empty());

        assert_eq!(recognizer.session().cumulative_delta(), Delta::new(4.0, 0.0));
    }

    #[test]
    fn moves_without_contacts_are_ignored() {
        let mut recognizer = GestureRecognizer::new();
        recognizer.handle(&InputNotification::down(0.0, Point::new(0.0, 0.0)));
        let empty = InputNotification::new(NotificationKind::Move, 5.0);
        assert!(recognizer.handle(&empty).is_empty());
        assert!(!recognizer.session().has_moved());

        let empty_up = InputNotification::new(NotificationKind::Up, 9.0);
        assert!(recognizer.handle(&empty_up).is_empty());
        assert_eq!(recognizer.state(), RecognizerState::Tracking);
    }

    #[test]
    fn cancel_skips_classification() {
        let mut recognizer = GestureRecognizer::new();
        recognizer.handle(&InputNotification::down(0.0, Point::new(0.0, 0.0)));
        recognizer.handle(&InputNotification::moved(50.0, Point::new(80.0, 0.0)));
        let events = recognizer.handle(&InputNotification::cancel(60.0));

        assert_eq!(names(&events), vec![EventName::Cancel]);
        assert_eq!(recognizer.state(), RecognizerState::Idle);
        assert!(recognizer.session().cumulative_delta().is_zero());
        assert_eq!(recognizer.last_gesture(), None);
        assert!(recognizer.tick_frame(64.0).is_none());
    }

    #[test]
    fn throttle_emits_once_per_frame() {
        let mut recognizer = GestureRecognizer::new();
        recognizer.handle(&InputNotification::down(0.0, Point::new(0.0, 0.0)));
        recognizer.handle(&InputNotification::moved(2.0, Point::new(3.0, 0.0)));
        recognizer.handle(&InputNotification::moved(6.0, Point::new(8.0, 1.0)));

        let frame = recognizer.tick_frame(16.0).unwrap();
        assert_eq!(frame.name, EventName::Throttle);
        assert_eq!(frame.delta, Delta::new(8.0, 1.0));
        assert!(recognizer.tick_frame(32.0).is_none());

        recognizer.set_throttle_enabled(false);
        recognizer.handle(&InputNotification::moved(40.0, Point::new(9.0, 1.0)));
        assert!(recognizer.tick_frame(48.0).is_none());
    }

    #[test]
    fn down_during_interaction_restarts() {
        let mut recognizer = GestureRecognizer::new();
        recognizer.handle(&InputNotification::down(0.0, Point::new(0.0, 0.0)));
        recognizer.handle(&InputNotification::moved(10.0, Point::new(40.0, 0.0)));
        let events = recognizer.handle(&InputNotification::down(20.0, Point::new(5.0, 5.0)));

        assert_eq!(names(&events), vec![EventName::Start]);
        assert!(recognizer.session().cumulative_delta().is_zero());
        assert!(!recognizer.session().has_moved());
        assert!(recognizer.tick_frame(32.0).is_none());
    }

    #[test]
    fn destroy_silences_everything() {
        let count = Rc::new(RefCell::new(0));
        let mut recognizer = GestureRecognizer::new();
        let source = TraceSource::new(Vec::new());
        assert!(recognizer.attach(&source).passive);
        {
            let count = Rc::clone(&count);
            recognizer.on(EventName::Destroy, move |_| *count.borrow_mut() += 1);
        }

        let destroyed = recognizer.destroy(100.0).unwrap();
        assert_eq!(destroyed.name, EventName::Destroy);
        assert!(recognizer.destroy(101.0).is_none());
        assert_eq!(*count.borrow(), 1);
        assert_eq!(recognizer.listener_options(), None);

        assert!(recognizer
            .handle(&InputNotification::down(200.0, Point::new(0.0, 0.0)))
            .is_empty());
        assert_eq!(recognizer.state(), RecognizerState::Destroyed);
    }

    #[test]
    fn attach_records_source_capability() {
        let mut recognizer = GestureRecognizer::new();
        assert_eq!(recognizer.listener_options(), None);

        let blocking = TraceSource::new(Vec::new()).with_passive_listeners(false);
        let options = recognizer.attach(&blocking);
        assert!(!options.passive);
        assert_eq!(recognizer.listener_options(), Some(options));

        let passive = TraceSource::new(Vec::new());
        assert!(recognizer.attach(&passive).passive);
        assert_eq!(
            recognizer.listener_options(),
            Some(ListenerOptions { passive: true })
        );
    }

    #[test]
    fn custom_thresholds_are_validated() {
        let mut thresholds = GestureThresholds::default();
        thresholds.swipe.direction = vec![Direction::Up, Direction::Down];
        assert!(GestureRecognizer::with_thresholds(thresholds).is_ok());

        let mut broken = GestureThresholds::default();
        broken.tap.maxtime = 100.0;
        assert!(GestureRecognizer::with_thresholds(broken).is_err());
    }
}
