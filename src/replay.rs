//! Replay of recorded input through a recognizer.
//!
//! Notifications are fed in order. Rendering frames are synthesized on a fixed grid
//! anchored at the first notification, so `throttle` events come out as they would
//! behind a real display loop. In real-time mode the replay sleeps between
//! notifications to reproduce the recorded pacing.

use crate::error::{Result, TouchError};
use crate::events::{EventName, TouchEvent};
use crate::input::InputSource;
use crate::recognizer::GestureRecognizer;
use std::collections::BTreeMap;
use std::time::Duration;

/// Frame interval of a 60Hz display, in ms.
pub const DEFAULT_FRAME_INTERVAL_MS: f64 = 16.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ReplayOptions {
    /// Spacing of synthesized frames; `None` disables frame ticks.
    pub frame_interval_ms: Option<f64>,
    /// Sleep between notifications according to their timestamps.
    pub realtime: bool,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            frame_interval_ms: Some(DEFAULT_FRAME_INTERVAL_MS),
            realtime: false,
        }
    }
}

/// Everything a replay produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayReport {
    pub notifications: usize,
    pub events: Vec<TouchEvent>,
}

impl ReplayReport {
    pub fn count(&self, name: EventName) -> usize {
        self.events.iter().filter(|event| event.name == name).count()
    }

    /// Emission counts of gesture events (`tap`, `press`, `swipe`, `swipe-*`).
    pub fn gesture_counts(&self) -> BTreeMap<EventName, usize> {
        let mut counts = BTreeMap::new();
        for event in self.events.iter().filter(|event| !event.name.is_lifecycle()) {
            *counts.entry(event.name).or_insert(0) += 1;
        }
        counts
    }

    pub fn names(&self) -> Vec<EventName> {
        self.events.iter().map(|event| event.name).collect()
    }
}

/// Drive `recognizer` with every notification of `source`.
pub async fn replay<S>(
    source: &mut S,
    recognizer: &mut GestureRecognizer,
    options: &ReplayOptions,
) -> Result<ReplayReport>
where
    S: InputSource,
{
    if let Some(interval) = options.frame_interval_ms {
        if !(interval.is_finite() && interval > 0.0) {
            return Err(TouchError::invalid_argument(format!(
                "frame interval must be a positive number of milliseconds (got {interval})"
            )));
        }
    }

    recognizer.attach(&*source);

    let mut report = ReplayReport::default();
    let mut next_frame: Option<f64> = None;
    let mut previous_time: Option<f64> = None;

    while let Some(notification) = source.next_notification() {
        let now = notification.time_ms;

        if options.realtime {
            if let Some(previous) = previous_time {
                let gap = now - previous;
                if gap > 0.0 {
                    let pause = Duration::try_from_secs_f64(gap / 1000.0).map_err(|_| {
                        TouchError::invalid_argument(format!(
                            "gap of {gap}ms before notification at {now}ms is too long to replay in real time"
                        ))
                    })?;
                    tokio::time::sleep(pause).await;
                }
            }
        }
        previous_time = Some(now);

        if let Some(interval) = options.frame_interval_ms {
            let frame = *next_frame.get_or_insert(now + interval);
            if frame <= now {
                report.events.extend(recognizer.tick_frame(frame));
                // Frames skipped in a long gap would have had nothing new to flush.
                let behind = ((now - frame) / interval).floor() + 1.0;
                next_frame = Some(frame + behind * interval);
            }
        }

        report.events.extend(recognizer.handle(&notification));
        report.notifications += 1;
    }

    if let Some(frame) = next_frame {
        report.events.extend(recognizer.tick_frame(frame));
    }

    log::debug!(
        "replayed {} notifications into {} events",
        report.notifications,
        report.events.len()
    );
    Ok(report)
}
