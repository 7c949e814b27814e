//! Classification thresholds and their configuration file.
//!
//! Defaults follow the usual mobile-web conventions: a swipe needs at least 10px of
//! horizontal travel at 0.3px/ms, a tap is released between 200ms and 300ms without
//! drifting 9px, a press is held past 501ms without drifting 9px.
//!
//! With the `config` feature the thresholds can be read from TOML. Every key is
//! optional and falls back to its default:
//!
//! ```toml
//! [swipe]
//! threshold = 10.0
//! velocity = 0.3
//! direction = ["left", "right"]
//!
//! [tap]
//! time = 200.0
//! maxtime = 300.0
//! threshold = 9.0
//!
//! [press]
//! time = 501.0
//! threshold = 9.0
//! ```

use crate::error::{Result, TouchError};
use crate::gesture::direction::Direction;
#[cfg(feature = "config")]
use std::path::{Path, PathBuf};

/// Swipe recognition limits.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default, deny_unknown_fields))]
pub struct SwipeThresholds {
    /// Minimum horizontal travel in px (exclusive).
    pub threshold: f64,
    /// Minimum horizontal velocity in px/ms (exclusive).
    pub velocity: f64,
    /// Directions that may produce a swipe.
    pub direction: Vec<Direction>,
}

impl Default for SwipeThresholds {
    fn default() -> Self {
        Self {
            threshold: 10.0,
            velocity: 0.3,
            direction: vec![Direction::Left, Direction::Right],
        }
    }
}

/// Tap recognition window.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default, deny_unknown_fields))]
pub struct TapThresholds {
    /// Shortest hold in ms (exclusive).
    pub time: f64,
    /// Longest hold in ms (exclusive).
    pub maxtime: f64,
    /// Maximum drift on either axis in px (exclusive).
    pub threshold: f64,
}

impl Default for TapThresholds {
    fn default() -> Self {
        Self {
            time: 200.0,
            maxtime: 300.0,
            threshold: 9.0,
        }
    }
}

/// Long-press recognition limits.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default, deny_unknown_fields))]
pub struct PressThresholds {
    /// Shortest hold in ms (exclusive).
    pub time: f64,
    /// Maximum drift on either axis in px (exclusive).
    pub threshold: f64,
}

impl Default for PressThresholds {
    fn default() -> Self {
        Self {
            time: 501.0,
            threshold: 9.0,
        }
    }
}

/// Full set of thresholds used by the classifier.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default, deny_unknown_fields))]
pub struct GestureThresholds {
    pub swipe: SwipeThresholds,
    pub tap: TapThresholds,
    pub press: PressThresholds,
}

impl GestureThresholds {
    /// Check that every limit is usable by the classifier.
    pub fn validate(&self) -> Result<()> {
        let numbers = [
            ("swipe.threshold", self.swipe.threshold),
            ("swipe.velocity", self.swipe.velocity),
            ("tap.time", self.tap.time),
            ("tap.maxtime", self.tap.maxtime),
            ("tap.threshold", self.tap.threshold),
            ("press.time", self.press.time),
            ("press.threshold", self.press.threshold),
        ];
        for (key, value) in numbers {
            if !value.is_finite() || value < 0.0 {
                return Err(TouchError::config(format!(
                    "{key} must be a finite, non-negative number (got {value})"
                )));
            }
        }

        if self.tap.time >= self.tap.maxtime {
            return Err(TouchError::config(format!(
                "tap.time ({}) must be below tap.maxtime ({})",
                self.tap.time, self.tap.maxtime
            )));
        }

        if self.swipe.direction.contains(&Direction::None) {
            return Err(TouchError::config(
                "swipe.direction may only list left, right, up or down",
            ));
        }

        Ok(())
    }

    /// Whether a swipe in `direction` may be reported.
    pub fn allows_swipe(&self, direction: Direction) -> bool {
        self.swipe.direction.contains(&direction)
    }
}

#[cfg(feature = "config")]
impl GestureThresholds {
    /// Default configuration file location (`<config_dir>/rtouch/config.toml`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rtouch").join("config.toml"))
    }

    /// Parse and validate thresholds from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let thresholds: Self = toml::from_str(content)?;
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Render the thresholds as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| TouchError::config(e.to_string()))
    }

    /// Load thresholds from an explicit file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TouchError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            TouchError::file_error(format!("Failed to read {}", path.display()), e)
        })?;
        log::debug!("loading thresholds from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Load thresholds from the default location, falling back to defaults when no
    /// configuration file exists.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}
