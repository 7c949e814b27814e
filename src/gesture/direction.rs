//! Axis-dominance direction of a displacement.

use crate::error::TouchError;
use std::fmt;
use std::str::FromStr;

/// Direction of a cumulative displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum Direction {
    None,
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::None => "none",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = TouchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Direction::None),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(TouchError::invalid_argument(format!(
                "unknown direction '{other}'"
            ))),
        }
    }
}

/// Classify a displacement by its dominant axis.
///
/// Equal components (including the zero vector) have no direction. Ties between
/// non-equal magnitudes (`|x| == |y|`, e.g. `(-3, 3)`) resolve toward the horizontal
/// axis. Screen coordinates grow downward, so a negative `y` is `Up`.
pub fn classify_direction(x: f64, y: f64) -> Direction {
    if x == y {
        return Direction::None;
    }
    if x.abs() >= y.abs() {
        if x < 0.0 {
            Direction::Left
        } else {
            Direction::Right
        }
    } else if y < 0.0 {
        Direction::Up
    } else {
        Direction::Down
    }
}
