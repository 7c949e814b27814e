//! Recorded interaction traces.
//!
//! A trace is plain text with one notification per line:
//!
//! ```text
//! # time_ms kind [x,y ...] [changed=x,y] [scale=f]
//! 0    down 0,0
//! 100  move 5,0
//! 120  move 5,0 40,40        # second finger: ignored by the recognizer
//! 600  up   changed=5,0
//! 700  cancel
//! ```
//!
//! Blank lines and `#` comments are skipped. Bare `x,y` pairs are active contacts.

use crate::error::{Result, TouchError};
use crate::input::notification::{InputNotification, NotificationKind, Point};
use crate::input::source::InputSource;
use std::collections::VecDeque;
use std::path::Path;
use std::str::FromStr;

/// Parse a whole trace.
pub fn parse_trace(content: &str) -> Result<Vec<InputNotification>> {
    let mut notifications = Vec::new();
    for (index, raw_line) in content.lines().enumerate() {
        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }
        notifications.push(parse_line(index + 1, line)?);
    }
    Ok(notifications)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_line(line_no: usize, line: &str) -> Result<InputNotification> {
    let mut fields = line.split_whitespace();

    let time_field = fields
        .next()
        .ok_or_else(|| TouchError::trace_parse(line_no, "missing timestamp"))?;
    let time_ms = parse_number(line_no, "timestamp", time_field)?;

    let kind_field = fields
        .next()
        .ok_or_else(|| TouchError::trace_parse(line_no, "missing notification kind"))?;
    let kind = parse_kind(kind_field).ok_or_else(|| {
        TouchError::trace_parse(
            line_no,
            format!("unknown notification kind '{kind_field}'"),
        )
    })?;

    let mut notification = InputNotification::new(kind, time_ms);
    for field in fields {
        if let Some(value) = field.strip_prefix("changed=") {
            notification.changed.push(parse_point(line_no, value)?);
        } else if let Some(value) = field.strip_prefix("scale=") {
            notification.scale = Some(parse_number(line_no, "scale", value)?);
        } else {
            notification.contacts.push(parse_point(line_no, field)?);
        }
    }

    Ok(notification)
}

fn parse_kind(field: &str) -> Option<NotificationKind> {
    match field.to_ascii_lowercase().as_str() {
        "down" => Some(NotificationKind::Down),
        "move" => Some(NotificationKind::Move),
        "up" => Some(NotificationKind::Up),
        "cancel" => Some(NotificationKind::Cancel),
        _ => None,
    }
}

fn parse_point(line_no: usize, field: &str) -> Result<Point> {
    let (x, y) = field.split_once(',').ok_or_else(|| {
        TouchError::trace_parse(line_no, format!("expected x,y but found '{field}'"))
    })?;
    Ok(Point::new(
        parse_number(line_no, "x coordinate", x)?,
        parse_number(line_no, "y coordinate", y)?,
    ))
}

fn parse_number(line_no: usize, what: &str, field: &str) -> Result<f64> {
    match f64::from_str(field) {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(TouchError::trace_parse(
            line_no,
            format!("invalid {what} '{field}'"),
        )),
    }
}

/// Validate that a path names a readable, non-empty trace file.
pub async fn validate_trace_path(path: &Path) -> Result<()> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(TouchError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(TouchError::file_error("Failed to read file metadata", e)),
    };

    if !metadata.is_file() {
        return Err(TouchError::file_error(
            format!("Path is not a file: {}", path.display()),
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "Not a file"),
        ));
    }

    if metadata.len() == 0 {
        return Err(TouchError::file_error(
            format!("File is empty: {}", path.display()),
            std::io::Error::new(std::io::ErrorKind::InvalidData, "Empty file"),
        ));
    }

    Ok(())
}

/// Input source replaying a parsed trace.
#[derive(Debug, Clone)]
pub struct TraceSource {
    pending: VecDeque<InputNotification>,
    passive: bool,
}

impl TraceSource {
    pub fn new(notifications: Vec<InputNotification>) -> Self {
        Self {
            pending: notifications.into(),
            passive: true,
        }
    }

    /// Parse trace text.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(Self::new(parse_trace(content)?))
    }

    /// Load and parse a trace file.
    pub async fn from_path(path: &Path) -> Result<Self> {
        validate_trace_path(path).await?;
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            TouchError::file_error(format!("Failed to read {}", path.display()), e)
        })?;
        let source = Self::parse(&content)?;
        log::debug!(
            "loaded {} notifications from {}",
            source.len(),
            path.display()
        );
        Ok(source)
    }

    /// Override the passive-listener capability reported to recognizers.
    pub fn with_passive_listeners(mut self, passive: bool) -> Self {
        self.passive = passive;
        self
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl FromStr for TraceSource {
    type Err = TouchError;

    fn from_str(content: &str) -> Result<Self> {
        Self::parse(content)
    }
}

impl InputSource for TraceSource {
    fn next_notification(&mut self) -> Option<InputNotification> {
        self.pending.pop_front()
    }

    fn supports_passive_listeners(&self) -> bool {
        self.passive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn parses_all_kinds() {
        let trace = parse_trace(
            "# swipe right\n\
             0 down 0,0\n\
             \n\
             16.5 move 12.25,-1\n\
             40 move 20,0 60,60 scale=1.4   # pinch\n\
             100 up changed=50,0\n\
             120 CANCEL\n",
        )
        .unwrap();

        assert_eq!(trace.len(), 5);
        assert_eq!(trace[0], InputNotification::down(0.0, Point::new(0.0, 0.0)));
        assert_eq!(trace[1].time_ms, 16.5);
        assert_eq!(trace[1].primary_point(), Some(Point::new(12.25, -1.0)));
        assert_eq!(trace[2].contacts.len(), 2);
        assert_eq!(trace[2].scale, Some(1.4));
        assert_eq!(trace[3], InputNotification::up(100.0, Point::new(50.0, 0.0)));
        assert_eq!(trace[4].kind, NotificationKind::Cancel);
    }

    #[test]
    fn source_parses_from_str() {
        let source: TraceSource = "0 down 0,0\n10 cancel\n".parse().unwrap();
        assert_eq!(source.len(), 2);
        assert!("0 tap".parse::<TraceSource>().is_err());
    }

    #[test]
    fn moves_without_points_are_kept_for_the_recognizer() {
        let trace = parse_trace("0 down 1,1\n5 move\n").unwrap();
        assert_eq!(trace[1].primary_point(), None);
    }

    #[test]
    fn reports_line_numbers() {
        let err = parse_trace("0 down 0,0\n\n5 hover 1,1\n").unwrap_err();
        match err {
            TouchError::TraceParse { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("hover"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_fields() {
        assert!(parse_trace("abc down 0,0").is_err());
        assert!(parse_trace("0 down 0;0").is_err());
        assert!(parse_trace("0 move 1,nan").is_err());
        assert!(parse_trace("0 move 1,1 scale=x").is_err());
        assert!(parse_trace("12").is_err());
    }

    #[tokio::test]
    async fn validates_paths() {
        let dir = TempDir::new().unwrap();
        assert!(validate_trace_path(dir.path()).await.is_err());
        assert!(matches!(
            validate_trace_path(&dir.path().join("missing.trace")).await,
            Err(TouchError::FileNotFound { .. })
        ));

        let empty = NamedTempFile::new().unwrap();
        assert!(validate_trace_path(empty.path()).await.is_err());

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "0 down 0,0").unwrap();
        assert!(validate_trace_path(file.path()).await.is_ok());
    }

    #[tokio::test]
    async fn source_loads_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "0 down 0,0\n250 up changed=0,0").unwrap();

        let mut source = TraceSource::from_path(file.path()).await.unwrap();
        assert_eq!(source.len(), 2);
        assert!(source.supports_passive_listeners());
        assert_eq!(
            source.next_notification().map(|n| n.kind),
            Some(NotificationKind::Down)
        );
        assert_eq!(
            source.next_notification().map(|n| n.kind),
            Some(NotificationKind::Up)
        );
        assert!(source.next_notification().is_none());
    }
}
