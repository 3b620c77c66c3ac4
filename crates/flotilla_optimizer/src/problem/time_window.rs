use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::PlanningError;

use super::{Minutes, WEEK_MINUTES};

/// Accepted arrival interval in minutes since week start. The close bound
/// is the latest accepted arrival (service may finish after it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    open: Minutes,
    close: Minutes,
}

impl TimeWindow {
    /// Bounds are clamped to `[0, WEEK_MINUTES]`.
    pub fn new(open: Minutes, close: Minutes) -> Self {
        TimeWindow {
            open: open.clamp(0, WEEK_MINUTES),
            close: close.clamp(0, WEEK_MINUTES),
        }
    }

    pub fn full_horizon() -> Self {
        TimeWindow {
            open: 0,
            close: WEEK_MINUTES,
        }
    }

    /// Inverted windows (close before open, typically a data-entry slip)
    /// are repaired to a full day rather than dooming the site.
    pub fn from_clock(open: &str, close: &str) -> Result<Self, PlanningError> {
        let open_minutes = clock_to_minutes(open)?;
        let close_minutes = clock_to_minutes(close)?;

        if close_minutes < open_minutes {
            warn!("window {open}-{close} closes before it opens, assuming open all day");
            return Ok(TimeWindow::new(0, 24 * 60));
        }

        Ok(TimeWindow::new(open_minutes, close_minutes))
    }

    pub fn open(&self) -> Minutes {
        self.open
    }

    pub fn close(&self) -> Minutes {
        self.close
    }

    pub fn accepts(&self, arrival: Minutes) -> bool {
        self.open <= arrival && arrival <= self.close
    }

    /// Waiting incurred when arriving at `arrival` (zero once the window
    /// is open).
    pub fn waiting(&self, arrival: Minutes) -> Minutes {
        (self.open - arrival).max(0)
    }
}

/// `"HH:MM"` -> minutes since midnight Monday (`60 * hh + mm`).
pub fn clock_to_minutes(clock: &str) -> Result<Minutes, PlanningError> {
    let invalid = || PlanningError::InvalidClockTime(clock.to_string());

    let (hh, mm) = clock.split_once(':').ok_or_else(invalid)?;
    let hours: i64 = hh.parse().map_err(|_| invalid())?;
    let minutes: i64 = mm.parse().map_err(|_| invalid())?;

    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return Err(invalid());
    }

    Ok(hours * 60 + minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_clock_strings() {
        assert_eq!(clock_to_minutes("00:00").unwrap(), 0);
        assert_eq!(clock_to_minutes("08:30").unwrap(), 510);
        assert_eq!(clock_to_minutes("23:59").unwrap(), 1439);
    }

    #[test]
    fn rejects_malformed_clock_strings() {
        for bad in ["8h30", "25:00", "12:61", "12", ""] {
            assert!(clock_to_minutes(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn repairs_inverted_clock_windows() {
        let window = TimeWindow::from_clock("18:00", "08:00").unwrap();
        assert_eq!(window.open(), 0);
        assert_eq!(window.close(), 24 * 60);
        assert!(window.accepts(600));
    }

    #[test]
    fn clamps_to_horizon() {
        let window = TimeWindow::new(-10, WEEK_MINUTES + 100);
        assert_eq!(window.open(), 0);
        assert_eq!(window.close(), WEEK_MINUTES);
    }

    #[test]
    fn accepts_and_waiting() {
        let window = TimeWindow::new(480, 1080);
        assert!(window.accepts(480));
        assert!(window.accepts(1080));
        assert!(!window.accepts(1081));
        assert!(!window.accepts(479));
        assert_eq!(window.waiting(450), 30);
        assert_eq!(window.waiting(500), 0);
    }
}
