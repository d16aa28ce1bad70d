//! Wall clock: weather refresh timestamps and the part of day named in the
//! dashboard greeting.

use chrono::{DateTime, Local, Timelike, Utc};

/// UTC timestamp recorded when a weather reading lands in the panel.
pub type Timestamp = DateTime<Utc>;

/// Current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Part of the day, by local hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPeriod {
    /// Before noon.
    Morning,
    /// Noon until 18:00.
    Afternoon,
    Evening,
}

impl DayPeriod {
    /// Period containing `hour` (0–23). Out-of-range hours count as evening.
    #[must_use]
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..12 => Self::Morning,
            12..18 => Self::Afternoon,
            _ => Self::Evening,
        }
    }

    /// Period of the local wall clock right now.
    #[must_use]
    pub fn current() -> Self {
        Self::from_hour(Local::now().hour())
    }

    #[must_use]
    pub fn greeting(self) -> &'static str {
        match self {
            Self::Morning => "Good morning",
            Self::Afternoon => "Good afternoon",
            Self::Evening => "Good evening",
        }
    }
}
