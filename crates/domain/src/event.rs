//! Event — an immutable record of a state change.
//!
//! Every mutation of the application state produces exactly one event,
//! published after the new state is visible to readers.

use serde::{Deserialize, Serialize};

use crate::device::DeviceState;
use crate::id::{DeviceId, RoomId};
use crate::preferences::{TemperatureUnit, Theme};
use crate::weather::WeatherReading;

/// What changed, with the values needed to react without re-reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StateEvent {
    RoomSelected {
        from: RoomId,
        to: RoomId,
    },
    DeviceStateChanged {
        device_id: DeviceId,
        state: DeviceState,
    },
    TemperatureUnitChanged {
        unit: TemperatureUnit,
    },
    ThemeChanged {
        theme: Theme,
    },
    WeatherUpdated {
        reading: WeatherReading,
    },
}

impl StateEvent {
    /// Short snake-case name, used as a log field.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RoomSelected { .. } => "room_selected",
            Self::DeviceStateChanged { .. } => "device_state_changed",
            Self::TemperatureUnitChanged { .. } => "temperature_unit_changed",
            Self::ThemeChanged { .. } => "theme_changed",
            Self::WeatherUpdated { .. } => "weather_updated",
        }
    }
}
