//! Weather readings shown in the dashboard header.

use serde::{Deserialize, Serialize};

/// City shown before the user picks one.
pub const DEFAULT_CITY: &str = "Delhi";

/// Cities offered by the city selector, in display order.
pub const POPULAR_CITIES: [&str; 14] = [
    "Delhi",
    "Mumbai",
    "Bangalore",
    "Chennai",
    "Kolkata",
    "Hyderabad",
    "Pune",
    "Ahmedabad",
    "New York",
    "London",
    "Tokyo",
    "Paris",
    "Sydney",
    "Toronto",
];

/// Measurement system requested from a weather provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Label for wind speed in this system.
    #[must_use]
    pub fn wind_speed_label(self) -> &'static str {
        match self {
            Self::Metric => "m/s",
            Self::Imperial => "mph",
        }
    }
}

/// Sky condition. Each variant carries a short label and a longer
/// description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherCondition {
    Sunny,
    Cloudy,
    PartlyCloudy,
    Clear,
    Misty,
    Foggy,
    Overcast,
}

impl WeatherCondition {
    /// Every condition, in a fixed order providers may index into.
    pub const ALL: [Self; 7] = [
        Self::Sunny,
        Self::Cloudy,
        Self::PartlyCloudy,
        Self::Clear,
        Self::Misty,
        Self::Foggy,
        Self::Overcast,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Sunny => "Sunny",
            Self::Cloudy => "Cloudy",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Clear => "Clear",
            Self::Misty => "Misty",
            Self::Foggy => "Foggy",
            Self::Overcast => "Overcast",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Sunny => "clear sky",
            Self::Cloudy => "scattered clouds",
            Self::PartlyCloudy => "broken clouds",
            Self::Clear => "few clouds",
            Self::Misty => "mist",
            Self::Foggy => "fog",
            Self::Overcast => "overcast",
        }
    }
}

/// A single weather observation for a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// Whole degrees in the unit system given by `unit`.
    pub temperature: i32,
    pub unit: UnitSystem,
    pub condition: WeatherCondition,
    /// Relative humidity in percent.
    pub humidity: u8,
    pub wind_speed: u8,
    pub city: String,
}

impl WeatherReading {
    #[must_use]
    pub fn condition_label(&self) -> &'static str {
        self.condition.label()
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        self.condition.description()
    }
}
