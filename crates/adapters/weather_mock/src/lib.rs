//! # homedash-adapter-weather-mock
//!
//! Deterministic weather provider. Readings are derived from a 32-bit hash
//! of the city name, so the same city and unit system always produce the
//! same reading and tests need no network access.
//!
//! ## Derivation
//!
//! | Value | Formula |
//! |-------|---------|
//! | temperature | per-region range, see [`Region`] |
//! | condition | `abs(hash % 7)` into [`WeatherCondition::ALL`] |
//! | humidity | `abs(hash % 40) + 30` |
//! | wind speed | `abs(hash % 15) + 3` |
//!
//! ## Dependency rule
//!
//! Depends on `homedash-app` (port traits) and `homedash-domain` only.

use homedash_app::ports::WeatherProvider;
use homedash_domain::weather::{UnitSystem, WeatherCondition, WeatherReading};

/// Hash-based stand-in for a real weather service.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockWeatherProvider;

impl MockWeatherProvider {
    /// Compute the reading synchronously.
    #[must_use]
    pub fn reading(city: &str, unit: UnitSystem) -> WeatherReading {
        let hash = city_hash(city);
        let region = Region::of(city);
        let condition = WeatherCondition::ALL[abs_mod_index(hash, WeatherCondition::ALL.len())];

        WeatherReading {
            temperature: region.temperature(hash, unit),
            unit,
            condition,
            humidity: small(abs_mod(hash, 40) + 30),
            wind_speed: small(abs_mod(hash, 15) + 3),
            city: city.to_string(),
        }
    }
}

impl WeatherProvider for MockWeatherProvider {
    async fn fetch_weather(&self, city: &str, unit: UnitSystem) -> WeatherReading {
        let reading = Self::reading(city, unit);
        tracing::debug!(city, ?unit, temperature = reading.temperature, "mock weather computed");
        reading
    }
}

/// Polynomial string hash over UTF-16 code units with 32-bit wraparound:
/// `hash = hash * 31 + unit`, computed as `(hash << 5) - hash + unit`.
#[must_use]
pub fn city_hash(city: &str) -> i32 {
    city.encode_utf16().fold(0_i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}

/// `abs(hash % modulus)`; the sign of `%` follows the dividend.
fn abs_mod(hash: i32, modulus: i32) -> i32 {
    (hash % modulus).abs()
}

fn abs_mod_index(hash: i32, len: usize) -> usize {
    let modulus = i32::try_from(len).unwrap_or(i32::MAX);
    usize::try_from(abs_mod(hash, modulus)).unwrap_or_default()
}

fn small(value: i32) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}

/// Climate region a city falls into, chosen by substring match on its
/// lowercase name. Each region maps the hash into its own temperature range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    SouthAsia,
    WesternEurope,
    NorthAmerica,
    Tokyo,
    Sydney,
    Other,
}

const SOUTH_ASIA: [&str; 8] = [
    "delhi",
    "mumbai",
    "bangalore",
    "chennai",
    "kolkata",
    "hyderabad",
    "pune",
    "ahmedabad",
];

impl Region {
    #[must_use]
    pub fn of(city: &str) -> Self {
        let name = city.to_lowercase();
        let any = |needles: &[&str]| needles.iter().any(|n| name.contains(n));
        if any(&SOUTH_ASIA) {
            Self::SouthAsia
        } else if any(&["london", "paris"]) {
            Self::WesternEurope
        } else if any(&["new york", "toronto"]) {
            Self::NorthAmerica
        } else if name.contains("tokyo") {
            Self::Tokyo
        } else if name.contains("sydney") {
            Self::Sydney
        } else {
            Self::Other
        }
    }

    /// `(modulus, offset)` of the temperature formula.
    #[must_use]
    pub fn range(self, unit: UnitSystem) -> (i32, i32) {
        match (self, unit) {
            (Self::SouthAsia, UnitSystem::Metric) => (20, 25),
            (Self::SouthAsia, UnitSystem::Imperial) => (36, 77),
            (Self::WesternEurope, UnitSystem::Metric) => (15, 10),
            (Self::WesternEurope, UnitSystem::Imperial) => (27, 50),
            (Self::NorthAmerica, UnitSystem::Metric) => (25, 5),
            (Self::NorthAmerica, UnitSystem::Imperial) => (45, 41),
            (Self::Tokyo, UnitSystem::Metric) => (20, 15),
            (Self::Tokyo, UnitSystem::Imperial) => (36, 59),
            (Self::Sydney, UnitSystem::Metric) => (20, 20),
            (Self::Sydney, UnitSystem::Imperial) => (36, 68),
            (Self::Other, UnitSystem::Metric) => (30, 15),
            (Self::Other, UnitSystem::Imperial) => (50, 60),
        }
    }

    fn temperature(self, hash: i32, unit: UnitSystem) -> i32 {
        let (modulus, offset) = self.range(unit);
        abs_mod(hash, modulus) + offset
    }
}
