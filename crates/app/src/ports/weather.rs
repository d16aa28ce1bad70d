//! Weather port — where the dashboard gets its readings from.
//!
//! A provider has no failure path. Implementations backed by a real service
//! must catch transport and parsing errors at this boundary and answer with
//! a fallback reading instead, so the dashboard always has something to show.

use std::future::Future;

use homedash_domain::weather::{UnitSystem, WeatherReading};

/// Produces a [`WeatherReading`] for a city.
pub trait WeatherProvider {
    /// Fetch the current weather for `city` in the requested unit system.
    fn fetch_weather(
        &self,
        city: &str,
        unit: UnitSystem,
    ) -> impl Future<Output = WeatherReading> + Send;
}

impl<T: WeatherProvider + Send + Sync> WeatherProvider for std::sync::Arc<T> {
    fn fetch_weather(
        &self,
        city: &str,
        unit: UnitSystem,
    ) -> impl Future<Output = WeatherReading> + Send {
        (**self).fetch_weather(city, unit)
    }
}
