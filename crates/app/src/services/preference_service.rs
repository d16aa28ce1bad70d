//! Preference service — mirrors the theme and unit into a key/value store.
//!
//! Persistence is optional. A store that forgets everything leaves the
//! defaults in place, and a value that cannot be decoded is skipped with a
//! warning rather than failing startup.

use homedash_domain::error::HomeDashError;
use homedash_domain::preferences::{TemperatureUnit, Theme};

use crate::ports::{EventPublisher, KeyValueStore};
use crate::state::AppStore;

/// Storage key of the theme preference.
pub const THEME_KEY: &str = "theme";
/// Storage key of the temperature unit preference.
pub const TEMPERATURE_UNIT_KEY: &str = "temperature_unit";

/// Loads and saves user preferences through a [`KeyValueStore`].
pub struct PreferenceService<S> {
    store: S,
}

impl<S: KeyValueStore> PreferenceService<S> {
    /// Create a new service backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Apply stored preferences to `app`. Missing keys keep the current value.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    #[tracing::instrument(skip_all)]
    pub async fn restore<P: EventPublisher>(&self, app: &AppStore<P>) -> Result<(), HomeDashError> {
        let stored_theme = self.load::<Theme>(THEME_KEY).await?;
        if stored_theme.is_some_and(|theme| theme != app.theme()) {
            app.toggle_theme();
        }
        if let Some(unit) = self.load::<TemperatureUnit>(TEMPERATURE_UNIT_KEY).await? {
            app.set_temperature_unit(unit);
        }
        Ok(())
    }

    /// Write the current theme and unit of `app` to the store.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    #[tracing::instrument(skip_all)]
    pub async fn save<P: EventPublisher>(&self, app: &AppStore<P>) -> Result<(), HomeDashError> {
        let theme = app.theme();
        let unit = app.temperature_unit();
        self.store
            .set(THEME_KEY, serde_json::Value::from(theme.as_str()))
            .await?;
        self.store
            .set(TEMPERATURE_UNIT_KEY, encode(unit))
            .await?;
        Ok(())
    }

    /// Remove every stored preference.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn clear(&self) -> Result<(), HomeDashError> {
        self.store.remove(THEME_KEY).await?;
        self.store.remove(TEMPERATURE_UNIT_KEY).await
    }

    async fn load<T: serde::de::DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, HomeDashError> {
        let Some(value) = self.store.get(key).await? else {
            return Ok(None);
        };
        match serde_json::from_value(value) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(err) => {
                tracing::warn!(%err, key, "ignoring undecodable stored preference");
                Ok(None)
            }
        }
    }
}

fn encode(unit: TemperatureUnit) -> serde_json::Value {
    match unit {
        TemperatureUnit::Celsius => "celsius".into(),
        TemperatureUnit::Fahrenheit => "fahrenheit".into(),
    }
}
