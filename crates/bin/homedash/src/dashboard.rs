//! Wired application: state container, weather service and preference sync
//! behind one command-driven facade.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use homedash_adapter_storage_noop::NoopStore;
use homedash_adapter_weather_mock::MockWeatherProvider;
use homedash_app::event_bus::InProcessEventBus;
use homedash_app::ports::KeyValueStore;
use homedash_app::services::preference_service::PreferenceService;
use homedash_app::services::weather_service::{
    FetchOutcome, WeatherPanel, WeatherPolicy, WeatherService,
};
use homedash_app::state::AppStore;
use homedash_domain::catalog::Catalog;
use homedash_domain::clock::DayPeriod;
use homedash_domain::device::DeviceStatePatch;
use homedash_domain::error::HomeDashError;

use crate::command::{Command, HELP};
use crate::config::Config;
use crate::render::{DashboardView, city_list};

type Bus = Arc<InProcessEventBus>;
type Weather = WeatherService<MockWeatherProvider, Bus>;

/// What the terminal loop should do after a command.
#[derive(Debug)]
pub enum Outcome {
    /// State changed or a redraw was asked for.
    Render,
    /// Print this text; nothing changed.
    Message(String),
    /// State changed and a weather fetch is now running in the background.
    Fetching(JoinHandle<FetchOutcome>),
    Quit,
}

/// Preferences are kept in `S`, the inert [`NoopStore`] unless another
/// store is injected.
pub struct Dashboard<S = NoopStore> {
    bus: Bus,
    store: AppStore<Bus>,
    weather: Arc<Weather>,
    preferences: PreferenceService<S>,
}

impl Dashboard {
    /// Build the catalog and services and apply the configured startup
    /// selection.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::InvalidRoom`] when the configured initial
    /// room is not in the catalog.
    pub fn from_config(config: &Config) -> Result<Self, HomeDashError> {
        Self::with_store(config, NoopStore)
    }
}

impl<S: KeyValueStore> Dashboard<S> {
    /// Same as [`Dashboard::from_config`], keeping preferences in `store`.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::InvalidRoom`] when the configured initial
    /// room is not in the catalog.
    pub fn with_store(config: &Config, store: S) -> Result<Self, HomeDashError> {
        let catalog = Arc::new(Catalog::builtin()?);
        let bus: Bus = Arc::new(InProcessEventBus::new(config.events.capacity));

        let app = AppStore::new(catalog, Arc::clone(&bus))?;
        app.select_room(&config.dashboard.initial_room)?;
        app.set_temperature_unit(config.dashboard.temperature_unit);
        if app.theme() != config.dashboard.theme {
            app.toggle_theme();
        }

        let weather = Arc::new(WeatherService::with_city(
            MockWeatherProvider,
            Arc::clone(&bus),
            config.weather.policy,
            &config.dashboard.city,
        ));

        Ok(Self {
            bus,
            store: app,
            weather,
            preferences: PreferenceService::new(store),
        })
    }

    /// Restore stored preferences, then load the weather of the configured
    /// city.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the preference store.
    pub async fn start(&self) -> Result<FetchOutcome, HomeDashError> {
        self.preferences.restore(&self.store).await?;
        let unit = self.store.temperature_unit().unit_system();
        Ok(self.weather.refresh(unit).await)
    }

    #[must_use]
    pub fn store(&self) -> &AppStore<Bus> {
        &self.store
    }

    #[must_use]
    pub fn events(&self) -> &InProcessEventBus {
        &self.bus
    }

    #[must_use]
    pub fn weather_policy(&self) -> WeatherPolicy {
        self.weather.policy()
    }

    #[must_use]
    pub fn weather_panel(&self) -> WeatherPanel {
        self.weather.panel()
    }

    /// Receiver woken whenever the weather panel changes.
    #[must_use]
    pub fn weather_updates(&self) -> watch::Receiver<WeatherPanel> {
        self.weather.subscribe()
    }

    /// Current frame as text.
    #[must_use]
    pub fn render(&self) -> String {
        let state = self.store.snapshot();
        let weather = self.weather.panel();
        DashboardView {
            catalog: self.store.catalog(),
            state: &state,
            weather: &weather,
            period: DayPeriod::current(),
        }
        .to_string()
    }

    /// Apply one command.
    ///
    /// Weather fetches are spawned, never awaited here, so input keeps being
    /// processed while they run.
    ///
    /// # Errors
    ///
    /// Returns the store's error when a room or device id is unknown or a
    /// value is rejected, and storage errors from saving preferences.
    pub async fn execute(&self, command: Command) -> Result<Outcome, HomeDashError> {
        match command {
            Command::Room(id) => self.store.select_room(&id)?,
            Command::Toggle(device) => {
                self.store.toggle_power(&device)?;
            }
            Command::Power { device, on } => {
                self.store.set_power(&device, on)?;
            }
            Command::Brightness { device, value } => {
                self.store
                    .set_device_state(&device, DeviceStatePatch::new().brightness(value))?;
            }
            Command::Temperature { device, value } => {
                self.store
                    .set_device_state(&device, DeviceStatePatch::new().temperature(value))?;
            }
            Command::ToggleUnit => {
                self.store.toggle_temperature_unit();
                let refetch = self.spawn_fetch(None);
                self.preferences.save(&self.store).await?;
                return Ok(Outcome::Fetching(refetch));
            }
            Command::ToggleTheme => {
                self.store.toggle_theme();
                self.preferences.save(&self.store).await?;
            }
            Command::City(name) => return Ok(Outcome::Fetching(self.spawn_fetch(Some(name)))),
            Command::Cities => return Ok(Outcome::Message(city_list())),
            Command::Help => return Ok(Outcome::Message(HELP.to_string())),
            Command::Show => {}
            Command::Quit => return Ok(Outcome::Quit),
        }
        Ok(Outcome::Render)
    }

    /// Fetch `city`, or refetch the current one, in the current unit.
    fn spawn_fetch(&self, city: Option<String>) -> JoinHandle<FetchOutcome> {
        let weather = Arc::clone(&self.weather);
        let unit = self.store.temperature_unit().unit_system();
        tokio::spawn(async move {
            match city {
                Some(city) => weather.fetch(&city, unit).await,
                None => weather.refresh(unit).await,
            }
        })
    }
}
