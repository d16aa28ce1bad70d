//! End-to-end tests over the wired dashboard: real store, mock weather and
//! the inert preference store.

use homedash::command::Command;
use homedash::config::Config;
use homedash::dashboard::{Dashboard, Outcome};
use homedash_app::ports::KeyValueStore;
use homedash_app::services::weather_service::{FetchOutcome, WeatherPolicy};
use homedash_domain::device::DeviceState;
use homedash_domain::error::{HomeDashError, ValidationError};
use homedash_domain::event::StateEvent;
use homedash_domain::preferences::{TemperatureUnit, Theme};
use homedash_domain::weather::UnitSystem;

/// Reads nothing back and refuses every write.
struct ReadOnlyStore;

fn refused() -> HomeDashError {
    HomeDashError::Storage(std::io::Error::other("read-only store").into())
}

impl KeyValueStore for ReadOnlyStore {
    async fn get(&self, _key: &str) -> Result<Option<serde_json::Value>, HomeDashError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: serde_json::Value) -> Result<(), HomeDashError> {
        Err(refused())
    }

    async fn remove(&self, _key: &str) -> Result<(), HomeDashError> {
        Err(refused())
    }
}

fn dashboard() -> Dashboard {
    Dashboard::from_config(&Config::default()).unwrap()
}

async fn run(dashboard: &Dashboard, line: &str) -> Result<Outcome, HomeDashError> {
    dashboard.execute(line.parse::<Command>().unwrap()).await
}

async fn fetched(outcome: Outcome) -> FetchOutcome {
    match outcome {
        Outcome::Fetching(handle) => handle.await.unwrap(),
        other => panic!("expected a weather fetch, got {other:?}"),
    }
}

#[tokio::test]
async fn should_load_default_city_weather_on_start() {
    let dashboard = dashboard();
    assert!(dashboard.weather_panel().reading.is_none());

    let outcome = dashboard.start().await.unwrap();

    assert!(outcome.is_applied());
    let panel = dashboard.weather_panel();
    assert_eq!(panel.display_city(), "Delhi");
    assert_eq!(panel.temperature_text(TemperatureUnit::Celsius), "41°C");
    assert!(dashboard.render().contains("Weather in Delhi: 41°C overcast"));
}

#[tokio::test]
async fn should_keep_defaults_with_inert_preference_store() {
    let dashboard = dashboard();
    dashboard.start().await.unwrap();
    assert_eq!(dashboard.store().theme(), Theme::Dark);
    assert_eq!(dashboard.store().temperature_unit(), TemperatureUnit::Celsius);
}

#[tokio::test]
async fn should_refetch_weather_in_new_unit() {
    let dashboard = dashboard();
    dashboard.start().await.unwrap();

    let outcome = fetched(run(&dashboard, "unit").await.unwrap()).await;

    assert_eq!(outcome.reading().temperature, 89);
    assert_eq!(dashboard.store().temperature_unit(), TemperatureUnit::Fahrenheit);
    assert!(dashboard.render().contains("89°F"));
}

#[tokio::test]
async fn should_refetch_weather_even_when_saving_unit_fails() {
    let dashboard = Dashboard::with_store(&Config::default(), ReadOnlyStore).unwrap();
    dashboard.start().await.unwrap();
    let mut updates = dashboard.weather_updates();

    let result = dashboard.execute(Command::ToggleUnit).await;
    assert!(matches!(result, Err(HomeDashError::Storage(_))));

    let panel = updates
        .wait_for(|panel| {
            !panel.loading
                && panel
                    .reading
                    .as_ref()
                    .is_some_and(|reading| reading.unit == UnitSystem::Imperial)
        })
        .await
        .unwrap()
        .clone();
    assert_eq!(panel.temperature_text(TemperatureUnit::Fahrenheit), "89°F");
}

#[tokio::test]
async fn should_show_cached_reading_in_its_own_unit_until_refetch_lands() {
    let dashboard = dashboard();
    dashboard.start().await.unwrap();

    let Ok(Outcome::Fetching(refetch)) = run(&dashboard, "unit").await else {
        panic!("expected a weather fetch");
    };
    assert!(dashboard.render().contains("41°C overcast | humidity 66% | wind 9 m/s"));

    refetch.await.unwrap();
    assert!(dashboard.render().contains("89°F overcast | humidity 66% | wind 9 mph"));
}

#[tokio::test]
async fn should_fetch_selected_city() {
    let dashboard = dashboard();
    dashboard.start().await.unwrap();

    fetched(run(&dashboard, "city London").await.unwrap()).await;

    let panel = dashboard.weather_panel();
    assert_eq!(panel.display_city(), "London");
    assert_eq!(panel.description_text(), "fog");
}

#[tokio::test]
async fn should_switch_room_and_show_its_devices() {
    let dashboard = dashboard();

    assert!(matches!(
        run(&dashboard, "room kitchen").await,
        Ok(Outcome::Render)
    ));

    let frame = dashboard.render();
    assert!(frame.contains(" > Kitchen [kitchen] 2 active"));
    assert!(frame.contains("Smart Fridge [fridge-1] on 4°C"));
    assert!(!frame.contains("Ceiling Light"));
}

#[tokio::test]
async fn should_apply_device_commands() {
    let dashboard = dashboard();

    run(&dashboard, "off light-1").await.unwrap();
    run(&dashboard, "brightness light-1 30").await.unwrap();
    run(&dashboard, "toggle ac-1").await.unwrap();
    run(&dashboard, "temp ac-1 19").await.unwrap();

    let store = dashboard.store();
    assert_eq!(
        store.device_state("light-1").unwrap(),
        DeviceState::power(false).with_brightness(30)
    );
    assert_eq!(
        store.device_state("ac-1").unwrap(),
        DeviceState::power(true).with_temperature(19)
    );
}

#[tokio::test]
async fn should_surface_store_errors_without_changing_state() {
    let dashboard = dashboard();

    assert!(matches!(
        run(&dashboard, "room garage").await,
        Err(HomeDashError::InvalidRoom(_))
    ));
    assert!(matches!(
        run(&dashboard, "toggle toaster").await,
        Err(HomeDashError::NotFound(_))
    ));
    assert!(matches!(
        run(&dashboard, "brightness light-1 150").await,
        Err(HomeDashError::Validation(ValidationError::OutOfRange { .. }))
    ));
    assert!(matches!(
        run(&dashboard, "brightness tv-1 10").await,
        Err(HomeDashError::Validation(ValidationError::NotApplicable { .. }))
    ));

    assert_eq!(dashboard.store().selected_room(), "living-room");
    assert!(dashboard.store().snapshot().overrides.is_empty());
}

#[tokio::test]
async fn should_publish_events_for_commands() {
    let dashboard = dashboard();
    let mut events = dashboard.events().subscribe();

    run(&dashboard, "room bedroom").await.unwrap();
    run(&dashboard, "theme").await.unwrap();

    assert!(matches!(
        events.try_recv().unwrap(),
        StateEvent::RoomSelected { .. }
    ));
    assert_eq!(
        events.try_recv().unwrap(),
        StateEvent::ThemeChanged { theme: Theme::Light }
    );
}

#[tokio::test]
async fn should_answer_informational_commands() {
    let dashboard = dashboard();

    let Ok(Outcome::Message(cities)) = run(&dashboard, "cities").await else {
        panic!("expected city list");
    };
    assert!(cities.contains("Toronto"));
    assert!(matches!(run(&dashboard, "quit").await, Ok(Outcome::Quit)));
}

#[tokio::test]
async fn should_reject_unknown_initial_room() {
    let mut config = Config::default();
    config.dashboard.initial_room = "attic".to_string();
    assert!(matches!(
        Dashboard::from_config(&config),
        Err(HomeDashError::InvalidRoom(_))
    ));
}

#[tokio::test]
async fn should_apply_configured_startup_preferences() {
    let mut config = Config::default();
    config.dashboard.initial_room = "bedroom".to_string();
    config.dashboard.temperature_unit = TemperatureUnit::Fahrenheit;
    config.dashboard.theme = Theme::Light;
    config.dashboard.city = "Tokyo".to_string();
    config.weather.policy = WeatherPolicy::LatestRequested;

    let dashboard = Dashboard::from_config(&config).unwrap();
    dashboard.start().await.unwrap();

    assert_eq!(dashboard.weather_policy(), WeatherPolicy::LatestRequested);

    assert_eq!(dashboard.store().selected_room(), "bedroom");
    assert_eq!(dashboard.store().theme(), Theme::Light);
    let panel = dashboard.weather_panel();
    assert_eq!(panel.display_city(), "Tokyo");
    assert_eq!(panel.reading.unwrap().unit.wind_speed_label(), "mph");
}
