//! Plain-text rendering of one dashboard frame.
//!
//! Everything shown is recomputed from the snapshot through the selectors;
//! nothing is cached between frames.

use std::fmt;

use homedash_app::selectors::{device_rows, display_icon, live_reading, room_summaries};
use homedash_app::services::weather_service::WeatherPanel;
use homedash_app::state::AppState;
use homedash_domain::catalog::Catalog;
use homedash_domain::clock::DayPeriod;
use homedash_domain::device::Device;
use homedash_domain::energy::EnergyUsage;
use homedash_domain::weather::POPULAR_CITIES;

/// Borrowed inputs of a single frame.
pub struct DashboardView<'a> {
    pub catalog: &'a Catalog,
    pub state: &'a AppState,
    pub weather: &'a WeatherPanel,
    /// Drives the greeting line.
    pub period: DayPeriod,
}

impl fmt::Display for DashboardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} | theme: {}", self.period.greeting(), self.state.theme)?;
        self.fmt_weather(f)?;
        writeln!(f, "Energy today: {}", EnergyUsage::mock())?;
        writeln!(f)?;

        writeln!(f, "Rooms")?;
        for summary in room_summaries(self.catalog, self.state) {
            let marker = if summary.selected { '>' } else { ' ' };
            writeln!(
                f,
                " {marker} {} [{}] {} active",
                summary.room.name, summary.room.id, summary.active_devices
            )?;
        }
        writeln!(f)?;

        let room_id = self.state.selected_room.as_str();
        if let Ok(room) = self.catalog.get_room(room_id) {
            writeln!(f, "{}", room.name)?;
        }
        for row in device_rows(self.catalog, room_id) {
            let cells: Vec<String> = row.into_iter().map(|d| self.device_cell(d)).collect();
            writeln!(f, "  {}", cells.join("  |  "))?;
        }
        Ok(())
    }
}

impl DashboardView<'_> {
    fn fmt_weather(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let panel = self.weather;
        write!(
            f,
            "Weather in {}: {} {}",
            panel.display_city(),
            panel.temperature_text(self.state.temperature_unit),
            panel.description_text(),
        )?;
        if let Some(reading) = &panel.reading {
            write!(
                f,
                " | humidity {}% | wind {} {}",
                reading.humidity,
                reading.wind_speed,
                reading.unit.wind_speed_label()
            )?;
        }
        if panel.loading {
            write!(f, " (updating)")?;
        }
        writeln!(f)
    }

    fn device_cell(&self, device: &Device) -> String {
        let current = self.state.effective_state(device);
        let power = if current.on { "on" } else { "off" };
        let mut cell = format!(
            "{} {} [{}] {power}",
            display_icon(device, current.on),
            device.name,
            device.id
        );
        if let Some(reading) = live_reading(device, self.state) {
            cell.push(' ');
            cell.push_str(&reading);
        }
        cell
    }
}

/// Numbered list of suggested cities.
#[must_use]
pub fn city_list() -> String {
    POPULAR_CITIES
        .iter()
        .enumerate()
        .map(|(index, city)| format!("{:>2}. {city}", index + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use homedash_domain::id::RoomId;
    use homedash_domain::weather::{UnitSystem, WeatherCondition, WeatherReading};

    fn panel(reading: Option<WeatherReading>) -> WeatherPanel {
        WeatherPanel {
            city: "Delhi".to_string(),
            reading,
            loading: false,
            updated_at: None,
        }
    }

    fn frame(state: &AppState, weather: &WeatherPanel, hour: u32) -> String {
        let catalog = Catalog::builtin().unwrap();
        DashboardView {
            catalog: &catalog,
            state,
            weather,
            period: DayPeriod::from_hour(hour),
        }
        .to_string()
    }

    #[test]
    fn should_render_placeholder_weather_before_first_reading() {
        let state = AppState::initial(RoomId::new("living-room"));
        let text = frame(&state, &panel(None), 9);
        assert!(text.starts_with("Good morning | theme: dark\n"));
        assert!(text.contains("Weather in Delhi: --°C Loading..."));
        assert!(text.contains("Energy today: 2.3 kWh"));
    }

    #[test]
    fn should_render_reading_details() {
        let state = AppState::initial(RoomId::new("living-room"));
        let reading = WeatherReading {
            temperature: 41,
            unit: UnitSystem::Metric,
            condition: WeatherCondition::Overcast,
            humidity: 66,
            wind_speed: 9,
            city: "Delhi".to_string(),
        };
        let text = frame(&state, &panel(Some(reading)), 20);
        assert!(text.contains("Weather in Delhi: 41°C overcast | humidity 66% | wind 9 m/s"));
        assert!(text.starts_with("Good evening"));
    }

    #[test]
    fn should_mark_selected_room_and_list_its_devices_in_rows() {
        let state = AppState::initial(RoomId::new("living-room"));
        let text = frame(&state, &panel(None), 14);
        assert!(text.contains(" > Living Room [living-room] 2 active"));
        assert!(text.contains("   Bedroom [bedroom] 1 active"));
        assert!(text.contains("Ceiling Light [light-1] on 80%  |  "));
        assert!(text.contains("Air Conditioner [ac-1] off"));
        assert!(!text.contains("Bedside Lamp"));
    }

    #[test]
    fn should_number_popular_cities() {
        let list = city_list();
        assert!(list.starts_with(" 1. Delhi"));
        assert!(list.ends_with("14. Toronto"));
    }
}
