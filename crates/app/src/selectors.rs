//! Derived view selectors.
//!
//! Pure functions over a [`Catalog`] and an [`AppState`] snapshot. Views call
//! them on every render instead of caching derived values, so a snapshot
//! change is reflected the next time anything is drawn.

use homedash_domain::catalog::Catalog;
use homedash_domain::device::{Device, DeviceCategory};
use homedash_domain::room::Room;

use crate::state::AppState;

/// Devices owned by `room_id`, in catalog order.
#[must_use]
pub fn devices_in_room<'a>(catalog: &'a Catalog, room_id: &str) -> Vec<&'a Device> {
    catalog
        .list_devices()
        .iter()
        .filter(|device| device.room_id == room_id)
        .collect()
}

/// Number of devices in `room_id` whose effective state is on.
#[must_use]
pub fn active_device_count(catalog: &Catalog, state: &AppState, room_id: &str) -> usize {
    devices_in_room(catalog, room_id)
        .into_iter()
        .filter(|device| state.effective_state(device).on)
        .count()
}

/// Short reading shown on a device card, `None` when the device is off or
/// has nothing to show.
///
/// Lights show their brightness (`"80%"`), air conditioners and fridges
/// their set-point in the current unit (`"24°C"`). A present zero is still
/// shown.
#[must_use]
pub fn live_reading(device: &Device, state: &AppState) -> Option<String> {
    let current = state.effective_state(device);
    if !current.on {
        return None;
    }
    match device.category {
        DeviceCategory::Light => current.brightness.map(|value| format!("{value}%")),
        DeviceCategory::AirConditioner | DeviceCategory::Refrigerator => current
            .temperature
            .map(|value| format!("{value}{}", state.temperature_unit)),
        DeviceCategory::Television => None,
    }
}

/// Glyph drawn on a device card.
///
/// The glyph is picked from the device's icon reference. The power flag is
/// accepted but does not change the result: every icon currently uses the
/// same glyph in both states.
#[must_use]
pub fn display_icon(device: &Device, _is_on: bool) -> &'static str {
    match device.icon.as_str() {
        "lightbulb-on-outline" => "\u{1F4A1}",
        "air-conditioner" => "\u{2744}\u{FE0F}",
        "television" => "\u{1F4FA}",
        "lamp" => "\u{1F56F}\u{FE0F}",
        "fridge-outline" => "\u{1F9CA}",
        _ => "\u{1F50C}",
    }
}

/// Devices of `room_id` laid out in rows of two for the grid view.
#[must_use]
pub fn device_rows<'a>(catalog: &'a Catalog, room_id: &str) -> Vec<Vec<&'a Device>> {
    devices_in_room(catalog, room_id)
        .chunks(2)
        .map(<[&Device]>::to_vec)
        .collect()
}

/// What a room card needs to render itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary<'a> {
    pub room: &'a Room,
    pub active_devices: usize,
    pub selected: bool,
}

/// One summary per room, in catalog order.
#[must_use]
pub fn room_summaries<'a>(catalog: &'a Catalog, state: &AppState) -> Vec<RoomSummary<'a>> {
    catalog
        .list_rooms()
        .iter()
        .map(|room| RoomSummary {
            room,
            active_devices: active_device_count(catalog, state, room.id.as_str()),
            selected: room.id == state.selected_room,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use homedash_domain::device::DeviceState;
    use homedash_domain::id::RoomId;
    use homedash_domain::preferences::TemperatureUnit;

    fn setup() -> (Catalog, AppState) {
        let catalog = Catalog::builtin().unwrap();
        let state = AppState::initial(RoomId::new("living-room"));
        (catalog, state)
    }

    fn ids(devices: &[&Device]) -> Vec<String> {
        devices.iter().map(|d| d.id.to_string()).collect()
    }

    #[test]
    fn should_list_room_devices_in_catalog_order() {
        let (catalog, _) = setup();
        let devices = devices_in_room(&catalog, "living-room");
        assert_eq!(ids(&devices), ["light-1", "ac-1", "tv-1"]);
    }

    #[test]
    fn should_return_no_devices_for_unknown_room() {
        let (catalog, _) = setup();
        assert!(devices_in_room(&catalog, "garage").is_empty());
    }

    #[test]
    fn should_count_two_active_devices_in_living_room_by_default() {
        let (catalog, state) = setup();
        assert_eq!(active_device_count(&catalog, &state, "living-room"), 2);
    }

    #[test]
    fn should_count_overrides_when_present() {
        let (catalog, mut state) = setup();
        state
            .overrides
            .insert("ac-1".into(), DeviceState::power(true).with_temperature(24));
        state.overrides.insert("tv-1".into(), DeviceState::power(false));
        assert_eq!(active_device_count(&catalog, &state, "living-room"), 2);
        state.overrides.insert("light-1".into(), DeviceState::power(false));
        assert_eq!(active_device_count(&catalog, &state, "living-room"), 1);
    }

    #[test]
    fn should_show_brightness_for_light_that_is_on() {
        let (catalog, state) = setup();
        let light = catalog.get_device("light-1").unwrap();
        assert_eq!(live_reading(light, &state).as_deref(), Some("80%"));
    }

    #[test]
    fn should_show_temperature_with_current_unit() {
        let (catalog, mut state) = setup();
        let fridge = catalog.get_device("fridge-1").unwrap();
        assert_eq!(live_reading(fridge, &state).as_deref(), Some("4°C"));
        state.temperature_unit = TemperatureUnit::Fahrenheit;
        assert_eq!(live_reading(fridge, &state).as_deref(), Some("4°F"));
    }

    #[test]
    fn should_return_none_for_every_device_that_is_off() {
        let (catalog, mut state) = setup();
        for device in catalog.list_devices() {
            let off = state.effective_state(device);
            state.overrides.insert(
                device.id.clone(),
                DeviceState {
                    on: false,
                    ..off
                },
            );
            assert_eq!(live_reading(device, &state), None, "{}", device.id);
        }
    }

    #[test]
    fn should_return_none_for_television() {
        let (catalog, state) = setup();
        let tv = catalog.get_device("tv-1").unwrap();
        assert_eq!(live_reading(tv, &state), None);
    }

    #[test]
    fn should_show_zero_brightness() {
        let (catalog, mut state) = setup();
        state
            .overrides
            .insert("light-3".into(), DeviceState::power(true).with_brightness(0));
        let light = catalog.get_device("light-3").unwrap();
        assert_eq!(live_reading(light, &state).as_deref(), Some("0%"));
    }

    #[test]
    fn should_return_same_icon_for_on_and_off() {
        let (catalog, _) = setup();
        for device in catalog.list_devices() {
            assert_eq!(display_icon(device, true), display_icon(device, false));
        }
        let tv = catalog.get_device("tv-1").unwrap();
        assert_eq!(display_icon(tv, true), "\u{1F4FA}");
    }

    #[test]
    fn should_fall_back_to_plug_icon_for_unknown_reference() {
        let device = Device::builder()
            .id("x")
            .name("X")
            .room_id("den")
            .icon("toaster")
            .build()
            .unwrap();
        assert_eq!(display_icon(&device, true), "\u{1F50C}");
    }

    #[test]
    fn should_group_devices_in_rows_of_two() {
        let (catalog, _) = setup();
        let rows = device_rows(&catalog, "living-room");
        assert_eq!(rows.len(), 2);
        assert_eq!(ids(&rows[0]), ["light-1", "ac-1"]);
        assert_eq!(ids(&rows[1]), ["tv-1"]);
    }

    #[test]
    fn should_summarize_every_room() {
        let (catalog, state) = setup();
        let summaries = room_summaries(&catalog, &state);
        let counts: Vec<(&str, usize, bool)> = summaries
            .iter()
            .map(|s| (s.room.id.as_str(), s.active_devices, s.selected))
            .collect();
        assert_eq!(
            counts,
            [
                ("living-room", 2, true),
                ("bedroom", 1, false),
                ("kitchen", 2, false)
            ]
        );
    }
}
