//! Application state container.
//!
//! [`AppStore`] is the single source of truth read by every view. It holds an
//! [`AppState`] snapshot in a tokio [`watch`] channel: a mutation replaces the
//! snapshot, wakes every receiver, and then publishes one [`StateEvent`], all
//! before the mutating call returns.
//!
//! Device state is stored sparsely. A device without an entry in
//! [`AppState::overrides`] shows its catalog default.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::watch;

use homedash_domain::catalog::Catalog;
use homedash_domain::device::{Device, DeviceState, DeviceStatePatch};
use homedash_domain::error::{HomeDashError, InvalidRoomError};
use homedash_domain::event::StateEvent;
use homedash_domain::id::{DeviceId, RoomId};
use homedash_domain::preferences::{TemperatureUnit, Theme};

use crate::ports::EventPublisher;

/// Snapshot of everything the user can change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// Always a room of the catalog.
    pub selected_room: RoomId,
    pub overrides: HashMap<DeviceId, DeviceState>,
    pub temperature_unit: TemperatureUnit,
    pub theme: Theme,
}

impl AppState {
    /// Startup state: `selected_room`, no overrides, Celsius, dark theme.
    #[must_use]
    pub fn initial(selected_room: RoomId) -> Self {
        Self {
            selected_room,
            overrides: HashMap::new(),
            temperature_unit: TemperatureUnit::default(),
            theme: Theme::default(),
        }
    }

    /// Override if present, catalog default otherwise.
    #[must_use]
    pub fn effective_state(&self, device: &Device) -> DeviceState {
        self.overrides
            .get(&device.id)
            .copied()
            .unwrap_or(device.default_state)
    }
}

/// Owns the [`AppState`] and validates every mutation against the catalog.
pub struct AppStore<P> {
    catalog: Arc<Catalog>,
    state: watch::Sender<AppState>,
    publisher: P,
}

impl<P: EventPublisher> AppStore<P> {
    /// Create a store positioned on the catalog's default room.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::NotFound`] if the catalog has no rooms.
    pub fn new(catalog: Arc<Catalog>, publisher: P) -> Result<Self, HomeDashError> {
        let room = catalog.default_room()?.clone();
        Ok(Self {
            state: watch::Sender::new(AppState::initial(room)),
            catalog,
            publisher,
        })
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Clone of the current state.
    #[must_use]
    pub fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every future snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn selected_room(&self) -> RoomId {
        self.state.borrow().selected_room.clone()
    }

    /// Select the room whose devices are displayed.
    ///
    /// Selecting the current room again is a no-op and emits nothing.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::InvalidRoom`] when `id` is not in the catalog;
    /// the selection is left unchanged.
    pub fn select_room(&self, id: &str) -> Result<(), HomeDashError> {
        let room = match self.catalog.get_room(id) {
            Ok(room) => room.id.clone(),
            Err(_) => {
                tracing::warn!(room = id, "rejected selection of unknown room");
                return Err(InvalidRoomError { id: id.to_string() }.into());
            }
        };

        let mut previous = None;
        self.state.send_if_modified(|state| {
            if state.selected_room == room {
                return false;
            }
            previous = Some(std::mem::replace(&mut state.selected_room, room.clone()));
            true
        });

        if let Some(from) = previous {
            tracing::debug!(from = %from, to = %room, "room selected");
            self.publisher
                .publish(StateEvent::RoomSelected { from, to: room });
        }
        Ok(())
    }

    /// Effective state of a device.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::NotFound`] for an unknown device id.
    pub fn device_state(&self, id: &str) -> Result<DeviceState, HomeDashError> {
        let device = self.catalog.get_device(id)?;
        Ok(self.state.borrow().effective_state(device))
    }

    /// Merge `patch` into the device's effective state and keep the result as
    /// its override. Fields absent from the patch keep their current value.
    /// The catalog default is never touched.
    ///
    /// Returns the new effective state.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::NotFound`] for an unknown device id, or
    /// [`HomeDashError::Validation`] when the patch sets a reading the
    /// device's category does not have.
    pub fn set_device_state(
        &self,
        id: &str,
        patch: DeviceStatePatch,
    ) -> Result<DeviceState, HomeDashError> {
        let device = self.catalog.get_device(id)?;
        patch.validate_for(device.category)?;

        let mut merged = device.default_state;
        self.state.send_modify(|state| {
            merged = state.effective_state(device).merge(&patch);
            state.overrides.insert(device.id.clone(), merged);
        });

        tracing::debug!(device = %device.id, on = merged.on, "device state updated");
        self.publisher.publish(StateEvent::DeviceStateChanged {
            device_id: device.id.clone(),
            state: merged,
        });
        Ok(merged)
    }

    /// Turn a device on or off, keeping its other readings.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::NotFound`] for an unknown device id.
    pub fn set_power(&self, id: &str, on: bool) -> Result<DeviceState, HomeDashError> {
        self.set_device_state(id, DeviceStatePatch::new().on(on))
    }

    /// Flip a device's power flag.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::NotFound`] for an unknown device id.
    pub fn toggle_power(&self, id: &str) -> Result<DeviceState, HomeDashError> {
        let current = self.device_state(id)?;
        self.set_power(id, !current.on)
    }

    #[must_use]
    pub fn temperature_unit(&self) -> TemperatureUnit {
        self.state.borrow().temperature_unit
    }

    /// Change the display unit. Setting the current unit emits nothing.
    pub fn set_temperature_unit(&self, unit: TemperatureUnit) {
        let changed = self.state.send_if_modified(|state| {
            if state.temperature_unit == unit {
                return false;
            }
            state.temperature_unit = unit;
            true
        });
        if changed {
            tracing::debug!(unit = unit.symbol(), "temperature unit changed");
            self.publisher
                .publish(StateEvent::TemperatureUnitChanged { unit });
        }
    }

    /// Switch between Celsius and Fahrenheit, returning the new unit.
    pub fn toggle_temperature_unit(&self) -> TemperatureUnit {
        let unit = self.temperature_unit().toggled();
        self.set_temperature_unit(unit);
        unit
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.state.borrow().theme
    }

    /// Switch between the dark and light themes, returning the new theme.
    pub fn toggle_theme(&self) -> Theme {
        let mut theme = Theme::default();
        self.state.send_modify(|state| {
            state.theme = state.theme.toggled();
            theme = state.theme;
        });
        tracing::debug!(%theme, "theme toggled");
        self.publisher.publish(StateEvent::ThemeChanged { theme });
        theme
    }
}
