//! Catalog — the fixed set of rooms and devices the dashboard knows about.
//!
//! The catalog is built once and is read-only afterwards. Construction
//! checks that the two directions of the room/device relation agree:
//! every device points at an existing room, and every room lists exactly
//! the devices that point at it, in any order.

use std::collections::HashSet;

use crate::device::{Device, DeviceCategory, DeviceState};
use crate::error::{HomeDashError, NotFoundError, ValidationError};
use crate::id::{DeviceId, RoomId};
use crate::room::Room;

/// Room selected when the application starts.
pub const DEFAULT_ROOM: &str = "living-room";

/// Validated, immutable set of rooms and devices.
#[derive(Debug, Clone)]
pub struct Catalog {
    rooms: Vec<Room>,
    devices: Vec<Device>,
}

impl Catalog {
    /// Build a catalog after checking every invariant.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::Validation`] on duplicate ids, on a device
    /// pointing at an unknown room, or when a room's device list disagrees
    /// with the devices' `room_id`.
    pub fn new(rooms: Vec<Room>, devices: Vec<Device>) -> Result<Self, HomeDashError> {
        let mut room_ids = HashSet::new();
        for room in &rooms {
            room.validate()?;
            if !room_ids.insert(room.id.as_str()) {
                return Err(duplicate("room", room.id.as_str()));
            }
        }

        let mut device_ids = HashSet::new();
        for device in &devices {
            device.validate()?;
            if !device_ids.insert(device.id.as_str()) {
                return Err(duplicate("device", device.id.as_str()));
            }
            if !room_ids.contains(device.room_id.as_str()) {
                return Err(ValidationError::DanglingDevice {
                    device: device.id.to_string(),
                    room: device.room_id.to_string(),
                }
                .into());
            }
        }

        for room in &rooms {
            for device_id in &room.device_ids {
                let owned = devices
                    .iter()
                    .any(|d| d.id == *device_id && d.room_id == room.id);
                if !owned {
                    return Err(mismatch(&room.id, device_id));
                }
            }
            for device in devices.iter().filter(|d| d.room_id == room.id) {
                if !room.contains(&device.id) {
                    return Err(mismatch(&room.id, &device.id));
                }
            }
        }

        Ok(Self { rooms, devices })
    }

    /// The demo home: a living room, a bedroom and a kitchen.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the hardcoded data were inconsistent
    /// (covered by tests).
    pub fn builtin() -> Result<Self, HomeDashError> {
        let devices = vec![
            Device::builder()
                .id("light-1")
                .name("Ceiling Light")
                .category(DeviceCategory::Light)
                .icon("lightbulb-on-outline")
                .room_id("living-room")
                .default_state(DeviceState::power(true).with_brightness(80))
                .build()?,
            Device::builder()
                .id("ac-1")
                .name("Air Conditioner")
                .category(DeviceCategory::AirConditioner)
                .icon("air-conditioner")
                .room_id("living-room")
                .default_state(DeviceState::power(false).with_temperature(24))
                .build()?,
            Device::builder()
                .id("tv-1")
                .name("Smart TV")
                .category(DeviceCategory::Television)
                .icon("television")
                .room_id("living-room")
                .default_state(DeviceState::power(true))
                .build()?,
            Device::builder()
                .id("light-2")
                .name("Bedside Lamp")
                .category(DeviceCategory::Light)
                .icon("lamp")
                .room_id("bedroom")
                .default_state(DeviceState::power(false).with_brightness(40))
                .build()?,
            Device::builder()
                .id("ac-2")
                .name("Bedroom AC")
                .category(DeviceCategory::AirConditioner)
                .icon("air-conditioner")
                .room_id("bedroom")
                .default_state(DeviceState::power(true).with_temperature(22))
                .build()?,
            Device::builder()
                .id("light-3")
                .name("Kitchen Light")
                .category(DeviceCategory::Light)
                .icon("lightbulb-on-outline")
                .room_id("kitchen")
                .default_state(DeviceState::power(true).with_brightness(100))
                .build()?,
            Device::builder()
                .id("fridge-1")
                .name("Smart Fridge")
                .category(DeviceCategory::Refrigerator)
                .icon("fridge-outline")
                .room_id("kitchen")
                .default_state(DeviceState::power(true).with_temperature(4))
                .build()?,
        ];

        let rooms = vec![
            Room::builder()
                .id("living-room")
                .name("Living Room")
                .device("light-1")
                .device("ac-1")
                .device("tv-1")
                .build()?,
            Room::builder()
                .id("bedroom")
                .name("Bedroom")
                .device("light-2")
                .device("ac-2")
                .build()?,
            Room::builder()
                .id("kitchen")
                .name("Kitchen")
                .device("light-3")
                .device("fridge-1")
                .build()?,
        ];

        Self::new(rooms, devices)
    }

    /// All devices, in catalog order.
    #[must_use]
    pub fn list_devices(&self) -> &[Device] {
        &self.devices
    }

    /// All rooms, in catalog order.
    #[must_use]
    pub fn list_rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Look up a device by id.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] for an unknown id.
    pub fn get_device(&self, id: &str) -> Result<&Device, NotFoundError> {
        self.devices
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| NotFoundError {
                entity: "Device",
                id: id.to_string(),
            })
    }

    /// Look up a room by id.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] for an unknown id.
    pub fn get_room(&self, id: &str) -> Result<&Room, NotFoundError> {
        self.rooms
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| NotFoundError {
                entity: "Room",
                id: id.to_string(),
            })
    }

    #[must_use]
    pub fn contains_room(&self, id: &str) -> bool {
        self.rooms.iter().any(|r| r.id == id)
    }

    /// Room selected at startup: [`DEFAULT_ROOM`] when present, otherwise
    /// the first listed room.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] when the catalog has no rooms at all.
    pub fn default_room(&self) -> Result<&RoomId, NotFoundError> {
        self.get_room(DEFAULT_ROOM)
            .or_else(|err| self.rooms.first().ok_or(err))
            .map(|room| &room.id)
    }
}

fn duplicate(kind: &'static str, id: &str) -> HomeDashError {
    ValidationError::DuplicateId {
        kind,
        id: id.to_string(),
    }
    .into()
}

fn mismatch(room: &RoomId, device: &DeviceId) -> HomeDashError {
    ValidationError::RoomMismatch {
        room: room.to_string(),
        device: device.to_string(),
    }
    .into()
}
