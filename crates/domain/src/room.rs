//! Room — a named grouping of devices shown as a card on the dashboard.

use serde::{Deserialize, Serialize};

use crate::error::{HomeDashError, ValidationError};
use crate::id::{DeviceId, RoomId};

/// A room and the ordered list of devices it shows.
///
/// The device list mirrors [`Device::room_id`](crate::device::Device::room_id),
/// which is the authoritative side of the relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub device_ids: Vec<DeviceId>,
}

impl Room {
    /// Create a builder for constructing a [`Room`].
    #[must_use]
    pub fn builder() -> RoomBuilder {
        RoomBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::Validation`] when the id or name is empty or
    /// a device is listed twice.
    pub fn validate(&self) -> Result<(), HomeDashError> {
        if self.id.is_empty() {
            return Err(ValidationError::EmptyId.into());
        }
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        for (index, device_id) in self.device_ids.iter().enumerate() {
            if self.device_ids[..index].contains(device_id) {
                return Err(ValidationError::DuplicateId {
                    kind: "device",
                    id: device_id.to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Whether the room lists `device_id`.
    #[must_use]
    pub fn contains(&self, device_id: &DeviceId) -> bool {
        self.device_ids.contains(device_id)
    }
}

/// Step-by-step builder for [`Room`].
#[derive(Debug, Default)]
pub struct RoomBuilder {
    id: Option<RoomId>,
    name: Option<String>,
    device_ids: Vec<DeviceId>,
}

impl RoomBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<RoomId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn device(mut self, device_id: impl Into<DeviceId>) -> Self {
        self.device_ids.push(device_id.into());
        self
    }

    /// Consume the builder, validate, and return a [`Room`].
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::Validation`] if `id` or `name` is missing,
    /// or a device is listed twice.
    pub fn build(self) -> Result<Room, HomeDashError> {
        let room = Room {
            id: self.id.unwrap_or_else(|| RoomId::new("")),
            name: self.name.unwrap_or_default(),
            device_ids: self.device_ids,
        };
        room.validate()?;
        Ok(room)
    }
}
