//! Device — a controllable appliance shown on the dashboard.
//!
//! Catalog devices are immutable. What changes at runtime is the
//! [`DeviceState`] layered on top of a device's default by the state
//! container.

use serde::{Deserialize, Serialize};

use crate::error::{HomeDashError, ValidationError};
use crate::id::{DeviceId, RoomId};

/// Kind of appliance. Decides which optional state fields apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceCategory {
    #[serde(rename = "light")]
    Light,
    #[serde(rename = "ac")]
    AirConditioner,
    #[serde(rename = "tv")]
    Television,
    #[serde(rename = "fridge")]
    Refrigerator,
}

impl DeviceCategory {
    /// Short lowercase name, matching the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::AirConditioner => "ac",
            Self::Television => "tv",
            Self::Refrigerator => "fridge",
        }
    }

    /// Only lights carry a brightness.
    #[must_use]
    pub fn supports_brightness(self) -> bool {
        matches!(self, Self::Light)
    }

    /// Air conditioners and fridges carry a set-point temperature.
    #[must_use]
    pub fn supports_temperature(self) -> bool {
        matches!(self, Self::AirConditioner | Self::Refrigerator)
    }
}

impl std::fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Power flag plus the category-specific readings of a device.
///
/// `None` means "not applicable", which is not the same as zero:
/// a light dimmed to `Some(0)` still has a brightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeviceState {
    pub on: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightness: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<i32>,
}

impl DeviceState {
    /// A bare power state with no category readings.
    #[must_use]
    pub fn power(on: bool) -> Self {
        Self {
            on,
            brightness: None,
            temperature: None,
        }
    }

    #[must_use]
    pub fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = Some(brightness);
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: i32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Field-level merge: every field set in `patch` replaces the current
    /// value, everything else is kept.
    #[must_use]
    pub fn merge(self, patch: &DeviceStatePatch) -> Self {
        Self {
            on: patch.on.unwrap_or(self.on),
            brightness: patch.brightness.or(self.brightness),
            temperature: patch.temperature.or(self.temperature),
        }
    }

    /// Check the optional readings against `category`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotApplicable`] when a reading is present
    /// on a category that does not support it, or
    /// [`ValidationError::OutOfRange`] for a brightness above 100.
    pub fn validate_for(&self, category: DeviceCategory) -> Result<(), ValidationError> {
        check_fields(category, self.brightness, self.temperature)
    }
}

/// Partial update applied to a device's effective state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeviceStatePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightness: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<i32>,
}

impl DeviceStatePatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on(mut self, on: bool) -> Self {
        self.on = Some(on);
        self
    }

    #[must_use]
    pub fn brightness(mut self, brightness: u8) -> Self {
        self.brightness = Some(brightness);
        self
    }

    #[must_use]
    pub fn temperature(mut self, temperature: i32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Check the patched readings against `category`.
    ///
    /// # Errors
    ///
    /// Same rules as [`DeviceState::validate_for`].
    pub fn validate_for(&self, category: DeviceCategory) -> Result<(), ValidationError> {
        check_fields(category, self.brightness, self.temperature)
    }
}

fn check_fields(
    category: DeviceCategory,
    brightness: Option<u8>,
    temperature: Option<i32>,
) -> Result<(), ValidationError> {
    if let Some(value) = brightness {
        if !category.supports_brightness() {
            return Err(ValidationError::NotApplicable {
                field: "brightness",
                category: category.as_str(),
            });
        }
        if value > 100 {
            return Err(ValidationError::OutOfRange {
                field: "brightness",
                min: 0,
                max: 100,
                actual: i32::from(value),
            });
        }
    }
    if temperature.is_some() && !category.supports_temperature() {
        return Err(ValidationError::NotApplicable {
            field: "temperature",
            category: category.as_str(),
        });
    }
    Ok(())
}

/// A catalog appliance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub category: DeviceCategory,
    /// Icon reference, resolved to a glyph by the presentation layer.
    pub icon: String,
    pub room_id: RoomId,
    pub default_state: DeviceState,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::Validation`] when the id or name is empty,
    /// or when the default state carries readings the category does not
    /// support.
    pub fn validate(&self) -> Result<(), HomeDashError> {
        if self.id.is_empty() || self.room_id.is_empty() {
            return Err(ValidationError::EmptyId.into());
        }
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        self.default_state.validate_for(self.category)?;
        Ok(())
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    name: Option<String>,
    category: DeviceCategory,
    icon: Option<String>,
    room_id: Option<RoomId>,
    default_state: DeviceState,
}

impl Default for DeviceBuilder {
    fn default() -> Self {
        Self {
            id: None,
            name: None,
            category: DeviceCategory::Light,
            icon: None,
            room_id: None,
            default_state: DeviceState::default(),
        }
    }
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<DeviceId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category: DeviceCategory) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn room_id(mut self, room_id: impl Into<RoomId>) -> Self {
        self.room_id = Some(room_id.into());
        self
    }

    #[must_use]
    pub fn default_state(mut self, state: DeviceState) -> Self {
        self.default_state = state;
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// # Errors
    ///
    /// Returns [`HomeDashError::Validation`] if a required field is missing
    /// or the default state does not fit the category.
    pub fn build(self) -> Result<Device, HomeDashError> {
        let device = Device {
            id: self.id.unwrap_or_else(|| DeviceId::new("")),
            name: self.name.unwrap_or_default(),
            category: self.category,
            icon: self.icon.unwrap_or_default(),
            room_id: self.room_id.unwrap_or_else(|| RoomId::new("")),
            default_state: self.default_state,
        };
        device.validate()?;
        Ok(device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lamp() -> Device {
        Device::builder()
            .id("light-9")
            .name("Desk Lamp")
            .category(DeviceCategory::Light)
            .icon("lamp")
            .room_id("office")
            .default_state(DeviceState::power(true).with_brightness(80))
            .build()
            .unwrap()
    }

    #[test]
    fn should_build_valid_device_when_all_fields_provided() {
        let device = lamp();
        assert_eq!(device.id, "light-9");
        assert_eq!(device.room_id, "office");
        assert_eq!(device.default_state.brightness, Some(80));
    }

    #[test]
    fn should_reject_device_without_name() {
        let result = Device::builder().id("x").room_id("office").build();
        assert!(matches!(
            result,
            Err(HomeDashError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_reject_device_without_room() {
        let result = Device::builder().id("x").name("X").build();
        assert!(matches!(
            result,
            Err(HomeDashError::Validation(ValidationError::EmptyId))
        ));
    }

    #[test]
    fn should_reject_brightness_on_air_conditioner_default() {
        let result = Device::builder()
            .id("ac-9")
            .name("AC")
            .category(DeviceCategory::AirConditioner)
            .room_id("office")
            .default_state(DeviceState::power(false).with_brightness(10))
            .build();
        assert!(matches!(
            result,
            Err(HomeDashError::Validation(ValidationError::NotApplicable {
                field: "brightness",
                category: "ac"
            }))
        ));
    }

    #[test]
    fn should_keep_unpatched_fields_when_merging() {
        let state = DeviceState::power(true).with_brightness(80);
        let merged = state.merge(&DeviceStatePatch::new().on(false));
        assert_eq!(merged, DeviceState::power(false).with_brightness(80));
    }

    #[test]
    fn should_replace_brightness_with_zero_when_patched() {
        let state = DeviceState::power(true).with_brightness(80);
        let merged = state.merge(&DeviceStatePatch::new().brightness(0));
        assert_eq!(merged.brightness, Some(0));
        assert!(merged.on);
    }

    #[test]
    fn should_leave_state_untouched_when_patch_is_empty() {
        let state = DeviceState::power(false).with_temperature(24);
        assert_eq!(state.merge(&DeviceStatePatch::new()), state);
    }

    #[test]
    fn should_reject_temperature_patch_for_television() {
        let patch = DeviceStatePatch::new().temperature(20);
        assert!(matches!(
            patch.validate_for(DeviceCategory::Television),
            Err(ValidationError::NotApplicable {
                field: "temperature",
                ..
            })
        ));
    }

    #[test]
    fn should_reject_brightness_above_one_hundred() {
        let patch = DeviceStatePatch::new().brightness(101);
        assert!(matches!(
            patch.validate_for(DeviceCategory::Light),
            Err(ValidationError::OutOfRange { actual: 101, .. })
        ));
    }

    #[test]
    fn should_accept_temperature_for_refrigerator() {
        let patch = DeviceStatePatch::new().temperature(-18);
        assert!(patch.validate_for(DeviceCategory::Refrigerator).is_ok());
    }

    #[test]
    fn should_omit_absent_readings_when_serialized() {
        let json = serde_json::to_string(&DeviceState::power(true)).unwrap();
        assert_eq!(json, r#"{"on":true}"#);
    }

    #[test]
    fn should_serialize_category_with_short_name() {
        let json = serde_json::to_string(&DeviceCategory::AirConditioner).unwrap();
        assert_eq!(json, "\"ac\"");
    }
}
