use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

pub const DEFAULT_THRESHOLD: i32 = 100;
pub const DEFAULT_LEVEL: i32 = 0;
pub const DEFAULT_SPEED: i32 = 255;
pub const DEFAULT_IS_ACTIVE: bool = false;
pub const DEFAULT_THRESHOLD_OFFSET: i32 = 0;

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorState {
    /// Sensor pin, identifies the state record
    pub pin: u8,
    /// Level at which the pump is triggered, set by clients
    pub threshold: i32,
    /// Last reading, reported by the device
    pub level: i32,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PumpState {
    /// Pump pin
    pub pin: u8,
    /// Pump speed, set by clients
    pub speed: i32,
    /// Whether the pump is running, reported by the device
    pub is_active: bool,
    /// Hysteresis currently applied to the threshold, reported by the device
    pub threshold_offset: i32,
}

/// Canonical record for one sensor/pump pair
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub sensor: SensorState,
    pub pump: PumpState,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSensorState {
    pub pin: u8,
    pub threshold: i32,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientPumpState {
    pub pin: u8,
    pub speed: i32,
}

/// Fields of a [`State`] owned by configuring clients
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientState {
    pub sensor: ClientSensorState,
    pub pump: ClientPumpState,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSensorState {
    pub pin: u8,
    pub level: i32,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicePumpState {
    pub pin: u8,
    pub is_active: bool,
    pub threshold_offset: i32,
}

/// Fields of a [`State`] owned by the device firmware
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceState {
    pub sensor: DeviceSensorState,
    pub pump: DevicePumpState,
}

/// Field-level patch for a [`State`].
///
/// Both partial shapes are normalized into this before merging. Pins are
/// always present; every other field is only written when `Some`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatePatch {
    pub sensor_pin: u8,
    pub pump_pin: u8,
    pub threshold: Option<i32>,
    pub level: Option<i32>,
    pub speed: Option<i32>,
    pub is_active: Option<bool>,
    pub threshold_offset: Option<i32>,
}

impl From<ClientState> for StatePatch {
    fn from(value: ClientState) -> Self {
        Self {
            sensor_pin: value.sensor.pin,
            pump_pin: value.pump.pin,
            threshold: Some(value.sensor.threshold),
            speed: Some(value.pump.speed),
            ..Default::default()
        }
    }
}

impl From<DeviceState> for StatePatch {
    fn from(value: DeviceState) -> Self {
        Self {
            sensor_pin: value.sensor.pin,
            pump_pin: value.pump.pin,
            level: Some(value.sensor.level),
            is_active: Some(value.pump.is_active),
            threshold_offset: Some(value.pump.threshold_offset),
            ..Default::default()
        }
    }
}

/// Who submitted a batch of partial states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateSource {
    Client,
    Device,
}

/// A batch of partial states, all from the same submitter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateUpdate {
    Client(Vec<ClientState>),
    Device(Vec<DeviceState>),
}

impl StateUpdate {
    pub fn source(&self) -> StateSource {
        match self {
            StateUpdate::Client(_) => StateSource::Client,
            StateUpdate::Device(_) => StateSource::Device,
        }
    }

    pub fn into_patches(self) -> Vec<StatePatch> {
        match self {
            StateUpdate::Client(states) => states.into_iter().map(StatePatch::from).collect(),
            StateUpdate::Device(states) => states.into_iter().map(StatePatch::from).collect(),
        }
    }
}

impl State {
    /// Build a new record from a patch, filling unset fields with defaults.
    pub fn from_patch(patch: &StatePatch) -> Self {
        Self {
            sensor: SensorState {
                pin: patch.sensor_pin,
                threshold: patch.threshold.unwrap_or(DEFAULT_THRESHOLD),
                level: patch.level.unwrap_or(DEFAULT_LEVEL),
            },
            pump: PumpState {
                pin: patch.pump_pin,
                speed: patch.speed.unwrap_or(DEFAULT_SPEED),
                is_active: patch.is_active.unwrap_or(DEFAULT_IS_ACTIVE),
                threshold_offset: patch.threshold_offset.unwrap_or(DEFAULT_THRESHOLD_OFFSET),
            },
        }
    }

    /// Overwrite the fields carried by `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &StatePatch) {
        self.sensor.pin = patch.sensor_pin;
        self.pump.pin = patch.pump_pin;

        if let Some(threshold) = patch.threshold {
            self.sensor.threshold = threshold;
        }
        if let Some(level) = patch.level {
            self.sensor.level = level;
        }
        if let Some(speed) = patch.speed {
            self.pump.speed = speed;
        }
        if let Some(is_active) = patch.is_active {
            self.pump.is_active = is_active;
        }
        if let Some(threshold_offset) = patch.threshold_offset {
            self.pump.threshold_offset = threshold_offset;
        }
    }
}
