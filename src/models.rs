use std::convert::TryFrom;

use serde::{Deserialize, Serialize};

/// Device information, as reported by the `accessory-info` endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    /// Configured display name, `"Elgato Light"` when the device has none.
    #[serde(default = "default_display_name", deserialize_with = "display_name")]
    pub display_name: String,
    /// Feature tags advertised by the device, e.g. `"lights"`.
    #[serde(default)]
    pub features: Vec<String>,
    pub firmware_build_number: u32,
    pub firmware_version: String,
    pub hardware_board_type: u32,
    /// Not reported by older firmware.
    #[serde(default)]
    pub mac_address: Option<String>,
    pub product_name: String,
    pub serial_number: String,
    /// Absent on devices that do not report Wi-Fi details.
    #[serde(rename = "wifi-info", default)]
    pub wifi: Option<WifiInfo>,
}

/// Wi-Fi details of the device.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WifiInfo {
    #[serde(rename = "frequencyMHz")]
    pub frequency_mhz: u32,
    pub rssi: i32,
    pub ssid: String,
}

fn default_display_name() -> String {
    "Elgato Light".to_string()
}

fn display_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let name = Option::<String>::deserialize(deserializer)?;
    Ok(name
        .filter(|name| !name.is_empty())
        .unwrap_or_else(default_display_name))
}

/// Device settings, as reported by the `lights/settings` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Color change transition time in milliseconds.
    #[serde(rename = "colorChangeDurationMs")]
    pub color_change_duration: u32,
    pub power_on_behavior: PowerOnBehavior,
    pub power_on_brightness: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_on_hue: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_on_saturation: Option<f64>,
    /// Power-on color temperature in mired.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_on_temperature: Option<u16>,
    /// Switch-off transition time in milliseconds.
    #[serde(rename = "switchOffDurationMs")]
    pub switch_off_duration: u32,
    /// Switch-on transition time in milliseconds.
    #[serde(rename = "switchOnDurationMs")]
    pub switch_on_duration: u32,
    /// Only present on battery powered devices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery: Option<BatterySettings>,
}

/// Battery related settings of a battery powered device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatterySettings {
    /// Studio mode: run from mains power only, leaving the battery alone.
    #[serde(with = "bool_int")]
    pub bypass: bool,
    pub energy_saving: EnergySavingSettings,
}

/// Policy that trades brightness and Wi-Fi for battery life below a
/// charge level threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergySavingSettings {
    pub adjust_brightness: AdjustBrightnessSettings,
    #[serde(with = "bool_int")]
    pub disable_wifi: bool,
    #[serde(rename = "enable", with = "bool_int")]
    pub enabled: bool,
    /// Battery level percentage below which the policy kicks in.
    pub minimum_battery_level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustBrightnessSettings {
    pub brightness: u8,
    #[serde(rename = "enable", with = "bool_int")]
    pub enabled: bool,
}

/// Current state of the light.
///
/// Either `temperature` or `hue`/`saturation` is set, depending on the color
/// mode the device is in; a device never reports both at once.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct State {
    #[serde(with = "bool_int")]
    pub on: bool,
    pub brightness: u8,
    #[serde(default)]
    pub hue: Option<f64>,
    #[serde(default)]
    pub saturation: Option<f64>,
    /// Color temperature in mired.
    #[serde(default)]
    pub temperature: Option<u16>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LightsResponse {
    pub lights: Vec<State>,
}

/// Live battery telemetry, as reported by the `battery-info` endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryInfo {
    pub power_source: PowerSource,
    /// Charge level in percent.
    pub level: f64,
    pub status: BatteryStatus,
    /// Battery voltage in mV.
    #[serde(rename = "currentBatteryVoltage")]
    pub voltage: u32,
    /// Charger input voltage in mV.
    pub input_charge_voltage: u32,
    /// Charger input current in mA.
    pub input_charge_current: u32,
}

impl BatteryInfo {
    /// Charger input power in mW.
    pub fn input_charge_power(&self) -> u32 {
        let microwatts =
            u64::from(self.input_charge_voltage) * u64::from(self.input_charge_current);
        (microwatts as f64 / 1000.0).round() as u32
    }

    /// Charger input voltage in V.
    pub fn charge_voltage(&self) -> f64 {
        round2(f64::from(self.input_charge_voltage) / 1000.0)
    }

    /// Charger input current in A.
    pub fn charge_current(&self) -> f64 {
        round2(f64::from(self.input_charge_current) / 1000.0)
    }

    /// Charger input power in W.
    pub fn charge_power(&self) -> f64 {
        round2(f64::from(self.input_charge_power()) / 1000.0)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// What the light does when it powers on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PowerOnBehavior {
    Unknown,
    /// Restore the state the light was in when it powered off.
    RestoreLast,
    /// Use the configured power-on defaults.
    UseDefaults,
}

impl TryFrom<u8> for PowerOnBehavior {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PowerOnBehavior::Unknown),
            1 => Ok(PowerOnBehavior::RestoreLast),
            2 => Ok(PowerOnBehavior::UseDefaults),
            other => Err(format!("invalid power-on behavior: {}", other)),
        }
    }
}

impl From<PowerOnBehavior> for u8 {
    fn from(value: PowerOnBehavior) -> Self {
        match value {
            PowerOnBehavior::Unknown => 0,
            PowerOnBehavior::RestoreLast => 1,
            PowerOnBehavior::UseDefaults => 2,
        }
    }
}

/// Power source the device is currently running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PowerSource {
    Unknown,
    Mains,
    Battery,
}

impl TryFrom<u8> for PowerSource {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PowerSource::Unknown),
            1 => Ok(PowerSource::Mains),
            2 => Ok(PowerSource::Battery),
            other => Err(format!("invalid power source: {}", other)),
        }
    }
}

impl From<PowerSource> for u8 {
    fn from(value: PowerSource) -> Self {
        match value {
            PowerSource::Unknown => 0,
            PowerSource::Mains => 1,
            PowerSource::Battery => 2,
        }
    }
}

/// Charging state of the battery.
///
/// The wire value 1 is unused by the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BatteryStatus {
    Draining,
    Charging,
    Charged,
}

impl TryFrom<u8> for BatteryStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(BatteryStatus::Draining),
            2 => Ok(BatteryStatus::Charging),
            3 => Ok(BatteryStatus::Charged),
            other => Err(format!("invalid battery status: {}", other)),
        }
    }
}

impl From<BatteryStatus> for u8 {
    fn from(value: BatteryStatus) -> Self {
        match value {
            BatteryStatus::Draining => 0,
            BatteryStatus::Charging => 2,
            BatteryStatus::Charged => 3,
        }
    }
}

/// A partial light state update.
///
/// Only the supplied fields are sent to the device; everything else is left
/// untouched. Temperature cannot be combined with hue or saturation in a
/// single update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LightChange {
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "opt_bool_int")]
    pub on: Option<bool>,
    /// Brightness, between 0 and 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<u8>,
    /// Hue, between 0 and 360.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hue: Option<f64>,
    /// Saturation, between 0 and 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturation: Option<f64>,
    /// Color temperature in mired, between 143 and 344.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<u16>,
}

impl LightChange {
    pub fn new() -> LightChange {
        LightChange::default()
    }

    pub fn on(mut self, on: bool) -> LightChange {
        self.on = Some(on);
        self
    }

    pub fn brightness(mut self, brightness: u8) -> LightChange {
        self.brightness = Some(brightness);
        self
    }

    pub fn hue(mut self, hue: f64) -> LightChange {
        self.hue = Some(hue);
        self
    }

    pub fn saturation(mut self, saturation: f64) -> LightChange {
        self.saturation = Some(saturation);
        self
    }

    pub fn temperature(mut self, temperature: u16) -> LightChange {
        self.temperature = Some(temperature);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), crate::error::ElgatoError> {
        use crate::error::ElgatoError;

        if self.on.is_none()
            && self.brightness.is_none()
            && self.hue.is_none()
            && self.saturation.is_none()
            && self.temperature.is_none()
        {
            return Err(ElgatoError::Validation(
                "No parameters to set, light not adjusted".to_string(),
            ));
        }

        if self.temperature.is_some() && (self.hue.is_some() || self.saturation.is_some()) {
            return Err(ElgatoError::Validation(
                "Cannot set temperature together with hue or saturation".to_string(),
            ));
        }

        if let Some(brightness) = self.brightness {
            if brightness > 100 {
                return Err(ElgatoError::Validation(
                    "Brightness not between 0 and 100".to_string(),
                ));
            }
        }

        if let Some(hue) = self.hue {
            if !(0.0..=360.0).contains(&hue) {
                return Err(ElgatoError::Validation(
                    "Hue not between 0 and 360".to_string(),
                ));
            }
        }

        if let Some(saturation) = self.saturation {
            if !(0.0..=100.0).contains(&saturation) {
                return Err(ElgatoError::Validation(
                    "Saturation not between 0 and 100".to_string(),
                ));
            }
        }

        if let Some(temperature) = self.temperature {
            if !(143..=344).contains(&temperature) {
                return Err(ElgatoError::Validation(
                    "Color temperature not between 143 and 344 mired".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Overrides for the energy saving policy of a battery powered device.
///
/// Unset fields keep their current value on the device.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnergySavingChange {
    pub on: Option<bool>,
    pub minimum_battery_level: Option<u8>,
    pub disable_wifi: Option<bool>,
    pub adjust_brightness: Option<bool>,
    pub brightness: Option<u8>,
}

/// Overrides for the power-on behavior settings.
///
/// Unset fields keep their current value on the device.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PowerOnChange {
    pub behavior: Option<PowerOnBehavior>,
    pub brightness: Option<u8>,
    pub hue: Option<f64>,
    pub temperature: Option<u16>,
}

/// The device transmits booleans as the integers 0 and 1.
pub(crate) mod bool_int {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(*value as u8)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(u8::deserialize(deserializer)? != 0)
    }
}

fn opt_bool_int<S>(value: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u8(value.unwrap_or(false) as u8)
}
