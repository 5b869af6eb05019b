use std::time::Duration;

use log::debug;
use reqwest::Method;
use serde::de::{Deserialize, DeserializeOwned};
use serde_json::{json, Value};

use crate::error::ElgatoError;
use crate::models::{
    BatteryInfo, BatterySettings, EnergySavingChange, Info, LightChange, LightsResponse,
    PowerOnChange, Settings, State,
};

const DEFAULT_PORT: u16 = 9123;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);
const USER_AGENT: &str = concat!("elgato-light/", env!("CARGO_PKG_VERSION"));

/// Client for a single Elgato light.
///
/// One instance talks to one device at `host:port` over plain HTTP. Methods
/// take `&mut self`, so calls through a single instance are serialized by the
/// borrow checker. The read-modify-write operations ([`KeyLight::energy_saving`]
/// and [`KeyLight::power_on_behavior`]) are not atomic against writers using
/// another instance for the same device: the wire protocol has no concurrency
/// token.
#[derive(Debug)]
pub struct KeyLight {
    host: String,
    port: u16,
    request_timeout: Duration,
    session: Option<reqwest::Client>,
    has_battery: Option<bool>,
}

impl KeyLight {
    /// Create a client for the device at `host` (hostname or IP address),
    /// using the default port 9123 and an 8 second request timeout.
    pub fn new(host: impl Into<String>) -> KeyLight {
        KeyLight {
            host: host.into(),
            port: DEFAULT_PORT,
            request_timeout: DEFAULT_TIMEOUT,
            session: None,
            has_battery: None,
        }
    }

    pub fn with_port(mut self, port: u16) -> KeyLight {
        self.port = port;
        self
    }

    /// Set the wall-clock timeout applied to every request.
    pub fn with_timeout(mut self, timeout: Duration) -> KeyLight {
        self.request_timeout = timeout;
        self
    }

    /// Use a shared `reqwest::Client` instead of a lazily created one.
    ///
    /// `reqwest` clients are reference counted: the caller keeps ownership of
    /// the connection pool and dropping this `KeyLight` does not shut it down.
    pub fn with_client(mut self, client: reqwest::Client) -> KeyLight {
        self.session = Some(client);
        self
    }

    /// Get device information.
    pub async fn info(&mut self) -> Result<Info, ElgatoError> {
        let data = self.request(Method::GET, "accessory-info", None).await?;
        decode(&data)
    }

    /// Change the display name of the device.
    pub async fn display_name(&mut self, name: &str) -> Result<(), ElgatoError> {
        self.request(
            Method::PUT,
            "accessory-info",
            Some(json!({ "displayName": name })),
        )
        .await?;
        Ok(())
    }

    /// Get the current state of the light.
    pub async fn state(&mut self) -> Result<State, ElgatoError> {
        let data = self.request(Method::GET, "lights", None).await?;
        let response: LightsResponse = decode(&data)?;
        response
            .lights
            .into_iter()
            .next()
            .ok_or_else(|| ElgatoError::UnexpectedResponse {
                content_type: "application/json".to_string(),
                body: data.to_string(),
            })
    }

    /// Get device settings.
    ///
    /// The first successful call also records whether the device has a
    /// battery; see [`KeyLight::has_battery`].
    pub async fn settings(&mut self) -> Result<Settings, ElgatoError> {
        let data = self.request(Method::GET, "lights/settings", None).await?;
        let settings: Settings = decode(&data)?;
        if self.has_battery.is_none() {
            self.has_battery = Some(settings.battery.is_some());
        }
        Ok(settings)
    }

    /// Adjust the state of the light.
    ///
    /// Only the fields supplied in `change` are sent. Values are validated
    /// before any request is made: brightness 0-100, hue 0-360, saturation
    /// 0-100, temperature 143-344 mired, and temperature is mutually
    /// exclusive with hue/saturation. An empty change is rejected.
    pub async fn light(&mut self, change: LightChange) -> Result<(), ElgatoError> {
        change.validate()?;
        self.request(
            Method::PUT,
            "lights",
            Some(json!({ "numberOfLights": 1, "lights": [change] })),
        )
        .await?;
        Ok(())
    }

    /// Turn the light on or off.
    pub async fn set_power(&mut self, on: bool) -> Result<(), ElgatoError> {
        self.light(LightChange::new().on(on)).await
    }

    /// Set the brightness of the light, between 0 and 100.
    pub async fn set_brightness(&mut self, brightness: u8) -> Result<(), ElgatoError> {
        self.light(LightChange::new().brightness(brightness)).await
    }

    /// Set the color temperature of the light, in mired (143-344).
    pub async fn set_temperature(&mut self, temperature: u16) -> Result<(), ElgatoError> {
        self.light(LightChange::new().temperature(temperature)).await
    }

    /// Flash the light so the physical device can be identified.
    pub async fn identify(&mut self) -> Result<(), ElgatoError> {
        self.request(Method::POST, "identify", None).await?;
        Ok(())
    }

    /// Restart the device.
    pub async fn restart(&mut self) -> Result<(), ElgatoError> {
        self.request(Method::POST, "restart", None).await?;
        Ok(())
    }

    /// Whether the device has a battery.
    ///
    /// Derived from the device settings on first use and cached for the
    /// lifetime of this client; hardware capability does not hot-swap.
    pub async fn has_battery(&mut self) -> Result<bool, ElgatoError> {
        if let Some(has_battery) = self.has_battery {
            return Ok(has_battery);
        }
        self.settings().await?;
        Ok(self.has_battery.unwrap_or(false))
    }

    /// Get live battery telemetry.
    pub async fn battery(&mut self) -> Result<BatteryInfo, ElgatoError> {
        self.require_battery().await?;
        let data = self.request(Method::GET, "battery-info", None).await?;
        decode(&data)
    }

    /// Get the battery related settings of the device.
    pub async fn battery_settings(&mut self) -> Result<BatterySettings, ElgatoError> {
        let settings = self.settings().await?;
        settings.battery.ok_or(ElgatoError::NoBattery)
    }

    /// Enable or disable battery bypass ("studio mode").
    ///
    /// Firmware quirk: enabling bypass while the light is off can turn the
    /// light on while the device keeps reporting it as off. The command is
    /// passed through as-is.
    pub async fn battery_bypass(&mut self, on: bool) -> Result<(), ElgatoError> {
        self.require_battery().await?;
        self.request(
            Method::PUT,
            "lights/settings",
            Some(json!({ "battery": { "bypass": on as u8 } })),
        )
        .await?;
        Ok(())
    }

    /// Change the energy saving policy of a battery powered device.
    ///
    /// Reads the current policy, merges the supplied overrides onto it and
    /// writes the full policy back. Calling this with an empty change
    /// re-sends the current policy unchanged.
    pub async fn energy_saving(&mut self, change: EnergySavingChange) -> Result<(), ElgatoError> {
        self.require_battery().await?;
        let mut energy_saving = self.battery_settings().await?.energy_saving;

        if let Some(on) = change.on {
            energy_saving.enabled = on;
        }
        if let Some(level) = change.minimum_battery_level {
            energy_saving.minimum_battery_level = level;
        }
        if let Some(disable_wifi) = change.disable_wifi {
            energy_saving.disable_wifi = disable_wifi;
        }
        if let Some(adjust) = change.adjust_brightness {
            energy_saving.adjust_brightness.enabled = adjust;
        }
        if let Some(brightness) = change.brightness {
            energy_saving.adjust_brightness.brightness = brightness;
        }

        self.request(
            Method::PUT,
            "lights/settings",
            Some(json!({ "battery": { "energySaving": energy_saving } })),
        )
        .await?;
        Ok(())
    }

    /// Change what the light does when it powers on.
    ///
    /// Reads the current settings, merges the supplied overrides and writes
    /// the result back. The battery block has dedicated endpoints and is
    /// stripped before writing.
    pub async fn power_on_behavior(&mut self, change: PowerOnChange) -> Result<(), ElgatoError> {
        let mut settings = self.settings().await?;

        if let Some(behavior) = change.behavior {
            settings.power_on_behavior = behavior;
        }
        if let Some(brightness) = change.brightness {
            settings.power_on_brightness = brightness;
        }
        if let Some(hue) = change.hue {
            settings.power_on_hue = Some(hue);
        }
        if let Some(temperature) = change.temperature {
            settings.power_on_temperature = Some(temperature);
        }
        settings.battery = None;

        self.request(Method::PUT, "lights/settings", Some(json!(settings)))
            .await?;
        Ok(())
    }

    async fn require_battery(&mut self) -> Result<(), ElgatoError> {
        if self.has_battery().await? {
            Ok(())
        } else {
            Err(ElgatoError::NoBattery)
        }
    }

    /// Perform one request against the device API.
    ///
    /// `uri` is relative to the `/elgato/` base path. The payload does not
    /// pick the method; the method is always explicit.
    async fn request(
        &mut self,
        method: Method,
        uri: &str,
        payload: Option<Value>,
    ) -> Result<Value, ElgatoError> {
        let url = format!("http://{}:{}/elgato/{}", self.host, self.port, uri);

        let session = self
            .session
            .get_or_insert_with(reqwest::Client::new)
            .clone();

        debug!("{} {}", method, url);

        let mut builder = session
            .request(method, &url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json, text/plain, */*");
        if let Some(payload) = payload {
            builder = builder.json(&payload);
        }

        let result = tokio::time::timeout(self.request_timeout, async move {
            let response = builder.send().await?;
            let status = response.status();
            let content_type = response
                .headers()
                .get("Content-Type")
                .and_then(|value| value.to_str().ok())
                .unwrap_or("")
                .to_string();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>((status, content_type, body))
        })
        .await;

        let (status, content_type, body) = match result {
            Err(_) => {
                return Err(ElgatoError::Connection(
                    "Timeout occurred while connecting to the Elgato Light device".to_string(),
                ))
            }
            Ok(Err(err)) => {
                return Err(ElgatoError::Connection(format!(
                    "Error occurred while communicating with the Elgato Light device: {}",
                    err
                )))
            }
            Ok(Ok(parts)) => parts,
        };

        debug!("{} responded with HTTP {}", url, status);

        if !status.is_success() {
            return Err(ElgatoError::Connection(format!(
                "Elgato Light device responded with HTTP {}",
                status
            )));
        }

        if !content_type.contains("application/json") {
            return Err(ElgatoError::UnexpectedResponse { content_type, body });
        }

        // POST identify/restart and some PUTs answer with an empty body.
        if body.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|err| {
            debug!("response body is not valid JSON: {}", err);
            ElgatoError::UnexpectedResponse { content_type, body }
        })
    }
}

fn decode<T>(value: &Value) -> Result<T, ElgatoError>
where
    T: DeserializeOwned,
{
    T::deserialize(value).map_err(|err| {
        debug!("failed to decode device response: {}", err);
        ElgatoError::UnexpectedResponse {
            content_type: "application/json".to_string(),
            body: value.to_string(),
        }
    })
}
