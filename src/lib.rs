//! Asynchronous client for the Elgato Key Light family.
//!
//! Talks to a single device over its local HTTP API: read device
//! information, settings, state and battery telemetry, adjust the light and
//! change device settings.
//!
//! ```no_run
//! use elgato_light::{KeyLight, LightChange};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut light = KeyLight::new("elgato-key-light.local");
//!
//!     //Toggle the light
//!     let state = light.state().await?;
//!     light.light(LightChange::new().on(!state.on)).await?;
//!
//!     Ok(())
//! }
//! ```

mod error;
mod keylight;
mod models;

pub use crate::error::ElgatoError;
pub use crate::keylight::KeyLight;
pub use crate::models::{
    AdjustBrightnessSettings, BatteryInfo, BatterySettings, BatteryStatus, EnergySavingChange,
    EnergySavingSettings, Info, LightChange, PowerOnBehavior, PowerOnChange, PowerSource, Settings,
    State, WifiInfo,
};
