//! Device settings retrieval and power-on behavior changes.

mod common;

use serde_json::json;

use elgato_light::{PowerOnBehavior, PowerOnChange};

#[tokio::test]
async fn settings_keylight() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/elgato/lights/settings")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(common::load_fixture("settings-keylight.json"))
        .create_async()
        .await;

    let mut light = common::client_for(&server);
    let settings = light.settings().await.expect("settings request failed");

    assert_eq!(settings.color_change_duration, 100);
    assert_eq!(settings.power_on_behavior, PowerOnBehavior::RestoreLast);
    assert_eq!(settings.power_on_brightness, 20);
    assert_eq!(settings.power_on_hue, None);
    assert_eq!(settings.power_on_saturation, None);
    assert_eq!(settings.power_on_temperature, Some(213));
    assert_eq!(settings.switch_off_duration, 300);
    assert_eq!(settings.switch_on_duration, 100);
    assert_eq!(settings.battery, None);
}

#[tokio::test]
async fn settings_led_strip() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/elgato/lights/settings")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(common::load_fixture("settings-strip.json"))
        .create_async()
        .await;

    let mut light = common::client_for(&server);
    let settings = light.settings().await.expect("settings request failed");

    assert_eq!(settings.color_change_duration, 150);
    assert_eq!(settings.power_on_behavior, PowerOnBehavior::UseDefaults);
    assert_eq!(settings.power_on_brightness, 40);
    assert_eq!(settings.power_on_hue, Some(40.0));
    assert_eq!(settings.power_on_saturation, Some(15.0));
    assert_eq!(settings.power_on_temperature, Some(0));
    assert_eq!(settings.switch_off_duration, 400);
    assert_eq!(settings.switch_on_duration, 150);
    assert_eq!(settings.battery, None);
}

#[tokio::test]
async fn settings_key_light_mini() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/elgato/lights/settings")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(common::load_fixture("settings-key-light-mini.json"))
        .create_async()
        .await;

    let mut light = common::client_for(&server);
    let settings = light.settings().await.expect("settings request failed");

    let battery = settings.battery.expect("battery settings missing");
    assert!(!battery.bypass);
    assert!(!battery.energy_saving.enabled);
    assert!(!battery.energy_saving.disable_wifi);
    assert_eq!(battery.energy_saving.minimum_battery_level, 15);
    assert_eq!(battery.energy_saving.adjust_brightness.brightness, 10);
    assert!(!battery.energy_saving.adjust_brightness.enabled);
    assert_eq!(settings.power_on_temperature, Some(230));
}

#[tokio::test]
async fn power_on_behavior_merges_and_strips_battery() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/elgato/lights/settings")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(common::load_fixture("settings-key-light-mini.json"))
        .create_async()
        .await;

    // The merged settings must carry the overrides and no battery block.
    let mock = server
        .mock("PUT", "/elgato/lights/settings")
        .match_body(mockito::Matcher::Json(json!({
            "colorChangeDurationMs": 100,
            "powerOnBehavior": 2,
            "powerOnBrightness": 50,
            "powerOnTemperature": 230,
            "switchOffDurationMs": 300,
            "switchOnDurationMs": 100
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create_async()
        .await;

    let mut light = common::client_for(&server);
    light
        .power_on_behavior(PowerOnChange {
            behavior: Some(PowerOnBehavior::UseDefaults),
            brightness: Some(50),
            ..Default::default()
        })
        .await
        .expect("power-on behavior change failed");
    mock.assert_async().await;
}

#[tokio::test]
async fn power_on_behavior_sets_hue_and_temperature() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/elgato/lights/settings")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(common::load_fixture("settings-keylight.json"))
        .create_async()
        .await;

    let mock = server
        .mock("PUT", "/elgato/lights/settings")
        .match_body(mockito::Matcher::Json(json!({
            "colorChangeDurationMs": 100,
            "powerOnBehavior": 1,
            "powerOnBrightness": 20,
            "powerOnHue": 40.0,
            "powerOnTemperature": 300,
            "switchOffDurationMs": 300,
            "switchOnDurationMs": 100
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create_async()
        .await;

    let mut light = common::client_for(&server);
    light
        .power_on_behavior(PowerOnChange {
            hue: Some(40.0),
            temperature: Some(300),
            ..Default::default()
        })
        .await
        .expect("power-on behavior change failed");
    mock.assert_async().await;
}
