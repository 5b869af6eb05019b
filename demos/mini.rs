use elgato_light::KeyLight;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();

    //A battery powered device, like the Key Light Mini
    let mut light = KeyLight::new("10.10.11.172");

    //General device information
    println!("{:?}", light.info().await?);
    println!("{:?}", light.settings().await?);
    let state = light.state().await?;
    println!("{:?}", state);

    //General battery information
    let battery = light.battery().await?;
    println!("Level: {} %", battery.level);
    println!("Power: {} W", battery.charge_power());
    println!("Voltage: {} V", battery.charge_voltage());
    println!("Current: {} A", battery.charge_current());

    //Toggle the light
    light.set_power(!state.on).await?;

    Ok(())
}
