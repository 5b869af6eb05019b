use elgato_light::{KeyLight, LightChange};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();

    let mut light = KeyLight::new("elgato-key-light.local");

    //Device information
    let info = light.info().await?;
    println!("{:?}", info);

    let settings = light.settings().await?;
    println!("{:?}", settings);

    let state = light.state().await?;
    println!("{:?}", state);

    //Toggle the light
    light.light(LightChange::new().on(!state.on)).await?;

    Ok(())
}
