use elgato_light::KeyLight;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();

    let mut light = KeyLight::new("elgato-key-light.local");

    //Current name
    println!("{}", light.info().await?.display_name);

    //Change the name
    light.display_name("New name").await?;

    //New name
    println!("{}", light.info().await?.display_name);

    Ok(())
}
