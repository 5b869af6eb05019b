#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use elgato_light::KeyLight;

/// Load a JSON fixture from `tests/fixtures`.
pub fn load_fixture(name: &str) -> String {
    let path: PathBuf = [env!("CARGO_MANIFEST_DIR"), "tests", "fixtures", name]
        .iter()
        .collect();
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("missing fixture {}", name))
}

/// A client pointed at a local mock server, with a short timeout so broken
/// tests fail fast.
pub fn client_for(server: &mockito::Server) -> KeyLight {
    let host_with_port = server.host_with_port();
    let mut parts = host_with_port.split(':');
    let host = parts.next().expect("server host").to_string();
    let port: u16 = parts
        .next()
        .expect("server port")
        .parse()
        .expect("numeric server port");

    KeyLight::new(host)
        .with_port(port)
        .with_timeout(Duration::from_secs(2))
}
