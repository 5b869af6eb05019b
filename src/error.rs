use thiserror::Error;

/// Errors raised while talking to an Elgato light.
#[derive(Error, Debug)]
pub enum ElgatoError {
    /// The device could not be reached: transport failure, timeout, or a
    /// response with a non-2xx HTTP status.
    #[error("{0}")]
    Connection(String),

    /// The device answered with a 2xx status but the body was not usable
    /// JSON. Carries the observed content type and the raw body.
    #[error("Unexpected response from the Elgato Light device (content type: {content_type})")]
    UnexpectedResponse { content_type: String, body: String },

    /// A battery operation was invoked on a device without a battery.
    #[error("The Elgato light does not have a battery.")]
    NoBattery,

    /// The supplied parameters were rejected before any request was made.
    #[error("{0}")]
    Validation(String),
}
