#![forbid(unsafe_code)]

use thiserror::Error;

/// Error enumerates the errors returned by this application.
#[derive(Error, Debug)]
pub enum Errors {
    /// Input parameter logging.
    #[error("greeting_server input parameters:\n{}", .0)]
    InputParms(String),

    /// Logging subsystem could not be configured.
    #[error("Unable to initialize Log4rs console logging: {}", .0)]
    Log4rsInitialization(String),

    /// The configured address could not be bound.
    #[error("Unable to bind {}: {}", .0, .1)]
    BindError(String, String),
}
