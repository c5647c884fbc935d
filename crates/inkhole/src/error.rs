//! Binary error type with miette diagnostics.
//!
//! Maps API/core/config errors into user-facing diagnostics with help
//! text, an exit code, and a short form suitable for the on-panel
//! error placeholder.

use miette::Diagnostic;
use thiserror::Error;

use inkhole_core::CoreError;

use crate::config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const CONFIG: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum AppError {
    #[error("Configuration error")]
    #[diagnostic(
        code(inkhole::config),
        help("Check the config file (inkhole --config <path>) and INKHOLE_* environment variables.")
    )]
    Config(#[source] ConfigError),

    #[error("Authentication with the Pi-hole API failed")]
    #[diagnostic(
        code(inkhole::auth),
        help(
            "Verify the appliance password in your config.\n\
             An empty password disables authentication entirely."
        )
    )]
    Auth(#[source] inkhole_api::Error),

    #[error("Could not reach the Pi-hole API")]
    #[diagnostic(
        code(inkhole::connection),
        help("Check that the appliance is running and host/port are correct.")
    )]
    Connection(#[source] inkhole_api::Error),

    #[error("Pi-hole API request failed")]
    #[diagnostic(code(inkhole::api))]
    Api(#[source] inkhole_api::Error),

    #[error("Unsupported statistics schema")]
    #[diagnostic(
        code(inkhole::schema),
        help(
            "The appliance returned a payload with no known field mapping.\n\
             This build understands the v5 (flat) and v6 (nested) generations."
        )
    )]
    Schema(#[source] CoreError),

    #[error(transparent)]
    #[diagnostic(code(inkhole::io))]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => exit_code::CONFIG,
            Self::Auth(_) => exit_code::AUTH,
            Self::Connection(_) => exit_code::CONNECTION,
            _ => exit_code::GENERAL,
        }
    }

    /// Short message for the on-panel error placeholder.
    pub fn panel_message(&self) -> String {
        match self {
            Self::Config(_) => "Bad configuration".to_owned(),
            Self::Auth(_) => "Authentication failed".to_owned(),
            Self::Connection(_) => "Appliance unreachable".to_owned(),
            Self::Api(source) => format!("{source}"),
            Self::Schema(_) => "Unknown API schema".to_owned(),
            Self::Io(_) => "I/O failure".to_owned(),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<inkhole_api::Error> for AppError {
    fn from(err: inkhole_api::Error) -> Self {
        if err.is_auth_failure() {
            Self::Auth(err)
        } else if err.is_connection_failure() {
            Self::Connection(err)
        } else {
            Self::Api(err)
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Schema { .. } => Self::Schema(err),
            CoreError::Api(api) => Self::from(api),
        }
    }
}
