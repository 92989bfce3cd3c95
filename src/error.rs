use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(vacation_planner::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(vacation_planner::config))]
    Config(String),

    #[error("HTTP client error: {0}")]
    #[diagnostic(code(vacation_planner::http))]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    #[diagnostic(code(vacation_planner::url))]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    #[diagnostic(code(vacation_planner::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(vacation_planner::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(vacation_planner::other))]
    Other(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type PlannerResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Invalid environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
