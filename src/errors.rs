use thiserror::Error;

/// Errors surfaced by the analytics layer.
///
/// The engine's leaf functions are total on well-formed input; only the
/// snapshot validation pass and the service facade produce errors.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}
