//! Error types for panelfit

use thiserror::Error;

/// panelfit error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error (bad or inconsistent pipeline config)
    #[error("Config error: {0}")]
    Config(String),

    /// Data error (missing column, schema mismatch, empty group)
    #[error("Data error: {0}")]
    Data(String),

    /// Computation error (singular design matrix, degenerate dof)
    #[error("Computation error: {0}")]
    Computation(String),

    /// Chart rendering error
    #[error("Render error: {0}")]
    Render(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
