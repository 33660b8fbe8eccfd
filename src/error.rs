use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No configuration directory available on this system")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, ConfigError>;
