use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid arguments: {0}")]
    Args(#[from] pico_args::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
