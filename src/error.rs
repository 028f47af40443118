use thiserror::Error;

use crate::input::InputError;
use crate::model::config::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("failed to write report: {0}")]
    Report(#[source] std::io::Error),
}

pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_IO: u8 = 3;
pub const EXIT_PARSE: u8 = 4;
pub const EXIT_INTEGRITY: u8 = 5;

impl AppError {
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) => EXIT_CONFIG,
            AppError::Input(e) if e.is_integrity() => EXIT_INTEGRITY,
            AppError::Input(e) if e.is_io() => EXIT_IO,
            AppError::Input(_) => EXIT_PARSE,
            AppError::Report(_) => EXIT_IO,
        }
    }
}
