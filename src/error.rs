use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, GameError>;
