use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatodeError {
    #[error("Unknown stat: {0}")]
    UnknownStat(String),

    #[error("Unknown player action: {0}")]
    UnknownAction(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CatodeError>;
