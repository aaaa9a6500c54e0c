use crate::types::TurnId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid value '{value}' for '{field}'")]
    InvalidValue { field: &'static str, value: String },

    /// A patch addressed a turn that was never appended.
    #[error("No turn with id {0} in transcript")]
    UnknownTurn(TurnId),

    #[error("Turn {0} is not pending")]
    TurnNotPending(TurnId),

    #[error("No site has been created in this session")]
    NoCurrentSite,
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigParse(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::ConfigParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
