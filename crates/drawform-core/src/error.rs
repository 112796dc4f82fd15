//! Error types for the Drawform analysis engine.

use thiserror::Error;

use crate::landmarks::Landmark;

#[derive(Error, Debug)]
pub enum Error {
    #[error("required landmark {landmark:?} is missing from the frame")]
    MissingLandmark { landmark: Landmark },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
