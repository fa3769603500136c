use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Enumeration of all possible errors.
#[derive(Error, Clone, Debug, Serialize, Deserialize)]
pub enum Error {
    #[error("unexpected message: {0}")]
    UnexpectedMessage(String),
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("bincode error: {0}")]
    BincodeError(String),
    #[error("json error: {0}")]
    SerdeJsonError(String),
    #[cfg(feature = "msgpack_encoding")]
    #[error("msgpack error: {0}")]
    MsgPackError(String),

    #[error("parsing error: {0}")]
    ParsingError(String),

    #[error("other: {0}")]
    Other(String),
}

impl From<Box<bincode::ErrorKind>> for Error {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        Self::BincodeError(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::SerdeJsonError(e.to_string())
    }
}

#[cfg(feature = "msgpack_encoding")]
impl From<rmp_serde::encode::Error> for Error {
    fn from(e: rmp_serde::encode::Error) -> Self {
        Self::MsgPackError(e.to_string())
    }
}

#[cfg(feature = "msgpack_encoding")]
impl From<rmp_serde::decode::Error> for Error {
    fn from(e: rmp_serde::decode::Error) -> Self {
        Self::MsgPackError(e.to_string())
    }
}
