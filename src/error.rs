use std::{error::Error as StdError, fmt, io, result::Result as StdResult};

use crate::markup::MathError;

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Json(serde_json::Error),
    Math(MathError),
    /// A draft or patch failed field validation.
    Invalid(String),
    /// The shared passphrase did not match.
    AccessDenied,
    NotFound(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {e}"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::Math(e) => write!(f, "Math error: {e}"),
            Self::Invalid(msg) => write!(f, "Invalid proof: {msg}"),
            Self::AccessDenied => write!(f, "Incorrect password. Access denied."),
            Self::NotFound(id) => write!(f, "No proof with id '{id}'"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Math(e) => Some(e),
            Self::Invalid(_) | Self::AccessDenied | Self::NotFound(_) => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<MathError> for Error {
    fn from(e: MathError) -> Self {
        Self::Math(e)
    }
}

pub type Result<T> = StdResult<T, Error>;
