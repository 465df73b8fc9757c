use std::error::Error;
use std::{fmt, io};

/// Errors raised at the configuration edges of the crate.
///
/// Conversion itself never fails; these only come from parsing modes and
/// directions out of strings, or from loading a [`ConvertProfile`](crate::profile::ConvertProfile).
#[derive(Debug)]
pub enum ZenhanError {
    InvalidMode(String),
    InvalidDirection(String),
    IoError(String),
    ParseError(String),
}

impl fmt::Display for ZenhanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZenhanError::InvalidMode(s) => write!(f, "Invalid mode: {}", s),
            ZenhanError::InvalidDirection(s) => write!(f, "Invalid direction: {}", s),
            ZenhanError::IoError(msg) => write!(f, "I/O Error: {}", msg),
            ZenhanError::ParseError(msg) => write!(f, "Parse Error: {}", msg),
        }
    }
}

impl Error for ZenhanError {}

impl From<io::Error> for ZenhanError {
    fn from(err: io::Error) -> Self {
        ZenhanError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for ZenhanError {
    fn from(err: serde_json::Error) -> Self {
        ZenhanError::ParseError(err.to_string())
    }
}
