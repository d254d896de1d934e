use std::num::ParseIntError;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MockError>;

#[derive(Error, Debug)]
pub enum MockError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Transfer handle is not configured: {0}")]
    Unconfigured(String),
    #[error("Manifest error: {0}")]
    Manifest(String),
    #[error("Parsing error")]
    Parse,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ParseIntError> for MockError {
    fn from(_: ParseIntError) -> Self {
        Self::Parse
    }
}

impl From<serde_json::Error> for MockError {
    fn from(_: serde_json::Error) -> Self {
        Self::Parse
    }
}

impl From<hex::FromHexError> for MockError {
    fn from(value: hex::FromHexError) -> Self {
        Self::Manifest(value.to_string())
    }
}
