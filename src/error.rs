// src/error.rs
//! Error types for the hex map client

use std::fmt;

pub type Result<T> = std::result::Result<T, HexError>;

#[derive(Debug)]
pub enum HexError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Http(reqwest::Error),
    InvalidCampaign(String),
    Backend(String),
    Storage(String),
    Other(String),
}

impl fmt::Display for HexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HexError::Io(e) => write!(f, "IO error: {}", e),
            HexError::Json(e) => write!(f, "JSON error: {}", e),
            HexError::Http(e) => write!(f, "HTTP error: {}", e),
            HexError::InvalidCampaign(msg) => write!(f, "Invalid campaign: {}", msg),
            HexError::Backend(msg) => write!(f, "Backend error: {}", msg),
            HexError::Storage(msg) => write!(f, "Storage error: {}", msg),
            HexError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for HexError {}

impl From<std::io::Error> for HexError {
    fn from(error: std::io::Error) -> Self {
        HexError::Io(error)
    }
}

impl From<serde_json::Error> for HexError {
    fn from(error: serde_json::Error) -> Self {
        HexError::Json(error)
    }
}

impl From<reqwest::Error> for HexError {
    fn from(error: reqwest::Error) -> Self {
        HexError::Http(error)
    }
}

impl From<anyhow::Error> for HexError {
    fn from(error: anyhow::Error) -> Self {
        HexError::Other(error.to_string())
    }
}
