use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JointmapError {
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid joint pattern: {0}")]
    PatternError(#[from] regex::Error),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Shape error: {0}")]
    ShapeError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Not found: {0}")]
    NotFound(String),
}
