//! Error types for the library

use std::io;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("post {0} not found")]
    NotFound(u64),

    #[error("{field} is {len} characters long, at most {max} allowed")]
    FieldTooLong {
        field: &'static str,
        max: usize,
        len: usize,
    },

    #[error("{field} must not be empty")]
    FieldRequired { field: &'static str },

    #[error("unsupported store version {found}, expected {expected}")]
    StoreVersion { found: u32, expected: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}
