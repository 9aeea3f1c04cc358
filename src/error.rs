use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChurnlogError>;

#[derive(Error, Debug)]
pub enum ChurnlogError {
    #[error("Error reading file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Error parsing file {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Template error: {0}")]
    Template(String),
}
