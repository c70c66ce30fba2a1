// errors.rs
use std::fmt;

/// Errors that abort a build outright. Anything recoverable (a bad field,
/// a failed geocode, a corrupt cache file) is handled where it happens and
/// never reaches here.
#[derive(Debug)]
pub enum BuildError {
    RowSource(String),
    Config(String),
    OutputIo(String),
    CacheIo(String),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::RowSource(msg) => write!(f, "Row source error: {msg}"),
            BuildError::Config(msg) => write!(f, "Config error: {msg}"),
            BuildError::OutputIo(msg) => write!(f, "Output I/O error: {msg}"),
            BuildError::CacheIo(msg) => write!(f, "Cache I/O error: {msg}"),
        }
    }
}

impl std::error::Error for BuildError {}
