//! Crate-wide error type.
//!
//! The status core itself cannot fail; errors only come from the edges
//! (config loading, the message stream).  Hook failures never surface
//! here, the aggregator absorbs them.

use core::fmt;

use crate::app::ports::{ConfigError, SourceError};

/// Every fallible operation outside the hooks funnels into this type.
#[derive(Debug)]
pub enum Error {
    /// Configuration is missing or invalid.
    Config(ConfigError),
    /// The message stream failed.
    Source(SourceError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Source(e) => write!(f, "source: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Source(e) => Some(e),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<SourceError> for Error {
    fn from(e: SourceError) -> Self {
        Self::Source(e)
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
