use std::fmt;

/// Result type for apitree-collection operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while generating a collection
#[derive(Debug)]
pub enum Error {
    /// IO operation failed (output directory or artifact write)
    Io(std::io::Error),

    /// Document could not be serialized
    Serialize(serde_json::Error),

    /// Configuration value could not be interpreted
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Serialize(err) => write!(f, "Serialization error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Serialize(err) => Some(err),
            Error::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialize(err)
    }
}
