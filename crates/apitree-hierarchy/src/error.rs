use std::fmt;

/// Result type for apitree-hierarchy operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading a hierarchy dataset
#[derive(Debug)]
pub enum Error {
    /// Dataset file could not be read
    Io(std::io::Error),

    /// Dataset is not a valid `{ "name", "children" }` tree
    Parse(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Parse(err) => write!(f, "Invalid tree dataset: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Parse(err) => Some(err),
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
        Error::Parse(err)
    }
}
