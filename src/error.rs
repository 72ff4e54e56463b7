use std::{fmt, io};

/// Errors raised while reading a telemetry snapshot.
///
/// Color computations themselves never fail: degenerate inputs fall
/// back to black or to the unclustered colors.
#[derive(Debug)]
pub enum Error {
    /// The snapshot could not be read.
    Io(io::Error),
    /// The snapshot is not valid bridge JSON.
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "cannot read snapshot: {e}"),
            Error::Json(e) => write!(f, "invalid snapshot: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self { Error::Io(e) }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() { Error::Io(e.into()) } else { Error::Json(e) }
    }
}
