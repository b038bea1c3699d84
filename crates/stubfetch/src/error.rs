use thiserror::Error;

#[derive(Error, Debug)]
pub enum StubError {
    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Extraction errors
    #[error("Corrupt archive {archive}: {reason}")]
    CorruptArchive { archive: String, reason: String },

    #[error("Location is not a local file: {0}")]
    UnsupportedLocation(String),

    // Coordinate errors
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    // Configuration errors
    #[error("Cannot determine local cache directory: {0}")]
    CacheDir(String),

    // HTTP client errors
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, StubError>;
