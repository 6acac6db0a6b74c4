use std::fmt;

/// Errors that can occur during image storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// Neither the requested image nor the default image exists.
    NotFound(String),
    /// The image stream could not be fully consumed.
    Read(std::io::Error),
    /// Writing the image to durable storage failed.
    Write(std::io::Error),
    /// Any other I/O fault on the read path.
    Io(std::io::Error),
    /// The requested image name is not an acceptable `.jpg` filename.
    InvalidName(String),
    /// The provided content hash is invalid.
    InvalidHash(String),
    /// The image exceeds the configured size limit.
    SizeLimitExceeded { actual: u64, limit: u64 },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(name) => write!(f, "image not found: {name}"),
            Self::Read(err) => write!(f, "unable to read image stream: {err}"),
            Self::Write(err) => write!(f, "unable to write image file: {err}"),
            Self::Io(err) => write!(f, "storage IO error: {err}"),
            Self::InvalidName(msg) => write!(f, "invalid image name: {msg}"),
            Self::InvalidHash(msg) => write!(f, "invalid content hash: {msg}"),
            Self::SizeLimitExceeded { actual, limit } => {
                write!(f, "image exceeds size limit ({actual} > {limit} bytes)")
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read(err) | Self::Write(err) | Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
