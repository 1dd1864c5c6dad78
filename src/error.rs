//! Error type shared by every camera operation.

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong talking to the camera.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The HTTP exchange itself failed (refused, DNS, timeout, broken body)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The camera answered with a status other than 200
    #[error("HTTP error: status {0}")]
    Protocol(u16),

    /// The camera reported a nonzero `code` in its reply envelope
    #[error("Device error: code {0}")]
    Device(i64),

    /// A reply could not be decoded or holds a value we don't recognize
    #[error("Parse error: {0}")]
    Parse(String),

    /// The requested file is not on the camera
    #[error("Not found: {0}")]
    NotFound(String),

    /// Local filesystem error while storing a download
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
