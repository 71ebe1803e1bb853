use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("filename '{0}' is not a valid export name")]
    InvalidFilename(String),

    #[error("export '{0}' not found")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
