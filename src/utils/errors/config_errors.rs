use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("MAX_UPLOAD_MB '{0}' is not a positive integer")]
    BadMaxUpload(String),

    #[error("can not create folder '{folder}': {source}")]
    CreateFolder {
        folder: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
