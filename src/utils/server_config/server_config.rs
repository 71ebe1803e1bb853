use crate::utils::errors::config_errors::ConfigError;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub upload_folder: PathBuf,
    pub export_folder: PathBuf,
    pub max_upload_bytes: usize,
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            upload_folder: PathBuf::from("uploads"),
            export_folder: PathBuf::from("exports"),
            max_upload_bytes: 50 * 1024 * 1024,
            bind_addr: "0.0.0.0:5000".to_string(),
        }
    }
}

impl ServerConfig {
    /// Build the config from the environment. `.env` values are already
    /// merged into the environment by the caller (dotenvy).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let upload_folder = std::env::var("UPLOAD_FOLDER")
            .map(PathBuf::from)
            .unwrap_or(defaults.upload_folder);
        let export_folder = std::env::var("EXPORT_FOLDER")
            .map(PathBuf::from)
            .unwrap_or(defaults.export_folder);
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr);

        let max_upload_bytes = match std::env::var("MAX_UPLOAD_MB") {
            Ok(raw) => {
                let mb: usize = raw
                    .parse()
                    .ok()
                    .filter(|mb| *mb > 0)
                    .ok_or(ConfigError::BadMaxUpload(raw))?;
                mb * 1024 * 1024
            }
            Err(_) => defaults.max_upload_bytes,
        };

        Ok(Self {
            upload_folder,
            export_folder,
            max_upload_bytes,
            bind_addr,
        })
    }

    /// Create the upload and export folders. Idempotent.
    pub fn ensure_folders(&self) -> Result<(), ConfigError> {
        for folder in [&self.upload_folder, &self.export_folder] {
            create_folder(folder)?;
        }
        Ok(())
    }
}

fn create_folder(folder: &Path) -> Result<(), ConfigError> {
    std::fs::create_dir_all(folder).map_err(|source| ConfigError::CreateFolder {
        folder: folder.to_path_buf(),
        source,
    })
}
