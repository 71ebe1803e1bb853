use serde::{Deserialize, Serialize};

/// JSON body consumed by the upload page script. Errors carry no
/// `downloadUrl` key at all.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

impl ConvertResponse {
    pub fn success(message: &str, download_url: String) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
            download_url: Some(download_url),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            status: "error".to_string(),
            message,
            download_url: None,
        }
    }
}
