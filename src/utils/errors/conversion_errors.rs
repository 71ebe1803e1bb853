use crate::utils::errors::chart_errors::ChartError;
use crate::utils::errors::dss_read_errors::DssReadError;
use axum::http::StatusCode;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    // Request-level rejections
    #[error("no file part in the upload form")]
    MissingFilePart,

    #[error("uploaded file has an empty filename")]
    EmptyFilename,

    #[error("malformed multipart body: {0}")]
    BadMultipart(String),

    // Fatal errors - system level
    #[error("Error: {0}")]
    ServerBusyError(String),

    #[error("Error: {0}")]
    TaskJoinError(String),

    #[error("can not persist upload '{filename}': {source}")]
    UploadIoError {
        filename: String,
        #[source]
        source: io::Error,
    },

    // Conversion pipeline
    #[error("{0}")]
    DssReadError(#[from] DssReadError),

    #[error("{0}")]
    ChartError(#[from] ChartError),

    // Function context (preserves typed inner error)
    #[error("{func}: {source}")]
    Context {
        func: &'static str,
        #[source]
        source: Box<ConversionError>,
    },
}

impl ConversionError {
    pub fn http_status(&self) -> StatusCode {
        match self {
            ConversionError::MissingFilePart
            | ConversionError::EmptyFilename
            | ConversionError::BadMultipart(_) => StatusCode::BAD_REQUEST,
            ConversionError::ServerBusyError(_) => StatusCode::TOO_MANY_REQUESTS,
            ConversionError::TaskJoinError(_) | ConversionError::UploadIoError { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ConversionError::DssReadError(_) | ConversionError::ChartError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ConversionError::Context { source, .. } => source.http_status(),
        }
    }

    /// Message shown verbatim by the upload page error panel.
    pub fn user_message(&self) -> String {
        match self {
            ConversionError::MissingFilePart => "请选择要上传的DSS文件".to_string(),
            ConversionError::EmptyFilename => "文件名不能为空".to_string(),
            ConversionError::BadMultipart(msg) => format!("服务器错误：{}", msg),
            ConversionError::ServerBusyError(msg) => format!("服务器错误：{}", msg),
            ConversionError::TaskJoinError(msg) => format!("服务器错误：{}", msg),
            ConversionError::UploadIoError { .. } => format!("服务器错误：{}", self),
            ConversionError::DssReadError(e) => format!("转换失败：{}", e),
            ConversionError::ChartError(e) => format!("转换失败：{}", e),
            ConversionError::Context { source, .. } => source.user_message(),
        }
    }
}

pub trait ErrCtx<T> {
    fn ctx(self, func: &'static str) -> Result<T, ConversionError>;
}

impl<T, E> ErrCtx<T> for Result<T, E>
where
    E: Into<ConversionError>,
{
    fn ctx(self, func: &'static str) -> Result<T, ConversionError> {
        self.map_err(|e| ConversionError::Context {
            func,
            source: Box::new(e.into()),
        })
    }
}
