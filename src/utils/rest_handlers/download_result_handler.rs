use crate::utils::appstate::appstate::SharedState;
use crate::utils::common::san_filename::is_valid_export_name;
use crate::utils::errors::download_errors::DownloadError;
use crate::utils::errors::log_error::log_error;
use crate::utils::rest_handlers::rest_responses::ConvertResponse;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tokio_util::io::ReaderStream;

/// Fixed attachment name for every served chart.
pub const DOWNLOAD_NAME: &str = "dss_result.png";

pub async fn download_result_handler(
    State(state): State<SharedState>,
    Path(filename): Path<String>,
) -> Result<Response, (StatusCode, Json<ConvertResponse>)> {
    match stream_export(&state, &filename).await {
        Ok(response) => Ok(response),
        Err(e) => {
            eprintln!("❌ Download error: {}", e);
            log_error(&e);
            Err((
                StatusCode::NOT_FOUND,
                Json(ConvertResponse::error(format!("下载失败：{}", e))),
            ))
        }
    }
}

async fn stream_export(state: &SharedState, filename: &str) -> Result<Response, DownloadError> {
    // Only names this server handed out are ever opened.
    if !is_valid_export_name(filename) {
        return Err(DownloadError::InvalidFilename(filename.to_string()));
    }

    let path = state.config.export_folder.join(filename);
    let file = tokio::fs::File::open(&path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DownloadError::NotFound(filename.to_string())
        } else {
            DownloadError::Io(e)
        }
    })?;

    let body = Body::from_stream(ReaderStream::new(file));
    let headers = [
        (header::CONTENT_TYPE, "image/png".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", DOWNLOAD_NAME),
        ),
    ];

    Ok((headers, body).into_response())
}
