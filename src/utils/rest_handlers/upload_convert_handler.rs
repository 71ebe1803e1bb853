use crate::utils::appstate::appstate::SharedState;
use crate::utils::convert_dss::convert_manager::{convert_dss_upload, DssConversionRequest};
use crate::utils::dss::dss_pathname::DssPathname;
use crate::utils::errors::conversion_errors::ConversionError;
use crate::utils::errors::log_error::log_error;
use crate::utils::rest_handlers::rest_responses::ConvertResponse;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tokio_util::bytes::Bytes;

/// Pathname used when the form does not send one.
pub const DEFAULT_DSS_PATH: &str = "/PROJECT/FLOW/01JAN2020/1HOUR/VALUE/";

impl IntoResponse for ConversionError {
    fn into_response(self) -> Response {
        eprintln!("❌ Conversion error: {}", self);
        log_error(&self);
        let status = self.http_status();
        let body = Json(ConvertResponse::error(self.user_message()));
        (status, body).into_response()
    }
}

#[axum::debug_handler]
pub async fn upload_convert_handler(
    State(state): State<SharedState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ConvertResponse>), ConversionError> {
    let request = read_upload_form(multipart).await?;

    println!(
        "📥 Convert request: file='{}' ({} bytes), pathname={}",
        request.client_filename,
        request.file_bytes.len(),
        request.dss_path
    );

    // Try to acquire without waiting; fail fast if saturated.
    let permit = state
        .blocking_limiter
        .clone()
        .try_acquire_owned()
        .map_err(|_| {
            ConversionError::ServerBusyError(
                "Server is handling the maximum number of conversions. Please retry.".to_string(),
            )
        })?;

    let result = convert_dss_upload(state.clone(), request, permit).await?;

    Ok((
        StatusCode::OK,
        Json(ConvertResponse::success(
            "转换完成",
            format!("/download/{}", result.export_name),
        )),
    ))
}

/// Pull `dssFile` and `dssPath` out of the multipart form. A missing or
/// blank `dssPath` falls back to the default pathname.
async fn read_upload_form(mut multipart: Multipart) -> Result<DssConversionRequest, ConversionError> {
    let mut file: Option<(String, Bytes)> = None;
    let mut dss_path_text: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ConversionError::BadMultipart(e.to_string()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("dssFile") => {
                let filename = field.file_name().unwrap_or("").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ConversionError::BadMultipart(e.to_string()))?;
                file = Some((filename, bytes));
            }
            Some("dssPath") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ConversionError::BadMultipart(e.to_string()))?;
                dss_path_text = Some(text);
            }
            _ => {}
        }
    }

    let (client_filename, file_bytes) = file.ok_or(ConversionError::MissingFilePart)?;
    if client_filename.is_empty() {
        return Err(ConversionError::EmptyFilename);
    }

    let path_text = dss_path_text
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DSS_PATH.to_string());
    let dss_path = DssPathname::parse(&path_text)?;

    Ok(DssConversionRequest {
        client_filename,
        dss_path,
        file_bytes,
    })
}
