use crate::utils::appstate::appstate::SharedState;
use crate::utils::common::san_filename::sanitize_upload_filename;
use crate::utils::convert_dss::render_chart_worker::render_chart_worker;
use crate::utils::dss::dss_pathname::DssPathname;
use crate::utils::errors::conversion_errors::{ConversionError, ErrCtx};
use tokio_util::bytes::Bytes;
use uuid::Uuid;

/// ----- One upload to convert -----
#[derive(Debug, Clone)]
pub struct DssConversionRequest {
    pub client_filename: String,
    pub dss_path: DssPathname,
    pub file_bytes: Bytes,
}

/// ----- Success Result -----
#[derive(Debug, Clone)]
pub struct DssConversionResult {
    /// Export filename under the export folder, `<uuid4>.png`.
    pub export_name: String,
    /// Name the upload was persisted under, `<uuid4>_<client filename>`.
    pub upload_name: String,
}

/// Persist the upload, then render the chart on a blocking thread.
/// The permit is held for the whole conversion and released on return.
pub async fn convert_dss_upload(
    state: SharedState,
    request: DssConversionRequest,
    _permit: tokio::sync::OwnedSemaphorePermit,
) -> Result<DssConversionResult, ConversionError> {
    let upload_name = format!(
        "{}_{}",
        Uuid::new_v4(),
        sanitize_upload_filename(&request.client_filename)
    );
    let upload_path = state.config.upload_folder.join(&upload_name);
    tokio::fs::write(&upload_path, &request.file_bytes)
        .await
        .map_err(|source| ConversionError::UploadIoError {
            filename: upload_name.clone(),
            source,
        })
        .ctx("convert_dss_upload:persist upload")?;

    let export_name = format!("{}.png", Uuid::new_v4());
    let export_path = state.config.export_folder.join(&export_name);

    let file_bytes = request.file_bytes.clone();
    let dss_path = request.dss_path.clone();
    let handle =
        tokio::task::spawn_blocking(move || render_chart_worker(file_bytes, dss_path, export_path));

    handle
        .await
        .map_err(|join_err| {
            if join_err.is_panic() {
                ConversionError::TaskJoinError(
                    "Internal error: task panicked during processing".to_string(),
                )
            } else if join_err.is_cancelled() {
                ConversionError::TaskJoinError("Task was cancelled".to_string())
            } else {
                ConversionError::TaskJoinError(format!("Task execution failed: {}", join_err))
            }
        })? // First ? handles JoinError
        ?;

    println!(
        "✅ Converted '{}' at {} into {}",
        upload_name, request.dss_path, export_name
    );

    Ok(DssConversionResult {
        export_name,
        upload_name,
    })
}
