use crate::utils::chart::chart_render::render_png;
use crate::utils::dss::dss_pathname::DssPathname;
use crate::utils::dss::dss_reader::{read_dss_text, select_record};
use crate::utils::errors::conversion_errors::{ConversionError, ErrCtx};
use std::path::PathBuf;
use tokio_util::bytes::Bytes;

/// Runs on a blocking thread: parse the upload, pick the requested record,
/// render it to `export_path`.
pub fn render_chart_worker(
    file_bytes: Bytes,
    dss_path: DssPathname,
    export_path: PathBuf,
) -> Result<(), ConversionError> {
    let records = read_dss_text(&file_bytes).ctx("render_chart_worker:read_dss_text")?;

    let record = select_record(&records, &dss_path).ctx("render_chart_worker:select_record")?;

    render_png(record, &export_path).ctx("render_chart_worker:render_png")?;

    Ok(())
}
