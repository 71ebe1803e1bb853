use crate::utils::appstate::appstate::{create_app, AppState, SharedState};
use crate::utils::common::san_filename::is_valid_export_name;
use crate::utils::rest_handlers::rest_responses::ConvertResponse;
use crate::utils::server_config::server_config::ServerConfig;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::Semaphore;

const SAMPLE_DSS: &str = "\
/PROJECT/FLOW/01JAN2020/1HOUR/VALUE/
01JAN2020 01:00, 12.5
01JAN2020 02:00, 13.1
01JAN2020 03:00, 11.0
";

fn test_state(tmp: &TempDir, permits: usize) -> SharedState {
    let config = ServerConfig {
        upload_folder: tmp.path().join("uploads"),
        export_folder: tmp.path().join("exports"),
        ..ServerConfig::default()
    };
    config.ensure_folders().unwrap();

    Arc::new(AppState {
        config,
        blocking_limiter: Arc::new(Semaphore::new(permits)),
    })
}

fn dss_file_part(content: &str, filename: &str) -> Part {
    Part::bytes(content.as_bytes().to_vec())
        .file_name(filename)
        .mime_type("application/octet-stream")
}

#[tokio::test]
async fn test_upload_convert_success() {
    let tmp = TempDir::new().unwrap();
    let state = test_state(&tmp, 4);
    let server = TestServer::new(create_app(state.clone())).unwrap();

    let form = MultipartForm::new()
        .add_text("dssPath", "/PROJECT/FLOW/01JAN2020/1HOUR/VALUE/")
        .add_part("dssFile", dss_file_part(SAMPLE_DSS, "flow.dss"));

    let response = server.post("/upload").multipart(form).await;
    response.assert_status_ok();

    let body: ConvertResponse = response.json();
    assert_eq!(body.status, "success");
    assert_eq!(body.message, "转换完成");

    let download_url = body.download_url.expect("success body carries downloadUrl");
    let export_name = download_url
        .strip_prefix("/download/")
        .expect("downloadUrl points at the download route");
    assert!(is_valid_export_name(export_name));
    assert!(state.config.export_folder.join(export_name).is_file());

    // The raw upload stays behind, uuid-prefixed.
    let uploads: Vec<_> = std::fs::read_dir(&state.config.upload_folder)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(uploads.len(), 1);
    assert!(uploads[0].ends_with("_flow.dss"));
}

#[tokio::test]
async fn test_converted_chart_is_downloadable() {
    let tmp = TempDir::new().unwrap();
    let state = test_state(&tmp, 4);
    let server = TestServer::new(create_app(state)).unwrap();

    let form = MultipartForm::new().add_part("dssFile", dss_file_part(SAMPLE_DSS, "flow.dss"));

    let response = server.post("/upload").multipart(form).await;
    response.assert_status_ok();
    let body: ConvertResponse = response.json();

    let download = server.get(&body.download_url.unwrap()).await;
    download.assert_status_ok();
    assert_eq!(
        download.headers().get("content-type").unwrap(),
        "image/png"
    );
    let png = download.as_bytes();
    assert_eq!(&png[..4], &[0x89, b'P', b'N', b'G']);
}

#[tokio::test]
async fn test_default_pathname_is_used_when_field_missing() {
    let tmp = TempDir::new().unwrap();
    let state = test_state(&tmp, 4);
    let server = TestServer::new(create_app(state)).unwrap();

    // SAMPLE_DSS is stored at the default pathname.
    let form = MultipartForm::new().add_part("dssFile", dss_file_part(SAMPLE_DSS, "flow.dss"));

    let response = server.post("/upload").multipart(form).await;
    response.assert_status_ok();

    let body: ConvertResponse = response.json();
    assert_eq!(body.status, "success");
}

#[tokio::test]
async fn test_missing_file_part_rejected() {
    let tmp = TempDir::new().unwrap();
    let state = test_state(&tmp, 4);
    let server = TestServer::new(create_app(state)).unwrap();

    let form = MultipartForm::new().add_text("dssPath", "/A/B/C/D/E/F/");

    let response = server.post("/upload").multipart(form).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: ConvertResponse = response.json();
    assert_eq!(body.status, "error");
    assert_eq!(body.message, "请选择要上传的DSS文件");
    assert!(body.download_url.is_none());
}

#[tokio::test]
async fn test_empty_filename_rejected() {
    let tmp = TempDir::new().unwrap();
    let state = test_state(&tmp, 4);
    let server = TestServer::new(create_app(state)).unwrap();

    let form = MultipartForm::new().add_part("dssFile", dss_file_part(SAMPLE_DSS, ""));

    let response = server.post("/upload").multipart(form).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: ConvertResponse = response.json();
    assert_eq!(body.message, "文件名不能为空");
}

#[tokio::test]
async fn test_unknown_record_reports_conversion_failure() {
    let tmp = TempDir::new().unwrap();
    let state = test_state(&tmp, 4);
    let server = TestServer::new(create_app(state.clone())).unwrap();

    let form = MultipartForm::new()
        .add_text("dssPath", "/PROJECT/PRECIP/01JAN2020/1HOUR/VALUE/")
        .add_part("dssFile", dss_file_part(SAMPLE_DSS, "flow.dss"));

    let response = server.post("/upload").multipart(form).await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let body: ConvertResponse = response.json();
    assert_eq!(body.status, "error");
    assert!(body.message.starts_with("转换失败："), "{}", body.message);

    // Nothing was exported.
    assert_eq!(
        std::fs::read_dir(&state.config.export_folder).unwrap().count(),
        0
    );
}

#[tokio::test]
async fn test_unparsable_file_reports_conversion_failure() {
    let tmp = TempDir::new().unwrap();
    let state = test_state(&tmp, 4);
    let server = TestServer::new(create_app(state)).unwrap();

    let form = MultipartForm::new()
        .add_part("dssFile", dss_file_part("not a dss export", "junk.bin"));

    let response = server.post("/upload").multipart(form).await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let body: ConvertResponse = response.json();
    assert!(body.message.starts_with("转换失败："), "{}", body.message);
}

#[tokio::test]
async fn test_saturated_limiter_fails_fast() {
    let tmp = TempDir::new().unwrap();
    // Zero permits: every conversion finds the server busy.
    let state = test_state(&tmp, 0);
    let server = TestServer::new(create_app(state)).unwrap();

    let form = MultipartForm::new().add_part("dssFile", dss_file_part(SAMPLE_DSS, "flow.dss"));

    let response = server.post("/upload").multipart(form).await;
    response.assert_status(StatusCode::TOO_MANY_REQUESTS);

    let body: ConvertResponse = response.json();
    assert_eq!(body.status, "error");
}

#[tokio::test]
async fn test_healthcheck() {
    let tmp = TempDir::new().unwrap();
    let server = TestServer::new(create_app(test_state(&tmp, 1))).unwrap();

    let response = server.get("/healthcheck").await;
    response.assert_status_ok();
}
