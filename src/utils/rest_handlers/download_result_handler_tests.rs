use crate::utils::appstate::appstate::{create_app, AppState, SharedState};
use crate::utils::rest_handlers::rest_responses::ConvertResponse;
use crate::utils::server_config::server_config::ServerConfig;

use axum::http::StatusCode;
use axum_test::TestServer;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::Semaphore;

fn test_state(tmp: &TempDir) -> SharedState {
    let config = ServerConfig {
        upload_folder: tmp.path().join("uploads"),
        export_folder: tmp.path().join("exports"),
        ..ServerConfig::default()
    };
    config.ensure_folders().unwrap();

    Arc::new(AppState {
        config,
        blocking_limiter: Arc::new(Semaphore::new(1)),
    })
}

#[tokio::test]
async fn test_download_streams_export_as_attachment() {
    let tmp = TempDir::new().unwrap();
    let state = test_state(&tmp);

    let export_name = format!("{}.png", uuid::Uuid::new_v4());
    let payload = b"\x89PNG\r\n\x1a\nfake-chart-bytes";
    std::fs::write(state.config.export_folder.join(&export_name), payload).unwrap();

    let server = TestServer::new(create_app(state)).unwrap();
    let response = server.get(&format!("/download/{}", export_name)).await;

    response.assert_status_ok();
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "image/png"
    );
    assert_eq!(
        response.headers().get("content-disposition").unwrap(),
        "attachment; filename=\"dss_result.png\""
    );
    assert_eq!(response.as_bytes().as_ref(), payload);
}

#[tokio::test]
async fn test_download_missing_export_is_404() {
    let tmp = TempDir::new().unwrap();
    let server = TestServer::new(create_app(test_state(&tmp))).unwrap();

    let export_name = format!("{}.png", uuid::Uuid::new_v4());
    let response = server.get(&format!("/download/{}", export_name)).await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: ConvertResponse = response.json();
    assert_eq!(body.status, "error");
    assert!(body.message.starts_with("下载失败："), "{}", body.message);
}

#[tokio::test]
async fn test_download_rejects_names_it_never_issued() {
    let tmp = TempDir::new().unwrap();
    let state = test_state(&tmp);

    // A file an attacker knows the name of, outside the export scheme.
    std::fs::write(state.config.export_folder.join("secret.png"), b"x").unwrap();

    let server = TestServer::new(create_app(state)).unwrap();

    for name in ["secret.png", "result.txt", "..%2Fuploads%2Fx.png"] {
        let response = server.get(&format!("/download/{}", name)).await;
        response.assert_status(StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_unknown_route_falls_back_to_404() {
    let tmp = TempDir::new().unwrap();
    let server = TestServer::new(create_app(test_state(&tmp))).unwrap();

    let response = server.get("/no/such/route").await;
    response.assert_status(StatusCode::NOT_FOUND);
}
