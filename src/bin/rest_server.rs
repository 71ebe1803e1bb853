use libs::utils::appstate::appstate::{create_app, AppState};
use libs::utils::errors::app_errors::{AppError, ErrCtx};
use libs::utils::server_config::server_config::ServerConfig;

use std::sync::Arc;
use tokio::sync::Semaphore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();
    println!("rest server");

    let config = match ServerConfig::from_env() {
        Ok(config) => {
            println!("✅ Configuration loaded.");
            config
        }
        Err(err) => {
            eprintln!("❌ Configuration failed: {err}");
            std::process::exit(1);
        }
    };

    config
        .ensure_folders()
        .map_err(AppError::from)
        .ctx("main:ensure_folders")?;
    println!(
        "✅ Upload folder '{}' and export folder '{}' ready.",
        config.upload_folder.display(),
        config.export_folder.display()
    );

    // Limit of concurrent heavy blocking tasks.
    const MAX_BLOCKING_TASKS: usize = 64;

    let bind_addr = config.bind_addr.clone();
    let app_state = Arc::new(AppState {
        config,
        blocking_limiter: Arc::new(Semaphore::new(MAX_BLOCKING_TASKS)),
    });

    let app = create_app(app_state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    println!("✅ Listening on {bind_addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
