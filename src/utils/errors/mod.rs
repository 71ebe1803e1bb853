pub mod app_errors;
pub mod chart_errors;
pub mod config_errors;
pub mod conversion_errors;
pub mod download_errors;
pub mod dss_read_errors;
pub mod log_error;
