pub mod appstate;
pub mod chart;
pub mod common;
pub mod convert_dss;
pub mod dss;
pub mod errors;
pub mod rest_handlers;
pub mod server_config;
