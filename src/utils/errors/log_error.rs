/// Log an error and its source chain at error level.
pub fn log_error(e: &(dyn std::error::Error + 'static)) {
    log::error!("{}", e);
    let mut source = e.source();
    while let Some(cause) = source {
        log::error!("  caused by: {}", cause);
        source = cause.source();
    }
}
