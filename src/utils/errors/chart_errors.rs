use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("series has no plottable points")]
    EmptySeries,

    #[error("drawing failed: {0}")]
    Draw(String),
}
