use thiserror::Error;

#[derive(Debug, Error)]
pub enum DssReadError {
    #[error("file is not valid UTF-8: {0}")]
    NonUtf8(#[from] std::str::Utf8Error),

    #[error("invalid pathname '{pathname}': {reason}")]
    InvalidPathname {
        pathname: String,
        reason: &'static str,
    },

    #[error("line {line}: can not parse date/time '{text}'")]
    BadDateTime { line: usize, text: String },

    #[error("line {line}: can not parse value '{text}'")]
    BadValue { line: usize, text: String },

    #[error("line {line}: ordinate row before any pathname line")]
    OrdinateBeforePathname { line: usize },

    #[error("line {line}: ordinate time not ascending")]
    TimeNotAscending { line: usize },

    #[error("no record found for pathname '{0}'")]
    RecordNotFound(String),

    #[error("record '{0}' has no plottable ordinates")]
    EmptyRecord(String),

    // Function context (preserves typed inner error)
    #[error("{func}: {source}")]
    Context {
        func: &'static str,
        #[source]
        source: Box<DssReadError>,
    },
}

pub trait ErrCtx<T> {
    fn ctx(self, func: &'static str) -> Result<T, DssReadError>;
}

impl<T, E> ErrCtx<T> for Result<T, E>
where
    E: Into<DssReadError>,
{
    fn ctx(self, func: &'static str) -> Result<T, DssReadError> {
        self.map_err(|e| DssReadError::Context {
            func,
            source: Box::new(e.into()),
        })
    }
}
