//! Application-level errors (I/O and configuration around the diff core)

use thiserror::Error;

/// Application errors add context to failures outside the domain core.
/// The domain itself is total and never produces one.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("missing input: no {0} outline given (pass it as an argument or set it in config)")]
    MissingInput(&'static str),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
