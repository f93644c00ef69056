//! Server error types.

use thiserror::Error;

/// Errors raised while serving a connection.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The request body could not be read.
    #[error("failed to read request body: {0}")]
    Body(#[source] hyper::Error),

    /// The connection failed while being served.
    #[error("connection error: {0}")]
    Connection(#[source] hyper::Error),
}
