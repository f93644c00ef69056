//! Status capture for a single request.
//!
//! The router attaches a [`ResponseRecorder`] to each request it dispatches.
//! Whoever writes the response status first wins; later writes are ignored,
//! mirroring how a status line can only be sent once. Outer middleware read
//! the captured status after `next.run()` returns.

use crate::types::{Request, Response};
use http::{Extensions, StatusCode};
use std::sync::{Arc, OnceLock};

/// Shared, write-once record of the status sent for a request.
#[derive(Debug, Clone, Default)]
pub struct ResponseRecorder {
    status: Arc<OnceLock<StatusCode>>,
}

impl ResponseRecorder {
    /// Creates a recorder with no status captured yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `status` if none was recorded yet.
    ///
    /// Returns `true` when this call set the status.
    pub fn write_header(&self, status: StatusCode) -> bool {
        self.status.set(status).is_ok()
    }

    /// Records the status of a finished response.
    ///
    /// A response produced without an explicit header write is treated as
    /// the first write.
    pub fn observe(&self, response: &Response) {
        self.write_header(response.status());
    }

    /// The captured status, if any was written.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        self.status.get().copied()
    }

    /// The captured status, or `200 OK` when nothing was written.
    #[must_use]
    pub fn status_or_default(&self) -> StatusCode {
        self.status().unwrap_or(StatusCode::OK)
    }

    /// Attaches a handle to this recorder to request extensions.
    pub fn attach(&self, extensions: &mut Extensions) {
        extensions.insert(self.clone());
    }

    /// Reads the recorder attached to a request.
    #[must_use]
    pub fn from_request(request: &Request) -> Option<Self> {
        request.extensions().get::<Self>().cloned()
    }
}
