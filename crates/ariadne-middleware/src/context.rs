//! Request-scoped values set by the router.

use crate::recorder::ResponseRecorder;
use crate::types::RemoteAddr;
use ariadne_router::Params;
use std::net::SocketAddr;

/// Accessors for values the router and server attach to a request.
pub trait RequestExt {
    /// Path parameters bound when the request was routed.
    ///
    /// `None` means the request never went through the router.
    fn params(&self) -> Option<&Params>;

    /// A single path parameter.
    fn param(&self, name: &str) -> Option<&str> {
        self.params().and_then(|params| params.get(name))
    }

    /// The status recorder for this request.
    fn recorder(&self) -> Option<&ResponseRecorder>;

    /// Peer address of the underlying connection.
    fn remote_addr(&self) -> Option<SocketAddr>;
}

impl<B> RequestExt for http::Request<B> {
    fn params(&self) -> Option<&Params> {
        Params::from_extensions(self.extensions())
    }

    fn recorder(&self) -> Option<&ResponseRecorder> {
        self.extensions().get::<ResponseRecorder>()
    }

    fn remote_addr(&self) -> Option<SocketAddr> {
        self.extensions().get::<RemoteAddr>().map(|addr| addr.0)
    }
}
