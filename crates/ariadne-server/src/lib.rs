//! # Ariadne Server
//!
//! The [`Router`]: route registration, middleware and request dispatch,
//! plus the `hyper` adapter that feeds it.
//!
//! ## Dispatch
//!
//! Every request gets exactly one of:
//!
//! | Outcome | When |
//! |---------|------|
//! | matched handler | a registered route matches method and path |
//! | not-found handler | nothing matches (default: `404 page not found`) |
//! | `500` with the error text | route resolution failed for another reason |
//! | `400` + `Connection: close` | the request target is `*` (HTTP/1.1 and later) |
//!
//! ## Example
//!
//! ```rust,no_run
//! use ariadne_middleware::{Logger, Request, Response, ResponseExt};
//! use ariadne_server::{serve_connection, Router};
//! use http::StatusCode;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let router = Router::new();
//!     router
//!         .use_middleware(Logger::new())
//!         .get("/health", |_req: Request| async { Response::text(StatusCode::OK, "OK") });
//!
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!     loop {
//!         let (stream, remote_addr) = listener.accept().await?;
//!         tokio::spawn(serve_connection(router.clone(), stream, remote_addr));
//!     }
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/ariadne-server/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
mod methods;
pub mod router;
pub mod service;

pub use error::ServerError;
pub use router::Router;
pub use service::{hijack, serve_connection, RouterService};
