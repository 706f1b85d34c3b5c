//! Browser front end for pathcraft learning-path generation.
//!
//! `pathcraft-web` provides an axum server with three routes:
//!
//! - `GET /` — the embedded single-page UI,
//! - `POST /generate` — the streaming relay: fragments from the generator are
//!   written to the response body as they arrive, in order, as plain text,
//! - `GET /download_excel` — tabular export of an assembled document.
//!
//! # Architecture
//!
//! ```text
//! browser ──POST /generate──▶ relay handler ──▶ pathcraft::stream::generate
//!    ▲                             │                      │
//!    └──── text/plain body ◀── ReceiverStream ◀── mpsc ───┘ (producer task)
//! ```
//!
//! Each relay call is independent and self-contained: no shared mutable
//! state exists beyond the [`DeepSeekClient`] handle. If the browser
//! disconnects, the body stream is dropped, the channel receiver goes with
//! it, and the producer task ends at its next send.

mod routes;
mod server;

pub use routes::AppState;
pub use server::build_router;

use pathcraft::DeepSeekClient;
use pathcraft::stream::GenerationOptions;
use std::net::SocketAddr;
use std::sync::Arc;

/// Configuration for the web server.
pub struct WebConfig {
    /// Address to bind to. Default: `0.0.0.0:5000`.
    pub bind_addr: SocketAddr,
    /// Generation parameters applied to every relay call.
    pub options: GenerationOptions,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            options: GenerationOptions::default(),
        }
    }
}

/// Spawn the web server on a Tokio task and return the bound address.
///
/// Used by integration tests (bind to port 0 for a random port); the binary
/// serves in the foreground instead.
pub async fn spawn_web(client: Arc<DeepSeekClient>, config: WebConfig) -> SocketAddr {
    let router = build_router(client, config.options);
    server::start_server(router, config.bind_addr).await
}
