//! Axum server setup and router construction.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use pathcraft::DeepSeekClient;
use pathcraft::stream::GenerationOptions;
use tower_http::cors::{Any, CorsLayer};

use crate::routes::{self, AppState};

/// Build the full axum router.
pub fn build_router(client: Arc<DeepSeekClient>, options: GenerationOptions) -> Router {
    let app_state = AppState { client, options };

    // Permissive CORS so the page can be fronted by another origin in dev.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::index))
        .route("/generate", post(routes::generate))
        .route("/download_excel", get(routes::download_excel))
        .with_state(app_state)
        .layer(cors)
}

/// Start the axum server on a spawned task and return the bound address.
pub async fn start_server(router: Router, bind_addr: SocketAddr) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind(bind_addr).await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    addr
}
