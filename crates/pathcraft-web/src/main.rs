//! Learning-path generator web server.
//!
//! Serves the browser UI and the streaming relay over the DeepSeek API.
//!
//! # Usage
//!
//! ```bash
//! DEEPSEEK_API_KEY=sk-... cargo run -p pathcraft-web
//! DEEPSEEK_API_KEY=sk-... cargo run -p pathcraft-web -- --port 8080
//! DEEPSEEK_API_KEY=sk-... cargo run -p pathcraft-web -- --model deepseek-reasoner
//! ```
//!
//! Then open the printed URL in a browser, enter a profession, and watch the
//! path stream in. The API key is read once at startup; a missing key stops
//! the process before it binds.

use clap::Parser;
use pathcraft::DeepSeekClient;
use pathcraft::stream::GenerationOptions;
use pathcraft_web::build_router;
use std::net::SocketAddr;
use std::sync::Arc;

/// Learning-path generator web server.
#[derive(Parser)]
#[command(about = "Career learning-path generator with a browser-based UI")]
struct Args {
    /// Address to bind to.
    #[arg(long, default_value = "0.0.0.0")]
    bind: std::net::IpAddr,

    /// Port to listen on.
    #[arg(long, default_value_t = 5000)]
    port: u16,

    /// LLM model to use.
    #[arg(long, default_value = pathcraft::DEFAULT_MODEL)]
    model: String,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Startup gate: no credential, no server.
    let api_key = std::env::var("DEEPSEEK_API_KEY")
        .map_err(|_| "Set DEEPSEEK_API_KEY env var to your DeepSeek API key")?;
    let client = Arc::new(DeepSeekClient::new(api_key)?);

    let options = GenerationOptions {
        model: args.model,
        ..Default::default()
    };
    let router = build_router(client, options);

    let addr = SocketAddr::from((args.bind, args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("failed to bind {addr}: {e}"))?;
    println!("Web UI: http://{addr}");

    axum::serve(listener, router)
        .await
        .map_err(|e| format!("server error: {e}"))
}
