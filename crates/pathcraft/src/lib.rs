//! Career learning-path generation over the DeepSeek chat completions API.
//!
//! `pathcraft` is the core library behind the learning-path web UI. Given a
//! profession name it builds a fixed curriculum-design prompt
//! ([`prompt::build_prompt`]), streams the generated Markdown back fragment
//! by fragment ([`stream::generate`]), and can structure the finished
//! document into spreadsheet rows for export ([`extract::extract_rows`],
//! [`export::workbook_bytes`]).
//!
//! The streaming generator is channel-backed: each call spawns one producer
//! task that owns the upstream request and feeds an mpsc receiver. Dropping
//! the receiver (e.g. the browser disconnects mid-stream) ends the producer
//! and releases the upstream connection.
//!
//! # Example
//!
//! ```ignore
//! use pathcraft::{DeepSeekClient, stream::{self, GenerationOptions}};
//! use std::sync::Arc;
//!
//! let api_key = std::env::var("DEEPSEEK_API_KEY").unwrap();
//! let client = Arc::new(DeepSeekClient::new(api_key)?);
//!
//! let mut rx = stream::generate(client, "数据分析师".into(), GenerationOptions::default());
//! while let Some(fragment) = rx.recv().await {
//!     print!("{fragment}");
//! }
//! ```

pub mod export;
pub mod extract;
pub mod prompt;
pub mod stream;

use serde::{Deserialize, Serialize};
use std::time::Duration;

// ── Constants ──────────────────────────────────────────────────────

pub const DEEPSEEK_URL: &str = "https://api.deepseek.com/chat/completions";

/// Default model for all generation calls.
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Maximum tokens for one learning-path generation.
pub const DEFAULT_MAX_TOKENS: u32 = 3000;

/// Sampling temperature for generation.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

// ── Request types ──────────────────────────────────────────────────

/// Chat completion request body (OpenAI-compatible subset used by DeepSeek).
#[derive(Serialize, Debug)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub stream: bool,
}

/// Role of a message in the conversation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A message in the conversation.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

// ── Client ─────────────────────────────────────────────────────────

/// Async HTTP client for the DeepSeek chat completions API.
pub struct DeepSeekClient {
    pub(crate) client: reqwest::Client,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
}

impl DeepSeekClient {
    /// Create a new client with the given API key and the default endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self, String> {
        Self::with_base_url(api_key, DEEPSEEK_URL)
    }

    /// Create a new client against a custom endpoint (used by tests).
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .user_agent("pathcraft/0.1")
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| format!("failed to build HTTP client: {e}"))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }
}
