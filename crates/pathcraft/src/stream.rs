//! Channel-backed streaming generator.
//!
//! [`generate`] spawns one producer task per call. The task owns the upstream
//! DeepSeek request and forwards each SSE content delta, in arrival order,
//! through an mpsc channel. The receiver side is the lazy fragment sequence:
//! the relay endpoint turns it into a response body, tests drain it directly.
//!
//! Failure handling is deliberately flat: an empty subject short-circuits to
//! a single validation fragment without contacting the API, and any upstream
//! failure becomes a single diagnostic fragment after which the channel
//! closes. No retries.

use crate::prompt::{SYSTEM_PROMPT, build_prompt};
use crate::{
    ChatRequest, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE, DeepSeekClient, Message,
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Validation message emitted for an empty or whitespace-only profession.
pub const EMPTY_SUBJECT_MESSAGE: &str = "请输入有效的职业名称。";

/// Fragments buffered between the producer task and the relay.
const CHANNEL_CAPACITY: usize = 32;

/// Generation parameters. One learning path per request, so these are fixed
/// at construction rather than per-call.
#[derive(Clone, Debug)]
pub struct GenerationOptions {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Delay after each forwarded fragment to smooth delivery pacing.
    /// Never reorders or batches fragments.
    pub pacing: Duration,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            pacing: Duration::from_millis(10),
        }
    }
}

/// Start a generation stream for one profession.
///
/// Returns the receiving end of the fragment channel. The channel closes at
/// end-of-stream; the sequence is finite and single-use. Dropping the
/// receiver stops the producer at its next send, which drops the upstream
/// response and releases the connection.
pub fn generate(
    client: Arc<DeepSeekClient>,
    profession: String,
    opts: GenerationOptions,
) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

    tokio::spawn(async move {
        // Validation short-circuit: one user-facing fragment, no API call.
        if profession.trim().is_empty() {
            debug!("empty profession, short-circuiting");
            let _ = tx.send(EMPTY_SUBJECT_MESSAGE.to_string()).await;
            return;
        }

        if let Err(e) = stream_completion(&client, &profession, &opts, &tx).await {
            warn!("generation failed: {e}");
            let _ = tx.send(format!("API 调用失败：{e}")).await;
        }
    });

    rx
}

/// Issue the streaming chat request and forward content deltas into `tx`.
///
/// Returns `Ok(())` on normal end-of-stream *and* on receiver drop — a gone
/// consumer is cancellation, not a failure. A success with zero deltas is an
/// empty but valid document: the channel just closes without fragments.
async fn stream_completion(
    client: &DeepSeekClient,
    profession: &str,
    opts: &GenerationOptions,
    tx: &mpsc::Sender<String>,
) -> Result<(), String> {
    let body = ChatRequest {
        model: opts.model.clone(),
        messages: vec![
            Message::system(SYSTEM_PROMPT),
            Message::user(build_prompt(profession)),
        ],
        max_tokens: opts.max_tokens,
        temperature: opts.temperature,
        stream: true,
    };

    debug!("sending streaming request for profession: {profession}");

    let mut resp = client
        .client
        .post(&client.base_url)
        .header("Authorization", format!("Bearer {}", client.api_key))
        .json(&body)
        .send()
        .await
        .map_err(|e| format!("streaming request failed: {e}"))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        return Err(format!("DeepSeek API HTTP {status}: {text}"));
    }

    // Read the SSE stream incrementally via chunk() and process complete
    // `data:` lines as they land in the buffer.
    let mut buffer = String::new();
    let mut forwarded = 0usize;

    while let Some(chunk) = resp
        .chunk()
        .await
        .map_err(|e| format!("failed to read streaming chunk: {e}"))?
    {
        buffer.push_str(&String::from_utf8_lossy(&chunk));

        while let Some(newline_pos) = buffer.find('\n') {
            let line: String = buffer.drain(..=newline_pos).collect();
            let line = line.trim();
            if line.is_empty() || line.starts_with(':') {
                continue;
            }
            if line == "data: [DONE]" {
                debug!("stream complete after {forwarded} fragments");
                return Ok(());
            }
            if let Some(data) = line.strip_prefix("data: ") {
                let mut deltas = Vec::new();
                parse_sse_data(data, &mut deltas);
                for delta in deltas {
                    if tx.send(delta).await.is_err() {
                        debug!("client disconnected, dropping upstream stream");
                        return Ok(());
                    }
                    forwarded += 1;
                    tokio::time::sleep(opts.pacing).await;
                }
            }
        }
    }

    // Process any remaining data in the buffer (incomplete final line).
    let remaining = buffer.trim();
    if remaining != "data: [DONE]"
        && let Some(data) = remaining.strip_prefix("data: ")
    {
        let mut deltas = Vec::new();
        parse_sse_data(data, &mut deltas);
        for delta in deltas {
            if tx.send(delta).await.is_err() {
                return Ok(());
            }
        }
    }

    debug!("stream ended without [DONE] after {forwarded} fragments");
    Ok(())
}

// ── SSE payload parsing ────────────────────────────────────────────

/// Raw SSE data chunk from the DeepSeek API.
#[derive(Deserialize, Debug)]
struct StreamChunk {
    choices: Option<Vec<StreamChoice>>,
}

#[derive(Deserialize, Debug)]
struct StreamChoice {
    delta: Option<StreamDelta>,
}

#[derive(Deserialize, Debug)]
struct StreamDelta {
    content: Option<String>,
}

/// Parse a single SSE `data:` payload into content deltas.
fn parse_sse_data(data: &str, deltas: &mut Vec<String>) {
    match serde_json::from_str::<StreamChunk>(data) {
        Ok(chunk) => {
            for choice in chunk.choices.unwrap_or_default() {
                if let Some(delta) = choice.delta
                    && let Some(content) = delta.content
                    && !content.is_empty()
                {
                    deltas.push(content);
                }
            }
        }
        Err(e) => {
            warn!("failed to parse SSE chunk: {e} — data: {data}");
        }
    }
}
