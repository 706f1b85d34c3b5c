//! HTTP endpoint handlers.

use std::convert::Infallible;
use std::sync::Arc;

use axum::Json;
use axum::body::{Body, Bytes};
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use futures::StreamExt;
use pathcraft::DeepSeekClient;
use pathcraft::export::{XLSX_MIME, excel_filename, workbook_bytes};
use pathcraft::extract::extract_rows;
use pathcraft::stream::{self, GenerationOptions};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, error};

/// Fallback label when the export request carries no profession.
const UNKNOWN_PROFESSION: &str = "未知职业";

/// Shared application state passed to all handlers via axum's `State`
/// extractor. Cloned per request; holds no mutable state.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<DeepSeekClient>,
    pub options: GenerationOptions,
}

/// GET / — the embedded single-page UI.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

/// Request body for POST /generate.
#[derive(Deserialize)]
pub struct GenerateRequest {
    pub profession: String,
}

/// POST /generate — the streaming relay.
///
/// Starts a generation stream and forwards each fragment to the response
/// body as soon as the producer emits it. The body is the raw in-order
/// concatenation of fragment text — no envelope, no re-encoding; the browser
/// renders the accumulated Markdown itself. Upstream failures arrive as a
/// trailing diagnostic fragment inside the same 200 response.
pub async fn generate(
    State(app): State<AppState>,
    Json(body): Json<GenerateRequest>,
) -> impl IntoResponse {
    debug!("generate request for profession: {:?}", body.profession);

    let rx = stream::generate(app.client.clone(), body.profession, app.options.clone());
    let fragments =
        ReceiverStream::new(rx).map(|fragment| Ok::<_, Infallible>(Bytes::from(fragment)));

    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        Body::from_stream(fragments),
    )
}

/// Query parameters for GET /download_excel.
#[derive(Deserialize)]
pub struct ExportQuery {
    /// Used only for the attachment filename.
    pub profession: Option<String>,
    /// The full assembled document text.
    #[serde(default)]
    pub content: String,
}

/// GET /download_excel — tabular export.
///
/// Runs the table extractor over the submitted document and returns a
/// single-sheet workbook with attachment disposition. Malformed Markdown
/// degrades to fewer rows, never to an error status.
pub async fn download_excel(Query(query): Query<ExportQuery>) -> Response {
    let profession = query
        .profession
        .unwrap_or_else(|| UNKNOWN_PROFESSION.to_string());
    let rows = extract_rows(&query.content);
    debug!("exporting {} rows for profession: {profession}", rows.len());

    match workbook_bytes(&rows) {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, XLSX_MIME.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    attachment_disposition(&excel_filename(&profession)),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            error!("excel export failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e).into_response()
        }
    }
}

/// RFC 5987 attachment disposition for a (typically non-ASCII) filename.
fn attachment_disposition(filename: &str) -> String {
    let encoded = utf8_percent_encode(filename, NON_ALPHANUMERIC);
    format!("attachment; filename*=UTF-8''{encoded}")
}
