// Vox HTTP API server
//
// Serves the static page and the synthesis endpoint. Each request makes one
// remote call; nothing is shared between requests except read-only state.

mod page;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use vox_core::audio::utils::{gen_id, output_file_name};
use vox_core::audio::write_wav_file;
use vox_core::{Synthesizer, TtsError, VOICES};

pub use page::render_index;

/// Server state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    synthesizer: Synthesizer,
    output_dir: Option<PathBuf>,
    index_html: Arc<str>,
}

impl AppState {
    pub fn new(synthesizer: Synthesizer, output_dir: Option<PathBuf>) -> Self {
        Self {
            synthesizer,
            output_dir,
            index_html: render_index(VOICES).into(),
        }
    }
}

/// JSON body of `POST /api/tts`. Fields are optional so that missing values
/// produce a 400 with a message rather than an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct TtsRequestBody {
    #[serde(default)]
    pub voice: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Maps library errors onto HTTP statuses
#[derive(Debug)]
pub struct ApiError(pub TtsError);

impl From<TtsError> for ApiError {
    fn from(e: TtsError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            TtsError::InvalidArgument(msg) => (StatusCode::BAD_REQUEST, msg),
            TtsError::ConfigurationError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Server configuration error: {msg}"),
            ),
            TtsError::SynthesisFailed(msg) | TtsError::InvalidFormat(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("TTS generation failed: {msg}"),
            ),
            TtsError::IoError(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to write audio file: {e}"),
            ),
        };
        if status.is_server_error() {
            error!(target: "vox_server", %status, error = %message, "Request failed");
        } else {
            warn!(target: "vox_server", %status, error = %message, "Rejected request");
        }
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/favicon.ico", get(favicon_handler))
        .route("/api/voices", get(voices_handler))
        .route("/api/tts", post(tts_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve on an already-bound listener until the future is dropped or fails
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(
            target: "vox_server",
            url = %format!("http://{}", addr),
            backend = state.synthesizer.backend_name(),
            "Vox server ready"
        );
    }
    axum::serve(listener, router(state)).await
}

async fn index_handler(State(state): State<AppState>) -> Html<String> {
    Html(state.index_html.to_string())
}

async fn favicon_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn voices_handler() -> impl IntoResponse {
    Json(VOICES)
}

async fn tts_handler(
    State(state): State<AppState>,
    payload: Result<Json<TtsRequestBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = payload
        .map_err(|e| TtsError::InvalidArgument(format!("Invalid JSON body: {}", e.body_text())))?;

    // whitespace-only counts as missing
    let voice = body
        .voice
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| TtsError::InvalidArgument("Missing 'voice'".into()))?;
    let text = body
        .text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| TtsError::InvalidArgument("Missing 'text'".into()))?;

    let pcm = state.synthesizer.synthesize(&voice, &text).await?;
    let wav = pcm.to_wav()?;

    if let Some(dir) = state.output_dir.clone() {
        let path = dir.join(output_file_name(&voice, Some(&gen_id())));
        let saved = path.clone();
        tokio::task::spawn_blocking(move || write_wav_file(&path, &pcm.data, pcm.format))
            .await
            .map_err(|e| TtsError::IoError(std::io::Error::new(std::io::ErrorKind::Other, e)))??;
        info!(target: "vox_server", path = ?saved, "Saved synthesized audio");
    }

    let disposition = format!("attachment; filename=\"{}\"", output_file_name(&voice, None));
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "audio/wav".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        wav,
    )
        .into_response())
}
