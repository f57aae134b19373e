//! HTTP API for the study-aid backend.
//!
//! Thin boundary over the study pipeline: routes deserialize requests,
//! call into [`crate::study`], and serialize the results. All state lives
//! in the injected in-memory stores.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Health check (returns version) |
//! | `POST` | `/api/upload` | Upload a document (multipart field `file`) |
//! | `GET`  | `/api/docs` | List uploaded documents |
//! | `POST` | `/api/query` | Styled summary or study plan |
//! | `POST` | `/api/quiz` | Generate a quiz from text |
//! | `POST` | `/api/flashcards` | Generate flashcards from text |
//! | `POST` | `/api/feedback` | Append a feedback record |
//! | `GET`  | `/api/feedback` | List all feedback records |
//!
//! # Error Contract
//!
//! Error responses use a JSON envelope:
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "Empty text" } }
//! ```
//!
//! Remote generator failures never produce an error response; they fall
//! through to the local pipeline and the request still succeeds.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted to support browser-based
//! clients.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::embedding;
use crate::extract;
use crate::generate::{generator_or_disabled, TextGenerator};
use crate::models::{DocumentInfo, FeedbackRecord, Flashcard, QuizItem};
use crate::plan::parse_plan_request;
use crate::store::{DocumentStore, FeedbackLog};
use crate::study;
use crate::styles::truncate_chars;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    store: Arc<DocumentStore>,
    feedback: Arc<FeedbackLog>,
    generator: Arc<dyn TextGenerator>,
}

impl AppState {
    pub fn new(config: Arc<Config>) -> Self {
        let generator: Arc<dyn TextGenerator> = generator_or_disabled(&config.generator).into();
        Self {
            config,
            store: Arc::new(DocumentStore::new()),
            feedback: Arc::new(FeedbackLog::new()),
            generator,
        }
    }
}

/// Starts the HTTP server.
///
/// Binds to the address configured in `[server].bind` and serves until the
/// process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let state = AppState::new(Arc::new(config.clone()));

    match embedding::create_provider(&config.embedding) {
        Ok(provider) => println!(
            "embedding provider: {} ({} dims)",
            provider.model_name(),
            provider.dims()
        ),
        Err(e) => eprintln!("embedding provider unavailable: {e:#}"),
    }
    println!(
        "studybuddy API listening on http://{} (generator: {})",
        bind_addr,
        state.generator.name()
    );

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}

/// Builds the application router with permissive CORS.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/api/upload", post(handle_upload))
        .route("/api/docs", get(handle_docs))
        .route("/api/query", post(handle_query))
        .route("/api/quiz", post(handle_quiz))
        .route("/api/flashcards", post(handle_flashcards))
        .route("/api/feedback", post(handle_feedback).get(handle_feedback_list))
        .layer(cors)
        .with_state(state)
}

// ============ Error response ============

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

/// Constructs a 400 Bad Request error.
fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ POST /api/upload ============

#[derive(Serialize)]
struct UploadResponse {
    id: String,
    name: String,
}

/// Handler for `POST /api/upload`.
///
/// Accepts a multipart form with a `file` field, extracts its text, and
/// stores the document. Extraction failures and empty results are client
/// errors; the pipeline is never invoked for them.
async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("invalid multipart body: {}", e)))?
    {
        if field.name() == Some("file") {
            let name = field
                .file_name()
                .unwrap_or("upload.txt")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| bad_request(format!("failed to read upload: {}", e)))?;
            upload = Some((name, bytes.to_vec()));
        }
    }

    let (name, bytes) = upload.ok_or_else(|| bad_request("No file provided"))?;
    let text = extract::extract_text(&name, &bytes).map_err(|e| bad_request(e.to_string()))?;
    if text.is_empty() {
        return Err(bad_request("Empty or unreadable file."));
    }

    let doc = state.store.add(&name, text);
    println!("uploaded {} ({})", doc.id, doc.name);
    Ok(Json(UploadResponse {
        id: doc.id,
        name: doc.name,
    }))
}

// ============ GET /api/docs ============

async fn handle_docs(State(state): State<AppState>) -> Json<Vec<DocumentInfo>> {
    Json(state.store.list())
}

// ============ POST /api/query ============

#[derive(Deserialize)]
struct QueryRequest {
    #[serde(default)]
    prompt: String,
    #[serde(default)]
    docs: Vec<String>,
    #[serde(default = "default_mode")]
    mode: String,
    #[serde(default)]
    style: Option<String>,
}

fn default_mode() -> String {
    "summarize".to_string()
}

#[derive(Serialize)]
struct QueryResponse {
    answer: String,
    sources: Vec<String>,
}

/// Handler for `POST /api/query`.
///
/// Two modes share this route: a planner request (`mode` of `chat` or
/// `planner` with no documents) builds a study plan from the prompt, and
/// everything else produces a styled summary of the selected documents.
async fn handle_query(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> Json<QueryResponse> {
    let is_planner = (req.mode == "chat" || req.mode == "planner") && req.docs.is_empty();

    if is_planner {
        let (topic, days) = parse_plan_request(&req.prompt);
        println!("study plan request: {} days on '{}'", days, topic);
        let answer = study::build_plan(state.generator.as_ref(), &topic, days).await;
        return Json(QueryResponse {
            answer,
            sources: Vec::new(),
        });
    }

    let selected = state.store.find_by_names(&req.docs);
    if selected.is_empty() {
        return Json(QueryResponse {
            answer: "No documents selected for summarization.".to_string(),
            sources: Vec::new(),
        });
    }

    let style = req.style.as_deref().unwrap_or("simple").to_lowercase();
    println!(
        "summary request: style '{}' over {} document(s)",
        style,
        selected.len()
    );

    // Remote context is capped per document; the local fallback sees it all
    let context = selected
        .iter()
        .map(|d| truncate_chars(&d.text, study::REMOTE_CONTEXT_CHARS))
        .collect::<Vec<_>>()
        .join("\n\n");
    let full_text = selected
        .iter()
        .map(|d| d.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    let answer = study::styled_summary(
        state.generator.as_ref(),
        &state.config.embedding,
        &style,
        &context,
        &full_text,
    )
    .await;

    Json(QueryResponse {
        answer,
        sources: selected.into_iter().map(|d| d.name).collect(),
    })
}

// ============ POST /api/quiz ============

#[derive(Deserialize)]
struct GenerateRequest {
    text: String,
    #[serde(default)]
    num_questions: Option<usize>,
}

#[derive(Serialize)]
struct QuizResponse {
    quiz: Vec<QuizItem>,
}

async fn handle_quiz(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<QuizResponse>, AppError> {
    if req.text.trim().is_empty() {
        return Err(bad_request("Empty text provided for quiz generation."));
    }
    let count = req.num_questions.unwrap_or(5);
    let quiz = study::build_quiz(state.generator.as_ref(), &req.text, count).await;
    Ok(Json(QuizResponse { quiz }))
}

// ============ POST /api/flashcards ============

#[derive(Serialize)]
struct FlashcardResponse {
    flashcards: Vec<Flashcard>,
}

async fn handle_flashcards(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<FlashcardResponse>, AppError> {
    if req.text.trim().is_empty() {
        return Err(bad_request("Empty text"));
    }
    let count = req.num_questions.unwrap_or(10);
    let flashcards = study::build_flashcards(state.generator.as_ref(), &req.text, count).await;
    Ok(Json(FlashcardResponse { flashcards }))
}

// ============ POST /api/feedback ============

#[derive(Deserialize)]
struct FeedbackRequest {
    feature: String,
    item_name: String,
    #[serde(default)]
    thumbs_up: i64,
    #[serde(default)]
    rating: i64,
    #[serde(default)]
    note: Option<String>,
}

#[derive(Serialize)]
struct FeedbackResponse {
    message: String,
    count: usize,
}

async fn handle_feedback(
    State(state): State<AppState>,
    Json(req): Json<FeedbackRequest>,
) -> Json<FeedbackResponse> {
    let count = state.feedback.append(FeedbackRecord {
        feature: req.feature,
        item_name: req.item_name,
        thumbs_up: req.thumbs_up,
        rating: req.rating,
        note: req.note,
        created_at: Utc::now(),
    });
    Json(FeedbackResponse {
        message: "Feedback saved successfully".to_string(),
        count,
    })
}

// ============ GET /api/feedback ============

#[derive(Serialize)]
struct FeedbackListResponse {
    feedbacks: Vec<FeedbackRecord>,
}

async fn handle_feedback_list(State(state): State<AppState>) -> Json<FeedbackListResponse> {
    Json(FeedbackListResponse {
        feedbacks: state.feedback.all(),
    })
}
