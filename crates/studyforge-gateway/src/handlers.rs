use axum::Json;
use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Response};

use studyforge_document::{chunk_text, extract};
use studyforge_llm::{LlmProvider, Message, prompt};
use studyforge_store::Metadata;

use super::error::ApiError;
use super::server::AppState;

const ASK_CONTEXT_CHUNKS: usize = 3;
const SEARCH_RESULT_CHUNKS: usize = 5;
const HIGH_RELEVANCE_CUTOFF: usize = 2;

#[derive(serde::Serialize)]
pub(crate) struct UploadResponse {
    status: &'static str,
    message: &'static str,
    filename: String,
    file_size_mb: f64,
    num_pages: usize,
    text_length: usize,
    num_chunks: usize,
    embeddings_stored: usize,
}

#[derive(serde::Serialize)]
pub(crate) struct EmptyDocumentResponse {
    status: &'static str,
    message: &'static str,
    filename: String,
}

pub(crate) async fn upload_handler<P: LlmProvider>(
    State(state): State<AppState<P>>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut filename = None;
    let mut data = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Error reading file: {e}")))?
    {
        if field.name() == Some("file") {
            filename = field.file_name().map(ToOwned::to_owned);
            data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Error reading file: {e}")))?,
            );
        }
    }

    let filename = filename.ok_or_else(|| ApiError::BadRequest("Missing 'file' field".into()))?;
    let data = data.ok_or_else(|| ApiError::BadRequest("Missing 'file' field".into()))?;

    if !filename.to_lowercase().ends_with(".pdf") {
        return Err(ApiError::InvalidFileType);
    }

    #[allow(clippy::cast_precision_loss)]
    let file_size_mb = data.len() as f64 / (1024.0 * 1024.0);
    if data.len() as u64 > state.max_file_size {
        return Err(ApiError::FileTooLarge {
            limit_mb: state.max_file_size / (1024 * 1024),
        });
    }

    let doc = extract(data.to_vec())
        .await
        .map_err(|e| ApiError::Extraction(e.to_string()))?;

    if doc.is_empty() {
        tracing::warn!(filename = %filename, "uploaded PDF has no extractable text");
        return Ok(Json(EmptyDocumentResponse {
            status: "error",
            message: "The PDF document is empty or contains no extractable text",
            filename,
        })
        .into_response());
    }

    let chunks = chunk_text(&doc.text, state.chunking.chunk_size, state.chunking.overlap)?;
    let num_chunks = chunks.len();

    let metadatas: Vec<Metadata> = (0..num_chunks)
        .map(|i| {
            let mut m = Metadata::new();
            m.insert("filename".into(), filename.clone().into());
            m.insert("chunk_id".into(), i.into());
            m.insert("total_chunks".into(), num_chunks.into());
            m.insert("num_pages".into(), doc.num_pages.into());
            m
        })
        .collect();
    let ids: Vec<String> = (0..num_chunks).map(|i| format!("chunk_{i}")).collect();

    let text_length = doc.text.chars().count();

    // Write guard held across the whole swap so readers never see a
    // half-replaced document.
    let mut store = state.store.write().await;
    store.reset().await?;
    let embeddings_stored = store.add(chunks, Some(metadatas), Some(ids)).await?;
    store.set_full_text(doc.text);
    drop(store);

    tracing::info!(filename = %filename, num_chunks, "PDF processed and stored");

    Ok(Json(UploadResponse {
        status: "success",
        message: "PDF processed and stored successfully",
        filename,
        file_size_mb: (file_size_mb * 100.0).round() / 100.0,
        num_pages: doc.num_pages,
        text_length,
        num_chunks,
        embeddings_stored,
    })
    .into_response())
}

#[derive(serde::Deserialize)]
pub(crate) struct QueryRequest {
    query: String,
}

#[derive(serde::Serialize)]
pub(crate) struct AskResponse {
    status: &'static str,
    query: String,
    answer: String,
    context_used: usize,
}

pub(crate) async fn ask_handler<P: LlmProvider>(
    State(state): State<AppState<P>>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let store = state.store.read().await;
    if store.full_text().is_empty() {
        return Err(ApiError::NoDocument);
    }

    let retrieval = store.fetch_first(ASK_CONTEXT_CHUNKS);
    let context_used = retrieval.documents.len();
    let context = if retrieval.documents.is_empty() {
        prompt::truncate_chars(store.full_text(), prompt::ASK_FALLBACK_CHARS).to_owned()
    } else {
        retrieval.documents.join("\n\n")
    };
    drop(store);

    let messages = vec![Message::user(prompt::ask(&context, &req.query))];
    let answer = state
        .provider
        .chat(&messages, prompt::ASK_OPTIONS)
        .await?;

    Ok(Json(AskResponse {
        status: "success",
        query: req.query,
        answer,
        context_used,
    }))
}

#[derive(serde::Serialize)]
struct SearchResult {
    chunk_id: u64,
    text: String,
    relevance: &'static str,
}

#[derive(serde::Serialize)]
pub(crate) struct SearchResponse {
    status: &'static str,
    query: String,
    results_count: usize,
    results: Vec<SearchResult>,
}

pub(crate) async fn search_handler<P: LlmProvider>(
    State(state): State<AppState<P>>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let store = state.store.read().await;
    if store.full_text().is_empty() {
        return Err(ApiError::NoDocument);
    }

    let retrieval = store.fetch_first(SEARCH_RESULT_CHUNKS);
    drop(store);

    let results: Vec<SearchResult> = retrieval
        .documents
        .into_iter()
        .enumerate()
        .map(|(i, text)| SearchResult {
            chunk_id: retrieval
                .metadatas
                .get(i)
                .and_then(|m| m.get("chunk_id"))
                .and_then(serde_json::Value::as_u64)
                .unwrap_or(i as u64),
            text,
            relevance: if i < HIGH_RELEVANCE_CUTOFF {
                "high"
            } else {
                "medium"
            },
        })
        .collect();

    Ok(Json(SearchResponse {
        status: "success",
        query: req.query,
        results_count: results.len(),
        results,
    }))
}

#[derive(serde::Serialize)]
pub(crate) struct SummaryResponse {
    status: &'static str,
    summary: String,
    text_length_analyzed: usize,
}

pub(crate) async fn summary_handler<P: LlmProvider>(
    State(state): State<AppState<P>>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let text = full_text_or_no_document(&state).await?;
    let text_length_analyzed = prompt::truncate_chars(&text, prompt::SUMMARY_CHARS)
        .chars()
        .count();

    let messages = vec![Message::user(prompt::summary(&text))];
    let summary = state
        .provider
        .chat(&messages, prompt::SUMMARY_OPTIONS)
        .await?;

    Ok(Json(SummaryResponse {
        status: "success",
        summary,
        text_length_analyzed,
    }))
}

#[derive(serde::Deserialize)]
pub(crate) struct QuizRequest {
    #[serde(default = "default_num_questions")]
    num_questions: u32,
    #[serde(default = "default_difficulty")]
    difficulty: String,
}

fn default_num_questions() -> u32 {
    5
}

fn default_difficulty() -> String {
    "medium".into()
}

#[derive(serde::Serialize)]
pub(crate) struct QuizResponse {
    status: &'static str,
    num_questions: u32,
    difficulty: String,
    quiz: String,
}

pub(crate) async fn quiz_handler<P: LlmProvider>(
    State(state): State<AppState<P>>,
    req: Option<Json<QuizRequest>>,
) -> Result<Json<QuizResponse>, ApiError> {
    let Json(req) = req.unwrap_or(Json(QuizRequest {
        num_questions: default_num_questions(),
        difficulty: default_difficulty(),
    }));

    let text = full_text_or_no_document(&state).await?;
    let messages = vec![Message::user(prompt::quiz(
        &text,
        req.num_questions,
        &req.difficulty,
    ))];
    let quiz = state.provider.chat(&messages, prompt::QUIZ_OPTIONS).await?;

    Ok(Json(QuizResponse {
        status: "success",
        num_questions: req.num_questions,
        difficulty: req.difficulty,
        quiz,
    }))
}

#[derive(serde::Deserialize)]
pub(crate) struct FlashcardsRequest {
    #[serde(default = "default_num_cards")]
    num_cards: u32,
}

fn default_num_cards() -> u32 {
    10
}

#[derive(serde::Serialize)]
pub(crate) struct FlashcardsResponse {
    status: &'static str,
    num_cards: u32,
    flashcards: String,
}

pub(crate) async fn flashcards_handler<P: LlmProvider>(
    State(state): State<AppState<P>>,
    req: Option<Json<FlashcardsRequest>>,
) -> Result<Json<FlashcardsResponse>, ApiError> {
    let num_cards = req.map_or_else(default_num_cards, |Json(r)| r.num_cards);

    let text = full_text_or_no_document(&state).await?;
    let messages = vec![Message::user(prompt::flashcards(&text, num_cards))];
    let flashcards = state
        .provider
        .chat(&messages, prompt::FLASHCARDS_OPTIONS)
        .await?;

    Ok(Json(FlashcardsResponse {
        status: "success",
        num_cards,
        flashcards,
    }))
}

#[derive(serde::Serialize)]
pub(crate) struct MindmapResponse {
    status: &'static str,
    mindmap: String,
}

pub(crate) async fn mindmap_handler<P: LlmProvider>(
    State(state): State<AppState<P>>,
) -> Result<Json<MindmapResponse>, ApiError> {
    let text = full_text_or_no_document(&state).await?;
    let messages = vec![Message::user(prompt::mindmap(&text))];
    let mindmap = state
        .provider
        .chat(&messages, prompt::MINDMAP_OPTIONS)
        .await?;

    Ok(Json(MindmapResponse {
        status: "success",
        mindmap,
    }))
}

#[derive(serde::Deserialize)]
pub(crate) struct StudyPlanRequest {
    #[serde(default = "default_duration_days")]
    duration_days: u32,
}

fn default_duration_days() -> u32 {
    7
}

#[derive(serde::Serialize)]
pub(crate) struct StudyPlanResponse {
    status: &'static str,
    duration_days: u32,
    study_plan: String,
}

pub(crate) async fn studyplan_handler<P: LlmProvider>(
    State(state): State<AppState<P>>,
    req: Option<Json<StudyPlanRequest>>,
) -> Result<Json<StudyPlanResponse>, ApiError> {
    let duration_days = req.map_or_else(default_duration_days, |Json(r)| r.duration_days);

    let text = full_text_or_no_document(&state).await?;
    let messages = vec![Message::user(prompt::studyplan(&text, duration_days))];
    let study_plan = state
        .provider
        .chat(&messages, prompt::STUDYPLAN_OPTIONS)
        .await?;

    Ok(Json(StudyPlanResponse {
        status: "success",
        duration_days,
        study_plan,
    }))
}

#[derive(serde::Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
    uptime_secs: u64,
}

pub(crate) async fn health_handler<P: LlmProvider>(
    State(state): State<AppState<P>>,
) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}

/// Clone the full document text, or fail fast before any LLM call when no
/// document has been uploaded.
async fn full_text_or_no_document<P>(state: &AppState<P>) -> Result<String, ApiError> {
    let store = state.store.read().await;
    if store.full_text().is_empty() {
        return Err(ApiError::NoDocument);
    }
    Ok(store.full_text().to_owned())
}
