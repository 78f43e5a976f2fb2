use axum::Router;
use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::{Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use subtle::ConstantTimeEq;
use tower_http::limit::RequestBodyLimitLayer;

use studyforge_llm::LlmProvider;

use super::handlers::{
    ask_handler, flashcards_handler, health_handler, mindmap_handler, quiz_handler,
    search_handler, studyplan_handler, summary_handler, upload_handler,
};
use super::server::AppState;

#[derive(Clone)]
struct AuthConfig {
    token: Option<String>,
}

/// Multipart framing overhead allowed on top of the raw file size limit.
const MULTIPART_SLACK: u64 = 64 * 1024;

pub(crate) fn build_router<P: LlmProvider + 'static>(
    state: AppState<P>,
    auth_token: Option<String>,
    max_file_size: u64,
) -> Router {
    let auth_cfg = AuthConfig { token: auth_token };
    let body_limit = usize::try_from(max_file_size + MULTIPART_SLACK).unwrap_or(usize::MAX);

    let protected = Router::new()
        .route("/pdf/upload", post(upload_handler::<P>))
        .route("/query/ask", post(ask_handler::<P>))
        .route("/query/search", post(search_handler::<P>))
        .route("/generate/summary", post(summary_handler::<P>))
        .route("/generate/quiz", post(quiz_handler::<P>))
        .route("/generate/flashcards", post(flashcards_handler::<P>))
        .route("/generate/mindmap", post(mindmap_handler::<P>))
        .route("/generate/studyplan", post(studyplan_handler::<P>))
        .layer(middleware::from_fn_with_state(auth_cfg, auth_middleware))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit));

    Router::new()
        .route("/health", get(health_handler::<P>))
        .merge(protected)
        .with_state(state)
}

async fn auth_middleware(
    axum::extract::State(cfg): axum::extract::State<AuthConfig>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(ref expected) = cfg.token {
        let auth_header = req
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok());

        let token = auth_header
            .and_then(|v| v.strip_prefix("Bearer "))
            .unwrap_or("");

        // Hash both values to fixed-length digests to avoid leaking token length
        let token_hash = blake3::hash(token.as_bytes());
        let expected_hash = blake3::hash(expected.as_bytes());
        if !bool::from(token_hash.as_bytes().ct_eq(expected_hash.as_bytes())) {
            return StatusCode::UNAUTHORIZED.into_response();
        }
    }

    next.run(req).await
}
