//! HTTP routes.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use echoes_domain::{GameSession, SessionId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::app::App;
use crate::infrastructure::ports::AudioError;
use crate::use_cases::{ActionParams, NarrateError, PlayerVerb, SessionError};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/game/start", post(start_game))
        .route("/game/action", post(game_action))
        .route("/game/sessions/{id}", get(get_session))
        .route("/game/narrate", post(narrate))
}

#[derive(Debug, Serialize)]
struct RootInfo {
    message: &'static str,
    status: &'static str,
    version: &'static str,
}

async fn root() -> Json<RootInfo> {
    Json(RootInfo {
        message: "Welcome to Echoes of the Unseen API",
        status: "Healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

// =============================================================================
// Game sessions
// =============================================================================

#[derive(Debug, Default, Deserialize)]
struct StartGameRequest {
    #[serde(default)]
    player_name: Option<String>,
}

async fn start_game(
    State(app): State<Arc<App>>,
    Json(request): Json<StartGameRequest>,
) -> Result<Json<GameSession>, ApiError> {
    let session = app
        .use_cases
        .sessions
        .create(request.player_name.as_deref())
        .await?;
    Ok(Json(session))
}

#[derive(Debug, Deserialize)]
struct ActionRequest {
    session_id: Uuid,
    action: String,
    #[serde(default)]
    parameters: Option<ActionParams>,
}

#[derive(Debug, Serialize)]
struct ActionResponse {
    session: GameSession,
    narration: String,
}

async fn game_action(
    State(app): State<Arc<App>>,
    Json(request): Json<ActionRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    let verb = PlayerVerb::parse(&request.action);
    let params = request.parameters.unwrap_or_default();

    let outcome = app
        .use_cases
        .sessions
        .process_action(SessionId::from_uuid(request.session_id), &verb, &params)
        .await?;

    Ok(Json(ActionResponse {
        session: outcome.session,
        narration: outcome.narration,
    }))
}

async fn get_session(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<Json<GameSession>, ApiError> {
    let session = app
        .use_cases
        .sessions
        .load(SessionId::from_uuid(id))
        .await?;
    Ok(Json(session))
}

// =============================================================================
// Narration audio
// =============================================================================

#[derive(Debug, Deserialize)]
struct NarrateRequest {
    text: String,
    #[serde(default)]
    session_id: Option<Uuid>,
}

async fn narrate(
    State(app): State<Arc<App>>,
    Json(request): Json<NarrateRequest>,
) -> Result<Response, ApiError> {
    let audio = app
        .use_cases
        .narrate
        .execute(&request.text, request.session_id.map(SessionId::from_uuid))
        .await?;

    Ok(([(header::CONTENT_TYPE, "audio/mpeg")], audio).into_response())
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    BadRequest(String),
    Unavailable,
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::Unavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Narration audio is not available",
            )
                .into_response(),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::NotFound(_) => ApiError::NotFound,
            SessionError::Validation(e) => ApiError::BadRequest(e.to_string()),
            SessionError::LocationIntegrity(_) | SessionError::Persistence(_) => {
                ApiError::Internal(e.to_string())
            }
        }
    }
}

impl From<NarrateError> for ApiError {
    fn from(e: NarrateError) -> Self {
        match e {
            NarrateError::SessionNotFound(_) => ApiError::NotFound,
            NarrateError::Audio(AudioError::EmptyText) => {
                ApiError::BadRequest(AudioError::EmptyText.to_string())
            }
            NarrateError::Audio(AudioError::Unavailable) => ApiError::Unavailable,
            NarrateError::Audio(AudioError::RequestFailed(_)) | NarrateError::Repo(_) => {
                ApiError::Internal(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::{FixedClock, SequentialRandom};
    use crate::infrastructure::memory_store::InMemoryDocumentStore;
    use crate::infrastructure::ports::MockNarrationAudioPort;
    use crate::infrastructure::tts::DisabledNarrationAudio;
    use crate::test_fixtures::app_with;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::Utc;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn router(app: App) -> Router {
        routes().with_state(Arc::new(app))
    }

    fn test_router() -> Router {
        router(app_with(
            Arc::new(InMemoryDocumentStore::new()),
            Arc::new(FixedClock(Utc::now())),
        ))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn root_reports_healthy() {
        let response = test_router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "Healthy");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let response = test_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn start_then_act_then_fetch() {
        let app = test_router();

        let response = app
            .clone()
            .oneshot(post_json("/game/start", json!({"player_name": "Ada"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let session = json_body(response).await;
        assert_eq!(session["player"]["name"], "Ada");
        assert_eq!(session["current_location_id"], "listener_study");
        let session_id = session["session_id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(post_json(
                "/game/action",
                json!({
                    "session_id": session_id,
                    "action": "examine",
                    "parameters": {"target": "desk"}
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let outcome = json_body(response).await;
        assert!(outcome["narration"]
            .as_str()
            .unwrap()
            .contains("almost invisible drawer"));
        assert_eq!(
            outcome["session"]["game_state"]["object_states"]["listener_study"]["desk"]
                ["drawer_found"],
            true
        );

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/game/sessions/{}", session_id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, outcome["session"]);
    }

    #[tokio::test]
    async fn start_without_name_uses_default() {
        let response = test_router()
            .oneshot(post_json("/game/start", json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["player"]["name"], "The Listener");
    }

    #[tokio::test]
    async fn start_with_overlong_name_is_bad_request() {
        let response = test_router()
            .oneshot(post_json("/game/start", json!({"player_name": "x".repeat(101)})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn action_on_missing_session_is_not_found() {
        let response = test_router()
            .oneshot(post_json(
                "/game/action",
                json!({"session_id": Uuid::new_v4(), "action": "look"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn fetching_unknown_session_is_not_found() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri(format!("/game/sessions/{}", Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn narrate_without_audio_service_is_unavailable() {
        let response = test_router()
            .oneshot(post_json("/game/narrate", json!({"text": "Hello"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn narrate_returns_audio_bytes() {
        let mut audio = MockNarrationAudioPort::new();
        audio
            .expect_synthesize()
            .returning(|_, _| Ok(b"ID3-audio".to_vec()));
        let app = App::new(
            Arc::new(InMemoryDocumentStore::new()),
            Arc::new(audio),
            Arc::new(FixedClock(Utc::now())),
            Arc::new(SequentialRandom::default()),
        );

        let response = router(app)
            .oneshot(post_json("/game/narrate", json!({"text": "The rain falls."})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/mpeg");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"ID3-audio");
    }

    #[tokio::test]
    async fn narrate_blank_text_is_bad_request() {
        let app = App::new(
            Arc::new(InMemoryDocumentStore::new()),
            Arc::new(DisabledNarrationAudio),
            Arc::new(FixedClock(Utc::now())),
            Arc::new(SequentialRandom::default()),
        );

        let response = router(app)
            .oneshot(post_json("/game/narrate", json!({"text": " "})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
