//! HTTP API endpoints.
//!
//! Each handler canonicalizes the room code, runs one registry command and
//! serializes the outcome. Errors are rendered by `RoomError`'s
//! `IntoResponse` impl.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::error::{Result, RoomError};
use crate::protocol::*;
use crate::state::{normalize_code, AppState};

/// Build the application router. Unknown paths fall through to `static_dir`.
pub fn router(state: Arc<AppState>, static_dir: &str) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/create", post(create_room))
        .route("/api/join", post(join_room))
        .route("/api/start", post(start_round))
        .route("/api/submit", post(submit_answer))
        .route("/api/startVoting", post(start_voting))
        .route("/api/vote", post(cast_vote))
        .route("/api/finish", post(finish_round))
        .route("/api/state/{code}", get(get_state))
        .route("/api/rooms/{code}", get(get_roster))
        .fallback_service(ServeDir::new(static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| RoomError::bad_request(format!("Missing {}", field)))
}

/// GET /api/health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        rooms: state.room_count().await,
    })
}

/// POST /api/create
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateRoomRequest>,
) -> Result<Json<CreateRoomResponse>> {
    let (code, host) = state.create_room(req.name, req.avatar).await?;
    Ok(Json(CreateRoomResponse { code, host }))
}

/// POST /api/join
pub async fn join_room(
    State(state): State<Arc<AppState>>,
    Json(req): Json<JoinRoomRequest>,
) -> Result<Json<JoinRoomResponse>> {
    let code = normalize_code(req.code.as_deref())?;
    let (player, players, stage) = state.join_room(&code, req.name, req.avatar).await?;
    Ok(Json(JoinRoomResponse {
        success: true,
        players,
        stage,
        player,
    }))
}

/// POST /api/start
pub async fn start_round(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StartRoundRequest>,
) -> Result<Json<StageResponse>> {
    let code = normalize_code(req.code.as_deref())?;
    let stage = state
        .start_round(
            &code,
            req.prompts.unwrap_or_default(),
            req.requester_id.as_deref(),
        )
        .await?;
    Ok(Json(StageResponse {
        success: true,
        stage,
    }))
}

/// POST /api/submit
pub async fn submit_answer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<OkResponse>> {
    let code = normalize_code(req.code.as_deref())?;
    let player_id = required(req.player_id, "playerId")?;
    let prompt_index = required(req.prompt_index, "promptIndex")?;
    let text = required(req.text, "text")?;

    state
        .submit_answer(&code, &player_id, prompt_index, &text)
        .await?;
    Ok(Json(OkResponse { success: true }))
}

/// POST /api/startVoting
pub async fn start_voting(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StageRequest>,
) -> Result<Json<StageResponse>> {
    let code = normalize_code(req.code.as_deref())?;
    let stage = state
        .start_voting(&code, req.requester_id.as_deref())
        .await?;
    Ok(Json(StageResponse {
        success: true,
        stage,
    }))
}

/// POST /api/vote
pub async fn cast_vote(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VoteRequest>,
) -> Result<Json<OkResponse>> {
    let code = normalize_code(req.code.as_deref())?;
    let prompt_index = required(req.prompt_index, "promptIndex")?;
    let submission_index = required(req.submission_index, "submissionIndex")?;

    state
        .cast_vote(
            &code,
            req.voter_id.as_deref(),
            prompt_index,
            submission_index,
        )
        .await?;
    Ok(Json(OkResponse { success: true }))
}

/// POST /api/finish
pub async fn finish_round(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StageRequest>,
) -> Result<Json<FinishResponse>> {
    let code = normalize_code(req.code.as_deref())?;
    let results = state
        .finish_round(&code, req.requester_id.as_deref())
        .await?;
    Ok(Json(FinishResponse {
        success: true,
        stage: crate::types::Stage::Results,
        results,
    }))
}

/// GET /api/state/{code}
///
/// Polled by clients about once a second.
pub async fn get_state(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<RoomSnapshot>> {
    let code = normalize_code(Some(code.as_str()))?;
    Ok(Json(state.get_state(&code).await?))
}

/// GET /api/rooms/{code}
pub async fn get_roster(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<RosterResponse>> {
    let code = normalize_code(Some(code.as_str()))?;
    Ok(Json(state.get_roster(&code).await?))
}
