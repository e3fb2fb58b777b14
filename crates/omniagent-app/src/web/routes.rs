use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use omniagent_agents::RegistryError;
use omniagent_chat::{SessionError, SessionId};
use omniagent_types::{AgentId, TeamMode};
use std::sync::Arc;

use crate::web::{
    protocol::{AgentInfo, CreateSessionRequest, MessageView, SendMessageRequest, SessionInfo},
    session_manager::{SendError, SessionManager},
};

/// Application state shared across routes
#[derive(Clone)]
pub struct AppState {
    pub session_manager: Arc<SessionManager>,
}

/// Create router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/agents", get(list_agents))
        .route("/api/sessions", post(create_session))
        .route(
            "/api/sessions/:id",
            get(get_session_details).delete(close_session),
        )
        .route("/api/sessions/:id/messages", post(send_message))
        .with_state(state)
}

/// GET /api/agents - List the registered agents
async fn list_agents(State(state): State<AppState>) -> Json<serde_json::Value> {
    let agents: Vec<AgentInfo> = state
        .session_manager
        .dispatcher()
        .registry()
        .agents()
        .iter()
        .map(AgentInfo::from)
        .collect();
    Json(serde_json::json!({ "agents": agents }))
}

/// POST /api/sessions - Start a chat with one agent
async fn create_session(
    State(state): State<AppState>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionInfo>), AppError> {
    let team_mode = match payload.team_mode.as_deref() {
        Some(raw) => Some(
            TeamMode::from_str(raw)
                .ok_or_else(|| AppError::BadRequest(format!("unknown team mode: {}", raw)))?,
        ),
        None => None,
    };

    let session = state
        .session_manager
        .create_session(&AgentId::from_str(&payload.agent_id), team_mode)
        .await?;

    let info = SessionInfo::from(&*session.lock().await);
    Ok((StatusCode::CREATED, Json(info)))
}

/// GET /api/sessions/:id - Session details with the full transcript
async fn get_session_details(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<SessionInfo>, AppError> {
    let session = state
        .session_manager
        .get_session(&id)
        .await
        .ok_or_else(|| AppError::NotFound("Session not found".into()))?;

    let info = SessionInfo::from(&*session.lock().await);
    Ok(Json(info))
}

/// POST /api/sessions/:id/messages - Submit text and wait for the reply
async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    Json(payload): Json<SendMessageRequest>,
) -> Result<Json<MessageView>, AppError> {
    let reply = state.session_manager.send_message(&id, &payload.text).await?;
    Ok(Json(MessageView::from(&reply)))
}

/// DELETE /api/sessions/:id - Close a session
async fn close_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !state.session_manager.remove_session(&id).await {
        return Err(AppError::NotFound("Session not found".into()));
    }

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Session closed successfully",
    })))
}

/// Error type for HTTP handlers
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::EmptyInput => AppError::BadRequest(err.to_string()),
            SessionError::Busy => AppError::Conflict(err.to_string()),
            SessionError::ForeignTurn(_) => AppError::Internal(err.to_string()),
        }
    }
}

impl From<SendError> for AppError {
    fn from(err: SendError) -> Self {
        match err {
            SendError::NotFound => AppError::NotFound("Session not found".into()),
            SendError::Session(err) => err.into(),
            SendError::Interrupted(msg) => AppError::Internal(format!("Turn interrupted: {}", msg)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
