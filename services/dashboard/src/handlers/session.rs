use axum::{Json, extract::State};
use serde::Serialize;
use uuid::Uuid;

use crate::error::DashboardError;
use crate::identity::VisitorId;
use crate::state::AppState;
use crate::usecase::cookie_set::HasActiveCookieSetUseCase;

// ── GET /api/user/session ────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub session_display: String,
}

pub async fn get_session(visitor: VisitorId) -> Json<SessionResponse> {
    Json(SessionResponse {
        session_id: visitor.0,
        session_display: visitor.display(),
    })
}

// ── GET /api/status ──────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: &'static str,
    pub cookies_valid: bool,
}

pub async fn get_status(
    visitor: VisitorId,
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, DashboardError> {
    let usecase = HasActiveCookieSetUseCase {
        repo: state.cookie_set_repo(),
    };
    let cookies_valid = usecase.execute(visitor.0).await?;
    Ok(Json(StatusResponse {
        status: "operational",
        cookies_valid,
    }))
}
