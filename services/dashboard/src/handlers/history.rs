use axum::{Json, extract::State};
use serde::Serialize;

use tvlink_domain::activation::{ActivationMethod, ActivationOutcome};

use crate::domain::types::ActivationAttempt;
use crate::error::DashboardError;
use crate::identity::VisitorId;
use crate::state::AppState;
use crate::usecase::history::GetHistoryUseCase;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptResponse {
    #[serde(serialize_with = "tvlink_core::serde::to_rfc3339_ms")]
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub code: String,
    pub method: ActivationMethod,
    pub outcome: ActivationOutcome,
    pub success: bool,
    pub message: String,
}

impl From<ActivationAttempt> for AttemptResponse {
    fn from(attempt: ActivationAttempt) -> Self {
        Self {
            success: attempt.success(),
            timestamp: attempt.created_at,
            code: attempt.code,
            method: attempt.method,
            outcome: attempt.outcome,
            message: attempt.message,
        }
    }
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub history: Vec<AttemptResponse>,
    pub total: u64,
}

// ── GET /api/history ─────────────────────────────────────────────────────────

pub async fn get_history(
    visitor: VisitorId,
    State(state): State<AppState>,
) -> Result<Json<HistoryResponse>, DashboardError> {
    let usecase = GetHistoryUseCase {
        repo: state.attempt_repo(),
    };
    let output = usecase.execute(visitor.0).await?;
    Ok(Json(HistoryResponse {
        history: output.attempts.into_iter().map(Into::into).collect(),
        total: output.total,
    }))
}
