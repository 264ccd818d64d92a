use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use tvlink_domain::activation::{SessionCheck, ValidationStatus};
use tvlink_domain::cookie::{CookieInput, CookieRecord};

use crate::domain::types::CookieSetSummary;
use crate::error::DashboardError;
use crate::identity::VisitorId;
use crate::state::AppState;
use crate::usecase::cookie_set::{
    ActivateCookieSetUseCase, DeleteCookieSetUseCase, ListCookieSetsUseCase,
    UploadCookieSetInput, UploadCookieSetUseCase, ValidateCookieSetUseCase,
};

// ── Shared types ─────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IdQuery {
    /// A missing or malformed id cannot name a stored set.
    fn parse(&self) -> Result<Uuid, DashboardError> {
        self.id
            .as_deref()
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
            .ok_or(DashboardError::CookieSetNotFound)
    }
}

// ── GET /api/cookies ─────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CookieSetResponse {
    pub id: Uuid,
    pub label: String,
    pub active: bool,
    pub validation_status: ValidationStatus,
    #[serde(serialize_with = "tvlink_core::serde::to_minute")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<CookieSetSummary> for CookieSetResponse {
    fn from(summary: CookieSetSummary) -> Self {
        Self {
            id: summary.id,
            label: summary.label,
            active: summary.active,
            validation_status: summary.validation_status,
            created_at: summary.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct CookieListResponse {
    pub cookies: Vec<CookieSetResponse>,
}

pub async fn list_cookies(
    visitor: VisitorId,
    State(state): State<AppState>,
) -> Result<Json<CookieListResponse>, DashboardError> {
    let usecase = ListCookieSetsUseCase {
        repo: state.cookie_set_repo(),
    };
    let sets = usecase.execute(visitor.0).await?;
    Ok(Json(CookieListResponse {
        cookies: sets.into_iter().map(Into::into).collect(),
    }))
}

// ── POST /api/cookies ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UploadCookiesRequest {
    pub cookies: Value,
    pub filename: Option<String>,
}

#[derive(Serialize)]
pub struct UploadCookiesResponse {
    pub success: bool,
    pub message: String,
    pub id: Uuid,
}

/// Arrays of well-formed records skip text parsing; anything else goes
/// through the normalizer as text.
fn cookie_input(value: Value) -> CookieInput {
    match value {
        Value::String(text) => CookieInput::Text(text),
        Value::Array(_) => match serde_json::from_value::<Vec<CookieRecord>>(value.clone()) {
            Ok(records) => CookieInput::Records(records),
            Err(_) => CookieInput::Text(value.to_string()),
        },
        other => CookieInput::Text(other.to_string()),
    }
}

pub async fn upload_cookies(
    visitor: VisitorId,
    State(state): State<AppState>,
    Json(body): Json<UploadCookiesRequest>,
) -> Result<Json<UploadCookiesResponse>, DashboardError> {
    let usecase = UploadCookieSetUseCase {
        repo: state.cookie_set_repo(),
    };
    let output = usecase
        .execute(
            visitor.0,
            UploadCookieSetInput {
                raw: cookie_input(body.cookies),
                filename: body.filename,
            },
        )
        .await?;
    Ok(Json(UploadCookiesResponse {
        success: true,
        message: format!(
            "Cookie uploaded successfully ({} cookies parsed)",
            output.cookie_count
        ),
        id: output.id,
    }))
}

// ── DELETE /api/cookies?id= ──────────────────────────────────────────────────

pub async fn delete_cookies(
    visitor: VisitorId,
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<MessageResponse>, DashboardError> {
    let id = query.parse()?;
    let usecase = DeleteCookieSetUseCase {
        repo: state.cookie_set_repo(),
    };
    usecase.execute(visitor.0, id).await?;
    Ok(Json(MessageResponse::ok("Cookie deleted")))
}

// ── GET /api/cookies/activate?id= ────────────────────────────────────────────

pub async fn activate_cookies(
    visitor: VisitorId,
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<MessageResponse>, DashboardError> {
    let id = query.parse()?;
    let usecase = ActivateCookieSetUseCase {
        repo: state.cookie_set_repo(),
    };
    usecase.execute(visitor.0, id).await?;
    Ok(Json(MessageResponse::ok("Cookie activated")))
}

// ── GET /api/cookies/validate?id= ────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<SessionCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<SessionCheck> for ValidateResponse {
    fn from(check: SessionCheck) -> Self {
        if check.ok {
            Self {
                valid: true,
                info: Some(check),
                error: None,
            }
        } else {
            Self {
                valid: false,
                info: None,
                error: Some(check.err.unwrap_or_else(|| "Validation failed".to_owned())),
            }
        }
    }
}

pub async fn validate_cookies(
    visitor: VisitorId,
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<ValidateResponse>, DashboardError> {
    let id = query.parse()?;
    let usecase = ValidateCookieSetUseCase {
        repo: state.cookie_set_repo(),
        checker: state.relay(),
    };
    let check = usecase.execute(visitor.0, id).await?;
    Ok(Json(check.into()))
}
