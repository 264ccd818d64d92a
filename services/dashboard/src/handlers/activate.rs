use anyhow::Context as _;
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use tvlink_domain::activation::{ActivationMethod, ActivationOutcome};

use crate::error::DashboardError;
use crate::identity::VisitorId;
use crate::infra::qr;
use crate::state::AppState;
use crate::usecase::activate::{ActivateOutput, ActivateUseCase};

const INVALID_CODE_MESSAGE: &str = "Invalid code format";
const NO_QR_CODE_MESSAGE: &str = "No QR code found";

fn parse_method(raw: Option<&str>, default: ActivationMethod) -> ActivationMethod {
    raw.and_then(ActivationMethod::from_str_opt)
        .unwrap_or(default)
}

// ── POST /api/activate ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ActivateRequest {
    #[serde(default)]
    pub code: String,
    pub method: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivateResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<ActivationOutcome>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ActivateResponse {
    fn invalid_code() -> Self {
        Self {
            success: false,
            outcome: None,
            message: INVALID_CODE_MESSAGE.to_owned(),
            code: None,
        }
    }
}

impl From<ActivateOutput> for ActivateResponse {
    fn from(output: ActivateOutput) -> Self {
        Self {
            success: output.report.is_success(),
            outcome: Some(output.report.outcome),
            message: output.report.message,
            code: Some(output.code.into_inner()),
        }
    }
}

/// Malformed codes are a normal `success: false` payload, not an error status.
fn activate_response(
    result: Result<ActivateOutput, DashboardError>,
) -> Result<ActivateResponse, DashboardError> {
    match result {
        Ok(output) => Ok(output.into()),
        Err(DashboardError::InvalidCode(e)) => {
            tracing::debug!(error = %e, "rejected activation code");
            Ok(ActivateResponse::invalid_code())
        }
        Err(e) => Err(e),
    }
}

pub async fn activate(
    visitor: VisitorId,
    State(state): State<AppState>,
    Json(body): Json<ActivateRequest>,
) -> Result<Json<ActivateResponse>, DashboardError> {
    let method = parse_method(body.method.as_deref(), ActivationMethod::Manual);
    let usecase = ActivateUseCase {
        cookie_sets: state.cookie_set_repo(),
        attempts: state.attempt_repo(),
        link: state.relay(),
    };
    let result = usecase.execute(visitor.0, &body.code, method).await;
    activate_response(result).map(Json)
}

// ── POST /api/scan ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ScanRequest {
    pub image: String,
    pub method: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    /// A code was decoded, whatever the activation outcome.
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<ActivationOutcome>,
    pub message: String,
}

impl ScanResponse {
    fn no_code() -> Self {
        Self {
            success: false,
            code: None,
            activated: None,
            outcome: None,
            message: NO_QR_CODE_MESSAGE.to_owned(),
        }
    }
}

impl From<ActivateOutput> for ScanResponse {
    fn from(output: ActivateOutput) -> Self {
        Self {
            success: true,
            activated: Some(output.report.is_success()),
            outcome: Some(output.report.outcome),
            message: output.report.message,
            code: Some(output.code.into_inner()),
        }
    }
}

pub async fn scan(
    visitor: VisitorId,
    State(state): State<AppState>,
    Json(body): Json<ScanRequest>,
) -> Result<Json<ScanResponse>, DashboardError> {
    let method = parse_method(body.method.as_deref(), ActivationMethod::QrScan);
    let bytes = qr::decode_data_url(&body.image)
        .map_err(|e| DashboardError::InvalidImage(e.to_string()))?;

    let decoded = tokio::task::spawn_blocking(move || qr::decode(&bytes))
        .await
        .context("join QR decode task")?
        .map_err(|e| DashboardError::InvalidImage(e.to_string()))?;
    let Some(code) = decoded else {
        return Ok(Json(ScanResponse::no_code()));
    };

    let usecase = ActivateUseCase {
        cookie_sets: state.cookie_set_repo(),
        attempts: state.attempt_repo(),
        link: state.relay(),
    };
    let output = usecase.execute_code(visitor.0, code, method).await?;
    Ok(Json(output.into()))
}
