use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use tvlink_core::error::{ErrorKind, json_error};
use tvlink_domain::code::CodeError;
use tvlink_domain::cookie::CookieError;

/// Dashboard service error variants.
///
/// Input problems are reported before any store or outbound call. Remote
/// rejections are not errors: they travel as `ActivationReport`/`SessionCheck`.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("invalid code format")]
    InvalidCode(#[from] CodeError),
    #[error("could not parse cookie file")]
    UnparseableCookies(#[from] CookieError),
    #[error("could not read image: {0}")]
    InvalidImage(String),
    #[error("cookie set not found")]
    CookieSetNotFound,
    #[error("missing visitor session")]
    MissingSession,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ErrorKind for DashboardError {
    fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCode(_) => "INVALID_CODE",
            Self::UnparseableCookies(_) => "UNPARSEABLE_COOKIES",
            Self::InvalidImage(_) => "INVALID_IMAGE",
            Self::CookieSetNotFound => "COOKIE_SET_NOT_FOUND",
            Self::MissingSession => "MISSING_SESSION",
            Self::Internal(_) => "INTERNAL",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidCode(_) | Self::UnparseableCookies(_) | Self::InvalidImage(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::CookieSetNotFound => StatusCode::NOT_FOUND,
            Self::MissingSession => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        json_error(&self)
    }
}
