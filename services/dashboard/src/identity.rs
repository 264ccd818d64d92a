//! Anonymous visitor identity carried in a server-minted session cookie.
//!
//! Not an authentication boundary: the id only partitions stored rows.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::USER_AGENT;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;
use uuid::Uuid;

use crate::error::DashboardError;
use crate::state::AppState;
use crate::usecase::visitor::{TouchVisitorInput, TouchVisitorUseCase};

/// Cookie name for the visitor session id.
pub const SESSION_COOKIE: &str = "tvlink_session";

/// Session cookie Max-Age in seconds (30 days).
pub const SESSION_MAX_AGE: i64 = 30 * 24 * 60 * 60;

/// The calling visitor, resolved by [`visitor_session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitorId(pub Uuid);

impl VisitorId {
    /// Truncated form shown in the dashboard header: `1a2b3c4d...`.
    pub fn display(&self) -> String {
        let full = self.0.to_string();
        format!("{}...", &full[..8])
    }
}

/// Read the visitor id from the jar. Returns the id and whether it was freshly minted.
pub fn resolve_visitor(jar: &CookieJar) -> (VisitorId, bool) {
    match jar
        .get(SESSION_COOKIE)
        .and_then(|c| c.value().parse::<Uuid>().ok())
    {
        Some(id) => (VisitorId(id), false),
        None => (VisitorId(Uuid::new_v4()), true),
    }
}

pub fn session_cookie(id: VisitorId, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id.0.to_string()))
        .path("/")
        .max_age(Duration::seconds(SESSION_MAX_AGE))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}

fn client_ip(parts: &axum::http::HeaderMap) -> Option<String> {
    parts
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .or_else(|| parts.get("x-real-ip").and_then(|v| v.to_str().ok()))
        .map(|ip| ip.trim().to_owned())
        .filter(|ip| !ip.is_empty())
}

/// Middleware: resolve or mint the visitor id, record the visit, and expose
/// [`VisitorId`] to handlers through request extensions.
pub async fn visitor_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> (CookieJar, Response) {
    let (visitor, minted) = resolve_visitor(&jar);

    let touch = TouchVisitorUseCase {
        repo: state.visitor_repo(),
    };
    let input = TouchVisitorInput {
        ip_address: client_ip(request.headers()),
        user_agent: request
            .headers()
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
    };
    if let Err(e) = touch.execute(visitor.0, input).await {
        tracing::warn!(error = %e, visitor_id = %visitor.0, "failed to record visitor");
    }

    request.extensions_mut().insert(visitor);
    let response = next.run(request).await;

    let jar = if minted {
        jar.add(session_cookie(visitor, state.secure_cookies))
    } else {
        jar
    };
    (jar, response)
}

impl<S> FromRequestParts<S> for VisitorId
where
    S: Send + Sync,
{
    type Rejection = DashboardError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<VisitorId>()
            .copied()
            .ok_or(DashboardError::MissingSession)
    }
}
