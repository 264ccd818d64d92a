//! HTTP client for the activation backend.
//!
//! Both ports are infallible by contract. Every failure crossing this boundary
//! is turned into a result value exactly once, by the `From<RelayError>` impls.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Serialize;
use url::Url;

use tvlink_domain::activation::{ActivationReport, SessionCheck};
use tvlink_domain::code::ActivationCode;
use tvlink_domain::cookie::CookieRecord;

use crate::domain::repository::{DeviceLinkPort, SessionCheckPort};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("activation backend is not configured")]
    NotConfigured,
    #[error("HTTP {}", .0.as_u16())]
    Status(StatusCode),
    #[error("Timeout - the activation backend took too long to respond")]
    Timeout,
    #[error("{0}")]
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for RelayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(e)
        }
    }
}

impl From<RelayError> for ActivationReport {
    fn from(e: RelayError) -> Self {
        tracing::warn!(error = %e, "activation relay failed");
        ActivationReport::rejected(e.to_string())
    }
}

impl From<RelayError> for SessionCheck {
    fn from(e: RelayError) -> Self {
        tracing::warn!(error = %e, "session check relay failed");
        SessionCheck::failed(e.to_string())
    }
}

#[derive(Serialize)]
struct ActivateBody<'a> {
    cookies: &'a [CookieRecord],
    code: &'a ActivationCode,
}

#[derive(Serialize)]
struct CheckBody<'a> {
    cookies: &'a [CookieRecord],
}

#[derive(Clone)]
pub struct RelayClient {
    http: reqwest::Client,
    base_url: Option<Url>,
}

impl RelayClient {
    /// `base_url = None` yields a client that rejects every call without
    /// touching the network.
    pub fn new(base_url: Option<&str>, timeout: Duration) -> anyhow::Result<Self> {
        let base_url = base_url
            .map(|raw| {
                let mut url = Url::parse(raw)?;
                // Keep a trailing slash so `join` appends instead of replacing
                // the last path segment.
                if !url.path().ends_with('/') {
                    let path = format!("{}/", url.path());
                    url.set_path(&path);
                }
                Ok::<_, url::ParseError>(url)
            })
            .transpose()?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    async fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<T, RelayError>
    where
        B: Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let base = self.base_url.as_ref().ok_or(RelayError::NotConfigured)?;
        let url = base
            .join(endpoint)
            .map_err(|_| RelayError::NotConfigured)?;
        let resp = self.http.post(url).json(body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(RelayError::Status(status));
        }
        Ok(resp.json::<T>().await?)
    }
}

impl DeviceLinkPort for RelayClient {
    async fn activate(&self, cookies: &[CookieRecord], code: &ActivationCode) -> ActivationReport {
        self.post("activate", &ActivateBody { cookies, code })
            .await
            .unwrap_or_else(ActivationReport::from)
    }
}

impl SessionCheckPort for RelayClient {
    async fn check(&self, cookies: &[CookieRecord]) -> SessionCheck {
        self.post::<_, SessionCheck>("validate", &CheckBody { cookies })
            .await
            .map(SessionCheck::with_defaults)
            .unwrap_or_else(SessionCheck::from)
    }
}
