use chrono::Utc;
use uuid::Uuid;

use tvlink_domain::activation::{SessionCheck, ValidationStatus};
use tvlink_domain::cookie::{CookieInput, normalize};

use crate::domain::repository::{CookieSetRepository, SessionCheckPort};
use crate::domain::types::{CookieSet, CookieSetSummary};
use crate::error::DashboardError;

// ── ListCookieSets ───────────────────────────────────────────────────────────

pub struct ListCookieSetsUseCase<R: CookieSetRepository> {
    pub repo: R,
}

impl<R: CookieSetRepository> ListCookieSetsUseCase<R> {
    pub async fn execute(&self, visitor_id: Uuid) -> Result<Vec<CookieSetSummary>, DashboardError> {
        self.repo.list(visitor_id).await
    }
}

// ── HasActiveCookieSet ───────────────────────────────────────────────────────

pub struct HasActiveCookieSetUseCase<R: CookieSetRepository> {
    pub repo: R,
}

impl<R: CookieSetRepository> HasActiveCookieSetUseCase<R> {
    pub async fn execute(&self, visitor_id: Uuid) -> Result<bool, DashboardError> {
        Ok(self.repo.find_active(visitor_id).await?.is_some())
    }
}

// ── UploadCookieSet ──────────────────────────────────────────────────────────

pub struct UploadCookieSetInput {
    pub raw: CookieInput,
    pub filename: Option<String>,
}

pub struct UploadCookieSetOutput {
    pub id: Uuid,
    pub cookie_count: usize,
}

pub struct UploadCookieSetUseCase<R: CookieSetRepository> {
    pub repo: R,
}

impl<R: CookieSetRepository> UploadCookieSetUseCase<R> {
    pub async fn execute(
        &self,
        visitor_id: Uuid,
        input: UploadCookieSetInput,
    ) -> Result<UploadCookieSetOutput, DashboardError> {
        let cookies = normalize(input.raw)?;
        let now = Utc::now();
        let set = CookieSet {
            id: Uuid::now_v7(),
            visitor_id,
            label: format!("Cookie_{}", now.format("%Y%m%d_%H%M%S")),
            filename: input.filename.unwrap_or_else(|| "unknown".to_owned()),
            cookies,
            active: true,
            validation_status: ValidationStatus::Unknown,
            created_at: now,
        };
        self.repo.insert_active(&set).await?;
        Ok(UploadCookieSetOutput {
            id: set.id,
            cookie_count: set.cookies.len(),
        })
    }
}

// ── ActivateCookieSet ────────────────────────────────────────────────────────

pub struct ActivateCookieSetUseCase<R: CookieSetRepository> {
    pub repo: R,
}

impl<R: CookieSetRepository> ActivateCookieSetUseCase<R> {
    pub async fn execute(&self, visitor_id: Uuid, id: Uuid) -> Result<(), DashboardError> {
        if !self.repo.set_active(visitor_id, id).await? {
            return Err(DashboardError::CookieSetNotFound);
        }
        Ok(())
    }
}

// ── DeleteCookieSet ──────────────────────────────────────────────────────────

pub struct DeleteCookieSetUseCase<R: CookieSetRepository> {
    pub repo: R,
}

impl<R: CookieSetRepository> DeleteCookieSetUseCase<R> {
    pub async fn execute(&self, visitor_id: Uuid, id: Uuid) -> Result<(), DashboardError> {
        let deleted = self.repo.delete(visitor_id, id).await?;
        if !deleted {
            return Err(DashboardError::CookieSetNotFound);
        }
        Ok(())
    }
}

// ── ValidateCookieSet ────────────────────────────────────────────────────────

pub struct ValidateCookieSetUseCase<R: CookieSetRepository, P: SessionCheckPort> {
    pub repo: R,
    pub checker: P,
}

impl<R: CookieSetRepository, P: SessionCheckPort> ValidateCookieSetUseCase<R, P> {
    /// Check the set against the backend and store the resulting status.
    pub async fn execute(&self, visitor_id: Uuid, id: Uuid) -> Result<SessionCheck, DashboardError> {
        let set = self
            .repo
            .find(visitor_id, id)
            .await?
            .ok_or(DashboardError::CookieSetNotFound)?;
        let check = self.checker.check(&set.cookies).await.with_defaults();
        self.repo
            .set_validation_status(visitor_id, id, check.status())
            .await?;
        Ok(check)
    }
}
