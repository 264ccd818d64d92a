use chrono::Utc;
use uuid::Uuid;

use tvlink_domain::activation::{ActivationMethod, ActivationReport};
use tvlink_domain::code::{ActivationCode, validate_code};

use crate::domain::repository::{AttemptRepository, CookieSetRepository, DeviceLinkPort};
use crate::domain::types::ActivationAttempt;
use crate::error::DashboardError;

pub const NO_ACTIVE_COOKIES: &str =
    "No valid cookies available. Please upload your cookies first.";

pub struct ActivateOutput {
    pub code: ActivationCode,
    pub report: ActivationReport,
}

/// Validate a code, hand it with the visitor's active cookie set to the
/// device-link backend, and log the attempt.
pub struct ActivateUseCase<C, A, L>
where
    C: CookieSetRepository,
    A: AttemptRepository,
    L: DeviceLinkPort,
{
    pub cookie_sets: C,
    pub attempts: A,
    pub link: L,
}

impl<C, A, L> ActivateUseCase<C, A, L>
where
    C: CookieSetRepository,
    A: AttemptRepository,
    L: DeviceLinkPort,
{
    /// Malformed codes fail here, before the store or the backend is touched,
    /// and leave no history entry.
    pub async fn execute(
        &self,
        visitor_id: Uuid,
        raw_code: &str,
        method: ActivationMethod,
    ) -> Result<ActivateOutput, DashboardError> {
        let code = validate_code(raw_code)?;
        self.execute_code(visitor_id, code, method).await
    }

    pub async fn execute_code(
        &self,
        visitor_id: Uuid,
        code: ActivationCode,
        method: ActivationMethod,
    ) -> Result<ActivateOutput, DashboardError> {
        let report = match self.cookie_sets.find_active(visitor_id).await? {
            Some(set) => self.link.activate(&set.cookies, &code).await,
            None => ActivationReport::rejected(NO_ACTIVE_COOKIES),
        };

        tracing::info!(
            %visitor_id,
            method = method.as_str(),
            outcome = report.outcome.as_str(),
            "activation attempt"
        );

        self.attempts
            .append(&ActivationAttempt {
                id: Uuid::now_v7(),
                visitor_id,
                code: code.to_string(),
                method,
                outcome: report.outcome,
                message: report.message.clone(),
                created_at: Utc::now(),
            })
            .await?;

        Ok(ActivateOutput { code, report })
    }
}
