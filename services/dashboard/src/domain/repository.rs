#![allow(async_fn_in_trait)]

use uuid::Uuid;

use tvlink_domain::activation::{ActivationReport, SessionCheck, ValidationStatus};
use tvlink_domain::code::ActivationCode;
use tvlink_domain::cookie::CookieRecord;

use crate::domain::types::{ActivationAttempt, CookieSet, CookieSetSummary, Visitor};
use crate::error::DashboardError;

/// Repository for cookie sets. Every method is scoped to one visitor.
pub trait CookieSetRepository: Send + Sync {
    /// Newest first.
    async fn list(&self, visitor_id: Uuid) -> Result<Vec<CookieSetSummary>, DashboardError>;

    async fn find(&self, visitor_id: Uuid, id: Uuid)
    -> Result<Option<CookieSet>, DashboardError>;

    async fn find_active(&self, visitor_id: Uuid) -> Result<Option<CookieSet>, DashboardError>;

    /// Deactivate every sibling set of the visitor, then insert `set` as active.
    async fn insert_active(&self, set: &CookieSet) -> Result<(), DashboardError>;

    /// Make `id` the visitor's only active set. Returns `false` if the visitor
    /// owns no such set, in which case nothing changes.
    async fn set_active(&self, visitor_id: Uuid, id: Uuid) -> Result<bool, DashboardError>;

    /// Returns `false` if the visitor owns no such set.
    async fn set_validation_status(
        &self,
        visitor_id: Uuid,
        id: Uuid,
        status: ValidationStatus,
    ) -> Result<bool, DashboardError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, visitor_id: Uuid, id: Uuid) -> Result<bool, DashboardError>;
}

/// Append-only log of activation attempts.
pub trait AttemptRepository: Send + Sync {
    async fn append(&self, attempt: &ActivationAttempt) -> Result<(), DashboardError>;

    /// Newest first, at most `limit`.
    async fn recent(
        &self,
        visitor_id: Uuid,
        limit: u64,
    ) -> Result<Vec<ActivationAttempt>, DashboardError>;

    async fn count(&self, visitor_id: Uuid) -> Result<u64, DashboardError>;
}

pub trait VisitorRepository: Send + Sync {
    /// Insert the visitor, or bump `last_active_at` if it already exists.
    async fn touch(&self, visitor: &Visitor) -> Result<(), DashboardError>;
}

/// Port to the backend that links a device to the session a cookie set represents.
///
/// Infallible by contract: transport failures come back as a `Rejected` report.
pub trait DeviceLinkPort: Send + Sync {
    async fn activate(&self, cookies: &[CookieRecord], code: &ActivationCode)
    -> ActivationReport;
}

/// Port to the backend that checks whether a cookie set is still a live session.
///
/// Infallible by contract: transport failures come back as `ok = false`.
pub trait SessionCheckPort: Send + Sync {
    async fn check(&self, cookies: &[CookieRecord]) -> SessionCheck;
}
