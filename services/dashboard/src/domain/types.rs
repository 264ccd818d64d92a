use chrono::{DateTime, Utc};
use uuid::Uuid;

use tvlink_domain::activation::{ActivationMethod, ActivationOutcome, ValidationStatus};
use tvlink_domain::cookie::CookieRecord;

/// A visitor's uploaded cookie set.
#[derive(Debug, Clone)]
pub struct CookieSet {
    pub id: Uuid,
    pub visitor_id: Uuid,
    pub label: String,
    pub filename: String,
    pub cookies: Vec<CookieRecord>,
    pub active: bool,
    pub validation_status: ValidationStatus,
    pub created_at: DateTime<Utc>,
}

/// List-view projection of a cookie set. Carries no cookie values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieSetSummary {
    pub id: Uuid,
    pub label: String,
    pub active: bool,
    pub validation_status: ValidationStatus,
    pub created_at: DateTime<Utc>,
}

impl From<&CookieSet> for CookieSetSummary {
    fn from(set: &CookieSet) -> Self {
        Self {
            id: set.id,
            label: set.label.clone(),
            active: set.active,
            validation_status: set.validation_status,
            created_at: set.created_at,
        }
    }
}

/// One logged activation attempt. Never mutated after insert.
#[derive(Debug, Clone)]
pub struct ActivationAttempt {
    pub id: Uuid,
    pub visitor_id: Uuid,
    pub code: String,
    pub method: ActivationMethod,
    pub outcome: ActivationOutcome,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl ActivationAttempt {
    pub fn success(&self) -> bool {
        self.outcome.is_success()
    }
}

/// Request metadata recorded for a visitor.
#[derive(Debug, Clone)]
pub struct Visitor {
    pub id: Uuid,
    pub ip_address: Option<String>,
    pub user_agent: String,
    pub seen_at: DateTime<Utc>,
}
