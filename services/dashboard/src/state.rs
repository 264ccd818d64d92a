use sea_orm::DatabaseConnection;

use crate::infra::db::{DbAttemptRepository, DbCookieSetRepository, DbVisitorRepository};
use crate::infra::relay::RelayClient;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub relay: RelayClient,
    pub secure_cookies: bool,
}

impl AppState {
    pub fn cookie_set_repo(&self) -> DbCookieSetRepository {
        DbCookieSetRepository {
            db: self.db.clone(),
        }
    }

    pub fn attempt_repo(&self) -> DbAttemptRepository {
        DbAttemptRepository {
            db: self.db.clone(),
        }
    }

    pub fn visitor_repo(&self) -> DbVisitorRepository {
        DbVisitorRepository {
            db: self.db.clone(),
        }
    }

    pub fn relay(&self) -> RelayClient {
        self.relay.clone()
    }
}
