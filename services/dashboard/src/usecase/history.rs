use uuid::Uuid;

use crate::domain::repository::AttemptRepository;
use crate::domain::types::ActivationAttempt;
use crate::error::DashboardError;

/// Number of attempts reported by the history view.
pub const HISTORY_LIMIT: u64 = 20;

pub struct HistoryOutput {
    pub attempts: Vec<ActivationAttempt>,
    pub total: u64,
}

pub struct GetHistoryUseCase<R: AttemptRepository> {
    pub repo: R,
}

impl<R: AttemptRepository> GetHistoryUseCase<R> {
    pub async fn execute(&self, visitor_id: Uuid) -> Result<HistoryOutput, DashboardError> {
        let attempts = self.repo.recent(visitor_id, HISTORY_LIMIT).await?;
        let total = self.repo.count(visitor_id).await?;
        Ok(HistoryOutput { attempts, total })
    }
}
