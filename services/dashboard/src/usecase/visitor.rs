use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::VisitorRepository;
use crate::domain::types::Visitor;
use crate::error::DashboardError;

pub struct TouchVisitorInput {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

pub struct TouchVisitorUseCase<R: VisitorRepository> {
    pub repo: R,
}

impl<R: VisitorRepository> TouchVisitorUseCase<R> {
    pub async fn execute(&self, id: Uuid, input: TouchVisitorInput) -> Result<(), DashboardError> {
        self.repo
            .touch(&Visitor {
                id,
                ip_address: input.ip_address,
                user_agent: input.user_agent.unwrap_or_else(|| "Unknown".to_owned()),
                seen_at: Utc::now(),
            })
            .await
    }
}
