use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    sea_query::{Expr, OnConflict},
};
use uuid::Uuid;

use tvlink_dashboard_schema::{activation_attempts, cookie_sets, visitors};
use tvlink_domain::activation::{ActivationMethod, ActivationOutcome, ValidationStatus};

use crate::domain::repository::{AttemptRepository, CookieSetRepository, VisitorRepository};
use crate::domain::types::{ActivationAttempt, CookieSet, CookieSetSummary, Visitor};
use crate::error::DashboardError;

// ── Cookie set repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCookieSetRepository {
    pub db: DatabaseConnection,
}

#[derive(Debug, FromQueryResult)]
struct CookieSetSummaryRow {
    id: Uuid,
    label: String,
    active: bool,
    validation_status: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl CookieSetRepository for DbCookieSetRepository {
    async fn list(&self, visitor_id: Uuid) -> Result<Vec<CookieSetSummary>, DashboardError> {
        // Cookie values are never selected for list views.
        let rows = cookie_sets::Entity::find()
            .select_only()
            .columns([
                cookie_sets::Column::Id,
                cookie_sets::Column::Label,
                cookie_sets::Column::Active,
                cookie_sets::Column::ValidationStatus,
                cookie_sets::Column::CreatedAt,
            ])
            .filter(cookie_sets::Column::VisitorId.eq(visitor_id))
            .order_by_desc(cookie_sets::Column::CreatedAt)
            .into_model::<CookieSetSummaryRow>()
            .all(&self.db)
            .await
            .context("list cookie sets")?;
        Ok(rows
            .into_iter()
            .map(|row| CookieSetSummary {
                id: row.id,
                label: row.label,
                active: row.active,
                validation_status: ValidationStatus::from_db(&row.validation_status),
                created_at: row.created_at,
            })
            .collect())
    }

    async fn find(
        &self,
        visitor_id: Uuid,
        id: Uuid,
    ) -> Result<Option<CookieSet>, DashboardError> {
        let model = cookie_sets::Entity::find_by_id(id)
            .filter(cookie_sets::Column::VisitorId.eq(visitor_id))
            .one(&self.db)
            .await
            .context("find cookie set")?;
        model.map(cookie_set_from_model).transpose()
    }

    async fn find_active(&self, visitor_id: Uuid) -> Result<Option<CookieSet>, DashboardError> {
        let model = cookie_sets::Entity::find()
            .filter(cookie_sets::Column::VisitorId.eq(visitor_id))
            .filter(cookie_sets::Column::Active.eq(true))
            .order_by_desc(cookie_sets::Column::CreatedAt)
            .one(&self.db)
            .await
            .context("find active cookie set")?;
        model.map(cookie_set_from_model).transpose()
    }

    async fn insert_active(&self, set: &CookieSet) -> Result<(), DashboardError> {
        let cookies = serde_json::to_value(&set.cookies).context("encode cookies")?;
        let txn = self.db.begin().await.context("begin insert cookie set")?;

        cookie_sets::Entity::update_many()
            .col_expr(cookie_sets::Column::Active, Expr::value(false))
            .filter(cookie_sets::Column::VisitorId.eq(set.visitor_id))
            .exec(&txn)
            .await
            .context("deactivate sibling cookie sets")?;

        cookie_sets::ActiveModel {
            id: Set(set.id),
            visitor_id: Set(set.visitor_id),
            label: Set(set.label.clone()),
            filename: Set(set.filename.clone()),
            cookies: Set(cookies),
            active: Set(true),
            validation_status: Set(set.validation_status.as_str().to_owned()),
            created_at: Set(set.created_at),
        }
        .insert(&txn)
        .await
        .context("insert cookie set")?;

        txn.commit().await.context("commit insert cookie set")?;
        Ok(())
    }

    async fn set_active(&self, visitor_id: Uuid, id: Uuid) -> Result<bool, DashboardError> {
        let txn = self.db.begin().await.context("begin activate cookie set")?;

        let owned = cookie_sets::Entity::find_by_id(id)
            .filter(cookie_sets::Column::VisitorId.eq(visitor_id))
            .one(&txn)
            .await
            .context("find cookie set to activate")?
            .is_some();
        if !owned {
            return Ok(false);
        }

        cookie_sets::Entity::update_many()
            .col_expr(cookie_sets::Column::Active, Expr::value(false))
            .filter(cookie_sets::Column::VisitorId.eq(visitor_id))
            .exec(&txn)
            .await
            .context("deactivate sibling cookie sets")?;

        cookie_sets::Entity::update_many()
            .col_expr(cookie_sets::Column::Active, Expr::value(true))
            .filter(cookie_sets::Column::Id.eq(id))
            .filter(cookie_sets::Column::VisitorId.eq(visitor_id))
            .exec(&txn)
            .await
            .context("activate cookie set")?;

        txn.commit().await.context("commit activate cookie set")?;
        Ok(true)
    }

    async fn set_validation_status(
        &self,
        visitor_id: Uuid,
        id: Uuid,
        status: ValidationStatus,
    ) -> Result<bool, DashboardError> {
        let result = cookie_sets::Entity::update_many()
            .col_expr(
                cookie_sets::Column::ValidationStatus,
                Expr::value(status.as_str()),
            )
            .filter(cookie_sets::Column::Id.eq(id))
            .filter(cookie_sets::Column::VisitorId.eq(visitor_id))
            .exec(&self.db)
            .await
            .context("update cookie set validation status")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, visitor_id: Uuid, id: Uuid) -> Result<bool, DashboardError> {
        let result = cookie_sets::Entity::delete_many()
            .filter(cookie_sets::Column::Id.eq(id))
            .filter(cookie_sets::Column::VisitorId.eq(visitor_id))
            .exec(&self.db)
            .await
            .context("delete cookie set")?;
        Ok(result.rows_affected > 0)
    }
}

fn cookie_set_from_model(model: cookie_sets::Model) -> Result<CookieSet, DashboardError> {
    let cookies = serde_json::from_value(model.cookies).context("decode stored cookies")?;
    Ok(CookieSet {
        id: model.id,
        visitor_id: model.visitor_id,
        label: model.label,
        filename: model.filename,
        cookies,
        active: model.active,
        validation_status: ValidationStatus::from_db(&model.validation_status),
        created_at: model.created_at,
    })
}

// ── Attempt repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAttemptRepository {
    pub db: DatabaseConnection,
}

impl AttemptRepository for DbAttemptRepository {
    async fn append(&self, attempt: &ActivationAttempt) -> Result<(), DashboardError> {
        activation_attempts::ActiveModel {
            id: Set(attempt.id),
            visitor_id: Set(attempt.visitor_id),
            code: Set(attempt.code.clone()),
            method: Set(attempt.method.as_str().to_owned()),
            outcome: Set(attempt.outcome.as_str().to_owned()),
            success: Set(attempt.success()),
            message: Set(attempt.message.clone()),
            created_at: Set(attempt.created_at),
        }
        .insert(&self.db)
        .await
        .context("append activation attempt")?;
        Ok(())
    }

    async fn recent(
        &self,
        visitor_id: Uuid,
        limit: u64,
    ) -> Result<Vec<ActivationAttempt>, DashboardError> {
        let models = activation_attempts::Entity::find()
            .filter(activation_attempts::Column::VisitorId.eq(visitor_id))
            .order_by_desc(activation_attempts::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list recent activation attempts")?;
        Ok(models.into_iter().map(attempt_from_model).collect())
    }

    async fn count(&self, visitor_id: Uuid) -> Result<u64, DashboardError> {
        let total = activation_attempts::Entity::find()
            .filter(activation_attempts::Column::VisitorId.eq(visitor_id))
            .count(&self.db)
            .await
            .context("count activation attempts")?;
        Ok(total)
    }
}

fn attempt_from_model(model: activation_attempts::Model) -> ActivationAttempt {
    ActivationAttempt {
        id: model.id,
        visitor_id: model.visitor_id,
        code: model.code,
        method: ActivationMethod::from_str_opt(&model.method).unwrap_or_default(),
        // Rows are only ever written from the enum; fall back to the stored flag.
        outcome: ActivationOutcome::from_str_opt(&model.outcome).unwrap_or(if model.success {
            ActivationOutcome::Ambiguous
        } else {
            ActivationOutcome::Rejected
        }),
        message: model.message,
        created_at: model.created_at,
    }
}

// ── Visitor repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbVisitorRepository {
    pub db: DatabaseConnection,
}

impl VisitorRepository for DbVisitorRepository {
    async fn touch(&self, visitor: &Visitor) -> Result<(), DashboardError> {
        let model = visitors::ActiveModel {
            id: Set(visitor.id),
            ip_address: Set(visitor.ip_address.clone()),
            user_agent: Set(visitor.user_agent.clone()),
            created_at: Set(visitor.seen_at),
            last_active_at: Set(visitor.seen_at),
        };
        visitors::Entity::insert(model)
            .on_conflict(
                OnConflict::column(visitors::Column::Id)
                    .update_column(visitors::Column::LastActiveAt)
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .context("touch visitor")?;
        Ok(())
    }
}
