use sea_orm::entity::prelude::*;

/// Anonymous dashboard visitor, keyed by the id minted into the session cookie.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "visitors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub ip_address: Option<String>,
    pub user_agent: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub last_active_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cookie_sets::Entity")]
    CookieSets,
    #[sea_orm(has_many = "super::activation_attempts::Entity")]
    ActivationAttempts,
}

impl Related<super::cookie_sets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CookieSets.def()
    }
}

impl Related<super::activation_attempts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActivationAttempts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
