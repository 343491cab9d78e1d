use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// Role of a system user. Persisted as its textual name so that
/// reordering the variants never corrupts stored rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum UserRole {
    #[sea_orm(string_value = "Admin")]
    Admin,

    #[sea_orm(string_value = "User")]
    User,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "Admin"),
            Self::User => write!(f, "User"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique, column_type = "String(StringLen::N(10))")]
    pub username: String,

    /// Opaque credential hash. Never logged, never serialized.
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub hashed_secret_key: String,

    #[sea_orm(unique, column_type = "String(StringLen::N(100))")]
    pub email_address: String,

    /// False until an external verification flow flips it.
    pub is_email_verified: bool,

    pub role: UserRole,

    pub created_at: DateTime<Utc>,

    /// None until the first mutating update.
    pub updated_at: Option<DateTime<Utc>>,

    pub last_login_date: Option<DateTime<Utc>>,

    /// Capped at 5 by the external authentication flow.
    pub failed_login_attempts: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::categories::Entity")]
    Categories,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
