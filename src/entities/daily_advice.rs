//! Daily advice entity - Cached advice text, one row per user per UTC day.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Daily advice database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "daily_advice")]
pub struct Model {
    /// Unique identifier (UUIDv4 string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Owning user
    pub user_id: String,
    /// Generated advice text (markdown)
    pub content: String,
    /// UTC calendar day this advice belongs to (midnight timestamp)
    pub date: DateTimeUtc,
    /// When the row was written
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `DailyAdvice` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each advice row belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
