//! Feedback entity - Thumbs up/down reactions with optional context.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Feedback database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "feedback")]
pub struct Model {
    /// Unique identifier (UUIDv4 string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Owning user
    pub user_id: String,
    /// -1 (down), 0 (neutral), or 1 (up)
    pub rating: i32,
    /// Optional free-form reason
    pub reason: Option<String>,
    /// What the feedback was about (e.g. "advice", "chat")
    pub context: Option<String>,
    /// Page the feedback was submitted from
    pub page: Option<String>,
    /// When the feedback was submitted
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Feedback and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each feedback row belongs to one user
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
