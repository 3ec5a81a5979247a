//! Expense entity - One logged expense per row, bucketed 50/30/20 style.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Unique identifier (UUIDv4 string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Owning user
    pub user_id: String,
    /// Budget bucket: `"NEEDS"`, `"WANTS"`, or `"SAVINGS"`
    pub category: String,
    /// Finer-grained label within the bucket (e.g. "Food", "Streaming")
    pub subcategory: String,
    /// Amount in pesos, always positive
    pub amount: f64,
    /// Date the expense occurred
    pub date: DateTimeUtc,
    /// Optional free-form note
    pub note: Option<String>,
    /// When the expense was logged
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Expense and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each expense belongs to one user
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
