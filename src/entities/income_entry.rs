//! Income entry entity - One logged income event per row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Income entry database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "income_entries")]
pub struct Model {
    /// Unique identifier (UUIDv4 string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Owning user
    pub user_id: String,
    /// Platform the money came from (e.g. "TikTok", "GCash")
    pub source: String,
    /// Kind of income (e.g. "Brand Deal", "Ad Revenue")
    pub income_type: String,
    /// Amount in pesos, always positive
    pub amount: f64,
    /// Date the income was received
    pub date: DateTimeUtc,
    /// Optional free-form note
    pub note: Option<String>,
    /// When the entry was logged
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `IncomeEntry` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each income entry belongs to one user
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
