//! Budget snapshot entity - History of the quick 50/30/20 calculator.
//!
//! Distinct from [`super::monthly_budget`]: snapshots are an append-only
//! log and feed the glow score's budget-cadence component.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Budget snapshot database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "budget_snapshots")]
pub struct Model {
    /// Unique identifier (UUIDv4 string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Owning user
    pub user_id: String,
    /// Income the split was computed from
    pub income: f64,
    /// 50% needs allocation
    pub needs: f64,
    /// 30% wants allocation
    pub wants: f64,
    /// 20% savings allocation
    pub savings: f64,
    /// When the snapshot was taken
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `BudgetSnapshot` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each snapshot belongs to one user
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
