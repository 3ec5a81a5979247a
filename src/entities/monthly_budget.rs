//! Monthly budget entity - One editable 50/30/20 plan per user per month.
//!
//! Uniqueness over (`user_id`, `month`, `year`) is enforced by the upsert in
//! `core::budget`, which finds the existing row before inserting.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Monthly budget database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "monthly_budgets")]
pub struct Model {
    /// Unique identifier (UUIDv4 string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Owning user
    pub user_id: String,
    /// Calendar month 1-12
    pub month: i32,
    /// Calendar year
    pub year: i32,
    /// Planned income for the month
    pub income: f64,
    /// 50% needs allocation, whole pesos
    pub needs: f64,
    /// 30% wants allocation, whole pesos
    pub wants: f64,
    /// 20% savings allocation, whole pesos
    pub savings: f64,
    /// When the plan was first saved
    pub created_at: DateTimeUtc,
    /// When the plan was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between `MonthlyBudget` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each monthly budget belongs to one user
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
