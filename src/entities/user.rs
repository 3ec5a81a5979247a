//! User entity - Owns every other row in the system.
//!
//! Carries identity (unique email), the onboarding profile block, and the
//! gamification state: `xp`, `level` (always recomputed from `xp`, never set
//! independently), `streak_count`, `longest_streak`, and `last_check_in`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier (UUIDv4 string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Login email, unique across all users
    #[sea_orm(unique)]
    pub email: String,
    /// Display name, set during onboarding
    pub name: Option<String>,
    /// Age in years (13-100)
    pub age: Option<i32>,
    /// Income sources as a JSON-encoded string array (e.g. `["TikTok","GCash"]`)
    pub income_sources: String,
    /// Self-reported monthly income in pesos
    pub monthly_income: Option<f64>,
    /// Primary financial goal (e.g. `"SAVE_EMERGENCY_FUND"`)
    pub financial_goal: Option<String>,
    /// Employment situation (e.g. `"STUDENT"`, `"FULL_TIME_CREATOR"`)
    pub employment_status: Option<String>,
    /// Emergency-fund status: `"YES"`, `"NO"`, or `"BUILDING"`
    pub has_emergency_fund: Option<String>,
    /// Debt situation (e.g. `"NONE"`, `"CREDIT_CARD"`)
    pub debt_situation: Option<String>,
    /// Preferred response language: `"ENGLISH"` or `"TAGLISH"`
    pub language_pref: String,
    /// Money-personality quiz result: `"YOLO"`, `"CHILL"`, `"PLAN"`, `"MASTER"`
    pub quiz_result: Option<String>,
    /// Generated 30-day challenge text from the quiz
    pub quiz_challenge: Option<String>,
    /// Whether the onboarding flow has been completed
    pub onboarded: bool,
    /// Admin flag; re-read from storage on every admin-gated call
    pub is_admin: bool,
    /// Accumulated experience points, only ever incremented
    pub xp: i32,
    /// Derived tier 1-4, kept consistent with `xp` via recompute
    pub level: i32,
    /// Current consecutive-day streak
    pub streak_count: i32,
    /// Historical maximum streak, never less than `streak_count`
    pub longest_streak: i32,
    /// Timestamp of the most recent streak-qualifying action
    pub last_check_in: Option<DateTimeUtc>,
    /// When the account was created
    pub created_at: DateTimeUtc,
    /// When the account was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user has many magic links
    #[sea_orm(has_many = "super::magic_link::Entity")]
    MagicLinks,
    /// One user has many income entries
    #[sea_orm(has_many = "super::income_entry::Entity")]
    IncomeEntries,
    /// One user has many expenses
    #[sea_orm(has_many = "super::expense::Entity")]
    Expenses,
    /// One user has many budget snapshots
    #[sea_orm(has_many = "super::budget_snapshot::Entity")]
    BudgetSnapshots,
    /// One user has many monthly budgets
    #[sea_orm(has_many = "super::monthly_budget::Entity")]
    MonthlyBudgets,
    /// One user has many daily advice rows
    #[sea_orm(has_many = "super::daily_advice::Entity")]
    DailyAdvice,
    /// One user has many feedback rows
    #[sea_orm(has_many = "super::feedback::Entity")]
    Feedback,
}

impl Related<super::magic_link::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MagicLinks.def()
    }
}

impl Related<super::income_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IncomeEntries.def()
    }
}

impl Related<super::expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl Related<super::budget_snapshot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BudgetSnapshots.def()
    }
}

impl Related<super::monthly_budget::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MonthlyBudgets.def()
    }
}

impl Related<super::daily_advice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DailyAdvice.def()
    }
}

impl Related<super::feedback::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Feedback.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
