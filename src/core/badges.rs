//! Badge evaluation business logic.
//!
//! Badges are derived state: the full ten-badge catalog is returned on every
//! call with `earned` recomputed from current counters. Nothing is persisted,
//! so deleting activity can un-earn a badge - that is the intended
//! always-correct-from-source-of-truth behavior, not a bug.

use crate::{
    entities::{Expense, IncomeEntry, MonthlyBudget, expense, income_entry, monthly_budget},
    errors::Result,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

/// Static definition of one badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeDef {
    /// Stable identifier (e.g. `"first_peso"`)
    pub id: &'static str,
    /// Display emoji
    pub emoji: &'static str,
    /// Display name
    pub name: &'static str,
    /// How to earn it
    pub description: &'static str,
    /// Accent color (hex)
    pub color: &'static str,
}

/// A badge with its freshly computed earned state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    /// The catalog definition
    pub def: BadgeDef,
    /// Whether the user currently qualifies
    pub earned: bool,
}

/// The fixed catalog, in display order.
pub const BADGE_DEFS: [BadgeDef; 10] = [
    BadgeDef {
        id: "first_peso",
        emoji: "\u{1f4b0}",
        name: "First Peso",
        description: "Log your first income entry",
        color: "#FFB86C",
    },
    BadgeDef {
        id: "hustler",
        emoji: "\u{1f525}",
        name: "Hustler",
        description: "Log 10+ income entries",
        color: "#FF6B9D",
    },
    BadgeDef {
        id: "money_machine",
        emoji: "\u{1f911}",
        name: "Money Machine",
        description: "Log 50+ income entries",
        color: "#50E3C2",
    },
    BadgeDef {
        id: "budget_boss",
        emoji: "\u{1f4cb}",
        name: "Budget Boss",
        description: "Create your first monthly budget",
        color: "#6C9CFF",
    },
    BadgeDef {
        id: "self_aware",
        emoji: "\u{1f9e0}",
        name: "Self-Aware",
        description: "Complete the money personality quiz",
        color: "#FFB86C",
    },
    BadgeDef {
        id: "week_warrior",
        emoji: "\u{26a1}",
        name: "Week Warrior",
        description: "7+ day streak",
        color: "#FF6B9D",
    },
    BadgeDef {
        id: "monthly_master",
        emoji: "\u{1f451}",
        name: "Monthly Master",
        description: "30+ day streak",
        color: "#50E3C2",
    },
    BadgeDef {
        id: "rising_star",
        emoji: "\u{2b50}",
        name: "Rising Star",
        description: "Reach Level 2",
        color: "#FFB86C",
    },
    BadgeDef {
        id: "money_master",
        emoji: "\u{1f48e}",
        name: "Money Master",
        description: "Reach Level 4 (max)",
        color: "#50E3C2",
    },
    BadgeDef {
        id: "tracker",
        emoji: "\u{1f4dd}",
        name: "Tracker",
        description: "Log your first expense",
        color: "#6C9CFF",
    },
];

/// Computes the earned state of every badge in catalog order.
pub async fn compute_badges(db: &sea_orm::DatabaseConnection, user_id: &str) -> Result<Vec<Badge>> {
    let user = crate::core::users::get_user(db, user_id).await?;

    let income_count = IncomeEntry::find()
        .filter(income_entry::Column::UserId.eq(user_id))
        .count(db)
        .await?;
    let budget_count = MonthlyBudget::find()
        .filter(monthly_budget::Column::UserId.eq(user_id))
        .count(db)
        .await?;
    let expense_count = Expense::find()
        .filter(expense::Column::UserId.eq(user_id))
        .count(db)
        .await?;

    let earned = |id: &str| -> bool {
        match id {
            "first_peso" => income_count >= 1,
            "hustler" => income_count >= 10,
            "money_machine" => income_count >= 50,
            "budget_boss" => budget_count >= 1,
            "self_aware" => user.quiz_result.is_some(),
            "week_warrior" => user.longest_streak >= 7,
            "monthly_master" => user.longest_streak >= 30,
            "rising_star" => user.level >= 2,
            "money_master" => user.level >= 4,
            "tracker" => expense_count >= 1,
            _ => false,
        }
    };

    Ok(BADGE_DEFS
        .iter()
        .map(|def| Badge {
            def: *def,
            earned: earned(def.id),
        })
        .collect())
}
