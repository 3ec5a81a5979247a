//! Glow score business logic.
//!
//! The glow score is a derived 0-100 wellness metric: recent tracking
//! activity, budgeting cadence, the current streak, and lifetime XP, each
//! independently capped so the sum stays within bounds. Nothing here is
//! persisted - the score is recomputed from source-of-truth counters on
//! every read.

use crate::{
    entities::{BudgetSnapshot, IncomeEntry, budget_snapshot, income_entry},
    errors::Result,
};
use chrono::{Duration, Utc};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

/// One band of the glow label table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlowDef {
    /// Display label
    pub label: &'static str,
    /// Display emoji
    pub emoji: &'static str,
    /// Minimum score for this band
    pub min: i32,
}

/// The four glow bands, ascending by minimum score.
pub const GLOW_LABELS: [GlowDef; 4] = [
    GlowDef {
        label: "Needs TLC",
        emoji: "\u{1f56f}\u{fe0f}",
        min: 0,
    },
    GlowDef {
        label: "Flickering",
        emoji: "\u{1f525}",
        min: 40,
    },
    GlowDef {
        label: "Glowing",
        emoji: "\u{2728}",
        min: 60,
    },
    GlowDef {
        label: "On Fire",
        emoji: "\u{1f48e}",
        min: 80,
    },
];

/// Returns the highest band whose minimum does not exceed `score`.
#[must_use]
pub fn glow_label(score: i32) -> &'static GlowDef {
    let mut current = &GLOW_LABELS[0];
    for band in &GLOW_LABELS {
        if score >= band.min {
            current = band;
        }
    }
    current
}

/// Computes the 0-100 glow score from the user's counters.
///
/// Components, each capped:
/// - tracking: 1 point per income entry logged in the trailing 30 days, max 30
/// - budget cadence: 5 points per budget snapshot in the trailing 30 days, max 20
/// - streak: `round(streak_count * 3.5)`, max 25 (current streak, not longest)
/// - lifetime engagement: `round(xp / 24)`, max 25
#[allow(clippy::cast_possible_truncation)]
pub async fn calculate_glow_score(db: &sea_orm::DatabaseConnection, user_id: &str) -> Result<i32> {
    let user = crate::core::users::get_user(db, user_id).await?;
    let thirty_days_ago = Utc::now() - Duration::days(30);

    let income_count = IncomeEntry::find()
        .filter(income_entry::Column::UserId.eq(user_id))
        .filter(income_entry::Column::CreatedAt.gte(thirty_days_ago))
        .count(db)
        .await?;

    let budget_count = BudgetSnapshot::find()
        .filter(budget_snapshot::Column::UserId.eq(user_id))
        .filter(budget_snapshot::Column::CreatedAt.gte(thirty_days_ago))
        .count(db)
        .await?;

    let tracking_score = (income_count as i32).min(30);
    let budget_score = (budget_count as i32 * 5).min(20);
    let streak_score = ((f64::from(user.streak_count) * 3.5).round() as i32).min(25);
    let xp_score = ((f64::from(user.xp) / 24.0).round() as i32).min(25);

    Ok(tracking_score + budget_score + streak_score + xp_score)
}
