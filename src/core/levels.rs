//! Level and XP business logic.
//!
//! XP only ever goes up, in fixed increments per named action, and `level`
//! is always re-derived from the XP total against a static threshold table.
//! The award path uses an atomic database-level increment so concurrent
//! actions by the same user cannot lose an update, followed by a level
//! recompute that is safe to run redundantly.

use crate::{
    entities::{User, user},
    errors::{Error, Result},
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, sea_query::Expr};

/// A named XP-earning action with its fixed point value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XpAction {
    /// Logging an income entry (10 XP)
    LogIncome,
    /// Saving a monthly budget (15 XP)
    SaveBudget,
    /// Receiving the day's advice (20 XP)
    GetDailyAdvice,
    /// Completing the money-personality quiz (25 XP)
    CompleteQuiz,
    /// Daily check-in (5 XP)
    DailyCheckIn,
    /// Logging an expense (5 XP)
    LogExpense,
}

impl XpAction {
    /// Fixed XP award for this action.
    #[must_use]
    pub const fn points(self) -> i32 {
        match self {
            Self::LogIncome => 10,
            Self::SaveBudget => 15,
            Self::GetDailyAdvice => 20,
            Self::CompleteQuiz => 25,
            Self::DailyCheckIn | Self::LogExpense => 5,
        }
    }
}

/// One tier of the level table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelDef {
    /// Tier number, 1-4
    pub level: i32,
    /// Display name
    pub name: &'static str,
    /// Display emoji
    pub emoji: &'static str,
    /// Minimum XP to hold this tier
    pub min_xp: i32,
}

/// The four tiers, ascending by threshold.
pub const LEVELS: [LevelDef; 4] = [
    LevelDef {
        level: 1,
        name: "Newbie",
        emoji: "\u{1f331}",
        min_xp: 0,
    },
    LevelDef {
        level: 2,
        name: "Rising Star",
        emoji: "\u{2b50}",
        min_xp: 100,
    },
    LevelDef {
        level: 3,
        name: "Pro Creator",
        emoji: "\u{1f680}",
        min_xp: 300,
    },
    LevelDef {
        level: 4,
        name: "Money Master",
        emoji: "\u{1f451}",
        min_xp: 600,
    },
];

/// Progress toward the next tier.
#[derive(Debug, Clone, PartialEq)]
pub struct NextLevel {
    /// Next tier number
    pub level: i32,
    /// Next tier name
    pub name: &'static str,
    /// Next tier emoji
    pub emoji: &'static str,
    /// XP still needed to reach it
    pub xp_needed: i32,
    /// Percentage of the way from the current threshold to the next
    pub progress: f64,
}

/// Result of an XP award.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XpAward {
    /// New XP total
    pub xp: i32,
    /// Level derived from the new total
    pub level: i32,
    /// Points just awarded
    pub xp_awarded: i32,
}

/// Returns the highest tier whose threshold does not exceed `xp`.
#[must_use]
pub fn calculate_level(xp: i32) -> &'static LevelDef {
    let mut current = &LEVELS[0];
    for tier in &LEVELS {
        if xp >= tier.min_xp {
            current = tier;
        }
    }
    current
}

/// Returns the first tier above `xp`, with distance and progress, or `None`
/// at the max tier.
#[must_use]
pub fn next_level(xp: i32) -> Option<NextLevel> {
    let current = calculate_level(xp);
    let next = LEVELS.iter().find(|tier| tier.min_xp > xp)?;
    let span = f64::from(next.min_xp - current.min_xp);
    Some(NextLevel {
        level: next.level,
        name: next.name,
        emoji: next.emoji,
        xp_needed: next.min_xp - xp,
        progress: f64::from(xp - current.min_xp) / span * 100.0,
    })
}

/// Awards the points for `action` to a user and recomputes their level.
///
/// The XP bump is a single atomic `UPDATE users SET xp = xp + n` so two
/// concurrent awards both land. The level write is derived from the
/// freshly-read total and is idempotent, so a redundant recompute under
/// concurrency converges on the correct tier.
pub async fn award_xp(
    db: &sea_orm::DatabaseConnection,
    user_id: &str,
    action: XpAction,
) -> Result<XpAward> {
    let points = action.points();

    // Verify the user exists before touching counters
    User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::UserNotFound {
            id: user_id.to_string(),
        })?;

    User::update_many()
        .col_expr(user::Column::Xp, Expr::col(user::Column::Xp).add(points))
        .filter(user::Column::Id.eq(user_id))
        .exec(db)
        .await?;

    // Recompute the level from the stored total
    let updated = User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::UserNotFound {
            id: user_id.to_string(),
        })?;
    let tier = calculate_level(updated.xp);

    if tier.level != updated.level {
        User::update_many()
            .col_expr(user::Column::Level, Expr::value(tier.level))
            .filter(user::Column::Id.eq(user_id))
            .exec(db)
            .await?;
        tracing::info!(user_id, level = tier.level, "level up");
    }

    Ok(XpAward {
        xp: updated.xp,
        level: tier.level,
        xp_awarded: points,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{create_test_user, set_xp, setup_test_db};

    #[test]
    fn test_calculate_level_thresholds() {
        assert_eq!(calculate_level(0).level, 1);
        assert_eq!(calculate_level(99).level, 1);
        assert_eq!(calculate_level(100).level, 2);
        assert_eq!(calculate_level(299).level, 2);
        assert_eq!(calculate_level(300).level, 3);
        assert_eq!(calculate_level(600).level, 4);
        assert_eq!(calculate_level(10_000).level, 4);
    }

    #[test]
    fn test_calculate_level_monotonic() {
        let mut previous = 0;
        for xp in 0..700 {
            let level = calculate_level(xp).level;
            assert!(level >= previous, "level regressed at xp={xp}");
            previous = level;
        }
    }

    #[test]
    fn test_next_level_distance_and_progress() {
        let next = next_level(0).unwrap();
        assert_eq!(next.level, 2);
        assert_eq!(next.xp_needed, 100);
        assert_eq!(next.progress, 0.0);

        let next = next_level(50).unwrap();
        assert_eq!(next.xp_needed, 50);
        assert_eq!(next.progress, 50.0);

        // Between tier 2 (100) and tier 3 (300)
        let next = next_level(200).unwrap();
        assert_eq!(next.level, 3);
        assert_eq!(next.xp_needed, 100);
        assert_eq!(next.progress, 50.0);
    }

    #[test]
    fn test_next_level_none_at_max() {
        assert!(next_level(600).is_none());
        assert!(next_level(601).is_none());
        assert!(next_level(599).is_some());
    }

    #[tokio::test]
    async fn test_award_xp_increments_and_levels_up() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "ana@example.ph").await?;
        set_xp(&db, &user.id, 95).await?;

        // 95 + 10 crosses the 100 XP threshold into Rising Star
        let award = award_xp(&db, &user.id, XpAction::LogIncome).await?;
        assert_eq!(award.xp, 105);
        assert_eq!(award.level, 2);
        assert_eq!(award.xp_awarded, 10);

        // Level persisted alongside XP
        let stored = crate::core::users::get_user(&db, &user.id).await?;
        assert_eq!(stored.xp, 105);
        assert_eq!(stored.level, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_award_xp_all_action_values() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "ana@example.ph").await?;

        award_xp(&db, &user.id, XpAction::LogIncome).await?; // 10
        award_xp(&db, &user.id, XpAction::SaveBudget).await?; // 15
        award_xp(&db, &user.id, XpAction::GetDailyAdvice).await?; // 20
        award_xp(&db, &user.id, XpAction::CompleteQuiz).await?; // 25
        award_xp(&db, &user.id, XpAction::DailyCheckIn).await?; // 5
        let award = award_xp(&db, &user.id, XpAction::LogExpense).await?; // 5

        assert_eq!(award.xp, 80);
        assert_eq!(award.level, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_award_xp_unknown_user() -> Result<()> {
        let db = setup_test_db().await?;
        let result = award_xp(&db, "missing", XpAction::LogIncome).await;
        assert!(matches!(result, Err(Error::UserNotFound { .. })));
        Ok(())
    }
}
