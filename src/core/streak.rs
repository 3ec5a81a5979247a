//! Streak tracking business logic.
//!
//! A streak counts consecutive local calendar days with at least one
//! qualifying action (currently: receiving the day's advice). Same-day
//! re-entry is a no-op by design - the idempotency is what makes it safe to
//! call on every trigger without double-counting.

use crate::{
    entities::user,
    errors::Result,
};
use chrono::{DateTime, Local, Utc};
use sea_orm::{ActiveModelTrait, Set};

/// Result of a streak update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakUpdate {
    /// Current consecutive-day count after the update
    pub streak_count: i32,
    /// Historical maximum after the update
    pub longest_streak: i32,
    /// False when the user had already checked in today
    pub is_new: bool,
}

/// Records a streak-qualifying action for today.
///
/// - first check-in ever: streak becomes 1
/// - same calendar day as the last check-in: nothing changes
/// - exactly one day later: streak increments, longest keeps the max
/// - any other gap (including a stored check-in in the future, from clock
///   skew): streak resets to 1, longest untouched
pub async fn update_streak(
    db: &sea_orm::DatabaseConnection,
    user_id: &str,
) -> Result<StreakUpdate> {
    update_streak_at(db, user_id, Utc::now()).await
}

async fn update_streak_at(
    db: &sea_orm::DatabaseConnection,
    user_id: &str,
    now: DateTime<Utc>,
) -> Result<StreakUpdate> {
    let user = crate::core::users::get_user(db, user_id).await?;
    let today = now.with_timezone(&Local).date_naive();

    let Some(last_check_in) = user.last_check_in else {
        // First check-in ever
        let longest = user.longest_streak.max(1);
        let mut active: user::ActiveModel = user.into();
        active.streak_count = Set(1);
        active.longest_streak = Set(longest);
        active.last_check_in = Set(Some(now));
        active.updated_at = Set(now);
        active.update(db).await?;
        return Ok(StreakUpdate {
            streak_count: 1,
            longest_streak: longest,
            is_new: true,
        });
    };

    let last_day = last_check_in.with_timezone(&Local).date_naive();
    let diff_days = (today - last_day).num_days();

    if diff_days == 0 {
        // Already checked in today
        return Ok(StreakUpdate {
            streak_count: user.streak_count,
            longest_streak: user.longest_streak,
            is_new: false,
        });
    }

    if diff_days == 1 {
        // Consecutive day
        let new_streak = user.streak_count + 1;
        let new_longest = user.longest_streak.max(new_streak);
        let mut active: user::ActiveModel = user.into();
        active.streak_count = Set(new_streak);
        active.longest_streak = Set(new_longest);
        active.last_check_in = Set(Some(now));
        active.updated_at = Set(now);
        active.update(db).await?;
        return Ok(StreakUpdate {
            streak_count: new_streak,
            longest_streak: new_longest,
            is_new: true,
        });
    }

    // Streak broken - a multi-day gap or a last check-in in the future
    let longest = user.longest_streak;
    let mut active: user::ActiveModel = user.into();
    active.streak_count = Set(1);
    active.last_check_in = Set(Some(now));
    active.updated_at = Set(now);
    active.update(db).await?;
    Ok(StreakUpdate {
        streak_count: 1,
        longest_streak: longest,
        is_new: true,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{create_test_user, set_streak_state, setup_test_db};
    use chrono::Duration;

    #[tokio::test]
    async fn test_first_check_in_then_same_day_noop() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "ana@example.ph").await?;
        let now = Utc::now();

        let first = update_streak_at(&db, &user.id, now).await?;
        assert_eq!(first.streak_count, 1);
        assert_eq!(first.longest_streak, 1);
        assert!(first.is_new);

        // Second trigger on the same day must not double-count
        let second = update_streak_at(&db, &user.id, now).await?;
        assert_eq!(second.streak_count, 1);
        assert_eq!(second.longest_streak, 1);
        assert!(!second.is_new);

        Ok(())
    }

    #[tokio::test]
    async fn test_ten_consecutive_days() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "ana@example.ph").await?;
        let start = Utc::now();

        let mut last = StreakUpdate {
            streak_count: 0,
            longest_streak: 0,
            is_new: false,
        };
        for day in 0..10 {
            last = update_streak_at(&db, &user.id, start + Duration::days(day)).await?;
            assert!(last.is_new);
        }
        assert_eq!(last.streak_count, 10);
        assert_eq!(last.longest_streak, 10);

        Ok(())
    }

    #[tokio::test]
    async fn test_gap_resets_but_keeps_longest() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "ana@example.ph").await?;
        let now = Utc::now();

        // Streak of 5 ending three days ago
        set_streak_state(&db, &user.id, 5, 5, Some(now - Duration::days(3))).await?;

        let update = update_streak_at(&db, &user.id, now).await?;
        assert_eq!(update.streak_count, 1);
        assert_eq!(update.longest_streak, 5);
        assert!(update.is_new);

        Ok(())
    }

    #[tokio::test]
    async fn test_consecutive_day_updates_longest() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "ana@example.ph").await?;
        let now = Utc::now();

        set_streak_state(&db, &user.id, 7, 7, Some(now - Duration::days(1))).await?;

        let update = update_streak_at(&db, &user.id, now).await?;
        assert_eq!(update.streak_count, 8);
        assert_eq!(update.longest_streak, 8);

        Ok(())
    }

    #[tokio::test]
    async fn test_consecutive_day_below_longest() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "ana@example.ph").await?;
        let now = Utc::now();

        // Current run of 2 against a historical best of 10
        set_streak_state(&db, &user.id, 2, 10, Some(now - Duration::days(1))).await?;

        let update = update_streak_at(&db, &user.id, now).await?;
        assert_eq!(update.streak_count, 3);
        assert_eq!(update.longest_streak, 10);

        Ok(())
    }

    #[tokio::test]
    async fn test_future_check_in_treated_as_broken() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "ana@example.ph").await?;
        let now = Utc::now();

        // Clock skew: stored check-in several days ahead of "now"
        set_streak_state(&db, &user.id, 4, 6, Some(now + Duration::days(3))).await?;

        let update = update_streak_at(&db, &user.id, now).await?;
        assert_eq!(update.streak_count, 1);
        assert_eq!(update.longest_streak, 6);

        Ok(())
    }

    #[tokio::test]
    async fn test_first_check_in_preserves_stale_longest() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "ana@example.ph").await?;

        // longest carries over even when last_check_in was cleared
        set_streak_state(&db, &user.id, 0, 9, None).await?;

        let update = update_streak(&db, &user.id).await?;
        assert_eq!(update.streak_count, 1);
        assert_eq!(update.longest_streak, 9);

        Ok(())
    }
}
