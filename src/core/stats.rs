//! Per-user gamification summary.
//!
//! Composes the pure calculators into the single structure the dashboard
//! renders: level with progress, streaks, and the glow score with its band.

use crate::{
    core::glow::{calculate_glow_score, glow_label},
    core::levels::{NextLevel, calculate_level, next_level},
    errors::Result,
};

/// Everything the dashboard shows about a user's progress.
#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    /// Accumulated XP
    pub xp: i32,
    /// Current tier number
    pub level: i32,
    /// Current tier name
    pub level_name: &'static str,
    /// Current tier emoji
    pub level_emoji: &'static str,
    /// Progress toward the next tier, `None` at max
    pub next_level: Option<NextLevel>,
    /// Current consecutive-day streak
    pub streak_count: i32,
    /// Historical maximum streak
    pub longest_streak: i32,
    /// Derived 0-100 wellness score
    pub glow_score: i32,
    /// Band label for the score
    pub glow_label: &'static str,
    /// Band emoji for the score
    pub glow_emoji: &'static str,
}

/// Builds the full gamification summary for a user.
pub async fn user_stats(db: &sea_orm::DatabaseConnection, user_id: &str) -> Result<UserStats> {
    let user = crate::core::users::get_user(db, user_id).await?;

    let tier = calculate_level(user.xp);
    let glow_score = calculate_glow_score(db, user_id).await?;
    let band = glow_label(glow_score);

    Ok(UserStats {
        xp: user.xp,
        level: tier.level,
        level_name: tier.name,
        level_emoji: tier.emoji,
        next_level: next_level(user.xp),
        streak_count: user.streak_count,
        longest_streak: user.longest_streak,
        glow_score,
        glow_label: band.label,
        glow_emoji: band.emoji,
    })
}
