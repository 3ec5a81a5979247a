//! Admin aggregate views.
//!
//! Read-only reporting over the whole user base plus a per-user drill-down.
//! Callers are expected to gate these behind
//! [`crate::core::session::SessionCodec::require_admin`].

use crate::{
    core::badges::{Badge, compute_badges},
    core::glow::calculate_glow_score,
    entities::{
        DailyAdvice, Expense, Feedback, IncomeEntry, MonthlyBudget, User, daily_advice, expense,
        feedback, income_entry, monthly_budget, user,
    },
    errors::Result,
};
use chrono::{Duration, Utc};
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    sea_query::Expr,
};

/// Aggregate statistics across all users.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminStats {
    /// All accounts, onboarded or not
    pub total_users: u64,
    /// Accounts that completed onboarding
    pub onboarded_users: u64,
    /// Accounts with a check-in in the trailing 7 days
    pub active_users: u64,
    /// Sum of every income entry
    pub total_income: f64,
    /// Sum of every expense
    pub total_expenses: f64,
    /// Monthly budget rows across all users
    pub total_budgets: u64,
    /// Percentage of onboarded users who took the quiz, 0-100
    pub quiz_completion_rate: i32,
    /// User count per level, index 0 holding level 1
    pub level_distribution: [u64; 4],
}

/// Per-user drill-down for the admin detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct UserDetail {
    /// The full user row
    pub user: user::Model,
    /// Lifetime income entry count
    pub income_count: u64,
    /// Lifetime expense count
    pub expense_count: u64,
    /// Monthly budget count
    pub budget_count: u64,
    /// Cached advice-day count
    pub advice_count: u64,
    /// Current glow score
    pub glow_score: i32,
    /// Full badge catalog with earned flags
    pub badges: Vec<Badge>,
}

async fn total_income_all_users(db: &sea_orm::DatabaseConnection) -> Result<f64> {
    let total: Option<f64> = IncomeEntry::find()
        .select_only()
        .column_as(Expr::col(income_entry::Column::Amount).sum(), "total")
        .into_tuple()
        .one(db)
        .await?
        .flatten();
    Ok(total.unwrap_or(0.0))
}

async fn total_expenses_all_users(db: &sea_orm::DatabaseConnection) -> Result<f64> {
    let total: Option<f64> = Expense::find()
        .select_only()
        .column_as(Expr::col(expense::Column::Amount).sum(), "total")
        .into_tuple()
        .one(db)
        .await?
        .flatten();
    Ok(total.unwrap_or(0.0))
}

/// Computes the aggregate dashboard numbers.
#[allow(clippy::cast_possible_truncation)]
pub async fn overview_stats(db: &sea_orm::DatabaseConnection) -> Result<AdminStats> {
    let seven_days_ago = Utc::now() - Duration::days(7);

    let total_users = User::find().count(db).await?;
    let onboarded_users = User::find()
        .filter(user::Column::Onboarded.eq(true))
        .count(db)
        .await?;
    let active_users = User::find()
        .filter(user::Column::LastCheckIn.gte(seven_days_ago))
        .count(db)
        .await?;
    let quiz_completions = User::find()
        .filter(user::Column::Onboarded.eq(true))
        .filter(user::Column::QuizResult.is_not_null())
        .count(db)
        .await?;

    let total_income = total_income_all_users(db).await?;
    let total_expenses = total_expenses_all_users(db).await?;
    let total_budgets = MonthlyBudget::find().count(db).await?;

    let quiz_completion_rate = if onboarded_users > 0 {
        ((quiz_completions as f64 / onboarded_users as f64) * 100.0).round() as i32
    } else {
        0
    };

    let by_level: Vec<(i32, i64)> = User::find()
        .select_only()
        .column(user::Column::Level)
        .column_as(Expr::col(user::Column::Id).count(), "count")
        .group_by(user::Column::Level)
        .into_tuple()
        .all(db)
        .await?;

    let mut level_distribution = [0u64; 4];
    for (level, count) in by_level {
        if (1..=4).contains(&level) {
            level_distribution[(level - 1) as usize] = count as u64;
        }
    }

    Ok(AdminStats {
        total_users,
        onboarded_users,
        active_users,
        total_income,
        total_expenses,
        total_budgets,
        quiz_completion_rate,
        level_distribution,
    })
}

/// Builds the drill-down view for one user.
pub async fn user_detail(db: &sea_orm::DatabaseConnection, user_id: &str) -> Result<UserDetail> {
    let user = crate::core::users::get_user(db, user_id).await?;

    let income_count = IncomeEntry::find()
        .filter(income_entry::Column::UserId.eq(user_id))
        .count(db)
        .await?;
    let expense_count = Expense::find()
        .filter(expense::Column::UserId.eq(user_id))
        .count(db)
        .await?;
    let budget_count = MonthlyBudget::find()
        .filter(monthly_budget::Column::UserId.eq(user_id))
        .count(db)
        .await?;
    let advice_count = DailyAdvice::find()
        .filter(daily_advice::Column::UserId.eq(user_id))
        .count(db)
        .await?;

    let glow_score = calculate_glow_score(db, user_id).await?;
    let badges = compute_badges(db, user_id).await?;

    Ok(UserDetail {
        user,
        income_count,
        expense_count,
        budget_count,
        advice_count,
        glow_score,
        badges,
    })
}

/// All users, newest accounts first.
pub async fn list_users(db: &sea_orm::DatabaseConnection) -> Result<Vec<user::Model>> {
    User::find()
        .order_by_desc(user::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// All feedback, newest first.
pub async fn list_feedback(db: &sea_orm::DatabaseConnection) -> Result<Vec<feedback::Model>> {
    Feedback::find()
        .order_by_desc(feedback::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{
        FixedAdviceProvider, MockMailer, create_test_user, sample_income_entry, sample_onboarding,
        set_streak_state, setup_test_db,
    };

    #[tokio::test]
    async fn test_overview_stats_empty_database() -> Result<()> {
        let db = setup_test_db().await?;

        let stats = overview_stats(&db).await?;
        assert_eq!(stats.total_users, 0);
        assert_eq!(stats.quiz_completion_rate, 0);
        assert_eq!(stats.total_income, 0.0);
        assert_eq!(stats.level_distribution, [0, 0, 0, 0]);

        Ok(())
    }

    #[tokio::test]
    async fn test_overview_stats_counts_and_sums() -> Result<()> {
        let db = setup_test_db().await?;
        let mailer = MockMailer::new();
        let provider = FixedAdviceProvider;

        let ana = create_test_user(&db, "ana@example.ph").await?;
        let ben = create_test_user(&db, "ben@example.ph").await?;
        create_test_user(&db, "cara@example.ph").await?;

        crate::core::users::complete_onboarding(&db, &mailer, &ana.id, sample_onboarding())
            .await?;
        crate::core::users::complete_onboarding(&db, &mailer, &ben.id, sample_onboarding())
            .await?;
        crate::core::quiz::complete_quiz(
            &db,
            &provider,
            &ana.id,
            crate::core::quiz::QuizResult::Plan,
        )
        .await?;
        crate::core::income::log_income(&db, &ana.id, sample_income_entry(5000.0)).await?;
        crate::core::income::log_income(&db, &ben.id, sample_income_entry(3000.0)).await?;
        crate::core::budget::save_monthly_budget(&db, &ana.id, 10000.0, 8, 2026).await?;
        set_streak_state(&db, &ana.id, 1, 1, Some(Utc::now())).await?;

        let stats = overview_stats(&db).await?;
        assert_eq!(stats.total_users, 3);
        assert_eq!(stats.onboarded_users, 2);
        assert_eq!(stats.active_users, 1);
        assert_eq!(stats.total_income, 8000.0);
        assert_eq!(stats.total_budgets, 1);
        // 1 of 2 onboarded users took the quiz
        assert_eq!(stats.quiz_completion_rate, 50);
        // Everyone is still level 1
        assert_eq!(stats.level_distribution, [3, 0, 0, 0]);

        Ok(())
    }

    #[tokio::test]
    async fn test_user_detail_composes_counters() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "ana@example.ph").await?;

        crate::core::income::log_income(&db, &user.id, sample_income_entry(5000.0)).await?;
        crate::core::budget::save_monthly_budget(&db, &user.id, 10000.0, 8, 2026).await?;

        let detail = user_detail(&db, &user.id).await?;
        assert_eq!(detail.income_count, 1);
        assert_eq!(detail.expense_count, 0);
        assert_eq!(detail.budget_count, 1);
        assert_eq!(detail.badges.len(), 10);
        assert!(detail.badges.iter().any(|b| b.def.id == "first_peso" && b.earned));

        Ok(())
    }
}
