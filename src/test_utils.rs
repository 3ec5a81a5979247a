//! Shared test utilities for `MoneyGlow`.
//!
//! This module provides common helper functions for setting up test databases,
//! creating test entities with sensible defaults, and mock collaborators for
//! the mail and advice boundaries.

use crate::{
    core::users::OnboardingData,
    entities::{IncomeEntry, income_entry, user},
    errors::{Error, Result},
    providers::{AdviceProvider, Mailer, UserContext},
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    sea_query::Expr,
};
use std::sync::{Arc, Mutex};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a fresh (un-onboarded) user for the given email.
pub async fn create_test_user(db: &DatabaseConnection, email: &str) -> Result<user::Model> {
    crate::core::users::find_or_create_by_email(db, email).await
}

/// A complete, valid onboarding payload.
pub fn sample_onboarding() -> OnboardingData {
    OnboardingData {
        name: "Ana".to_string(),
        age: 21,
        income_sources: vec!["TikTok".to_string(), "GCash".to_string()],
        monthly_income: 15000.0,
        financial_goal: "SAVE_EMERGENCY_FUND".to_string(),
        employment_status: Some("STUDENT".to_string()),
        has_emergency_fund: Some("BUILDING".to_string()),
        debt_situation: Some("NONE".to_string()),
        language_pref: "ENGLISH".to_string(),
    }
}

/// A valid income entry dated now.
pub fn sample_income_entry(amount: f64) -> crate::core::income::NewIncomeEntry {
    crate::core::income::NewIncomeEntry {
        source: "TikTok".to_string(),
        income_type: "Brand Deal".to_string(),
        amount,
        date: Utc::now(),
        note: None,
    }
}

/// A valid expense dated now.
pub fn sample_expense(category: &str, amount: f64) -> crate::core::expense::NewExpense {
    crate::core::expense::NewExpense {
        category: category.to_string(),
        subcategory: "Food".to_string(),
        amount,
        date: Utc::now(),
        note: None,
    }
}

/// Inserts an income entry directly (bypassing XP) for counter tests.
pub async fn create_test_income(
    db: &DatabaseConnection,
    user_id: &str,
    amount: f64,
) -> Result<income_entry::Model> {
    let model = income_entry::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        user_id: Set(user_id.to_string()),
        source: Set("TikTok".to_string()),
        income_type: Set("Brand Deal".to_string()),
        amount: Set(amount),
        date: Set(Utc::now()),
        note: Set(None),
        created_at: Set(Utc::now()),
    };
    model.insert(db).await.map_err(Into::into)
}

/// Records a budget snapshot for glow-score tests.
pub async fn create_test_snapshot(
    db: &DatabaseConnection,
    user_id: &str,
    income: f64,
) -> Result<crate::entities::budget_snapshot::Model> {
    crate::core::budget::create_snapshot(db, user_id, income).await
}

/// Pushes every income entry of a user `days` into the past (both `date`
/// and `created_at`), for 30-day-window tests.
pub async fn backdate_income_entries(
    db: &DatabaseConnection,
    user_id: &str,
    days: i64,
) -> Result<()> {
    let cutoff = Utc::now() - Duration::days(days);
    IncomeEntry::update_many()
        .col_expr(income_entry::Column::CreatedAt, Expr::value(cutoff))
        .col_expr(income_entry::Column::Date, Expr::value(cutoff))
        .filter(income_entry::Column::UserId.eq(user_id))
        .exec(db)
        .await?;
    Ok(())
}

/// Sets a user's XP directly (level is left for the code under test).
pub async fn set_xp(db: &DatabaseConnection, user_id: &str, xp: i32) -> Result<()> {
    let user = crate::core::users::get_user(db, user_id).await?;
    let mut active: user::ActiveModel = user.into();
    active.xp = Set(xp);
    active.update(db).await?;
    Ok(())
}

/// Sets a user's streak state directly.
pub async fn set_streak_state(
    db: &DatabaseConnection,
    user_id: &str,
    streak_count: i32,
    longest_streak: i32,
    last_check_in: Option<DateTime<Utc>>,
) -> Result<()> {
    let user = crate::core::users::get_user(db, user_id).await?;
    let mut active: user::ActiveModel = user.into();
    active.streak_count = Set(streak_count);
    active.longest_streak = Set(longest_streak);
    active.last_check_in = Set(last_check_in);
    active.update(db).await?;
    Ok(())
}

/// Sets a user's quiz result directly.
pub async fn set_quiz_result(db: &DatabaseConnection, user_id: &str, result: &str) -> Result<()> {
    let user = crate::core::users::get_user(db, user_id).await?;
    let mut active: user::ActiveModel = user.into();
    active.quiz_result = Set(Some(result.to_string()));
    active.update(db).await?;
    Ok(())
}

/// Flips a user's admin flag.
pub async fn set_admin(db: &DatabaseConnection, user_id: &str, is_admin: bool) -> Result<()> {
    let user = crate::core::users::get_user(db, user_id).await?;
    let mut active: user::ActiveModel = user.into();
    active.is_admin = Set(is_admin);
    active.update(db).await?;
    Ok(())
}

/// An [`crate::config::app::AppConfig`] with test defaults (no env access).
pub fn test_config() -> crate::config::app::AppConfig {
    crate::config::app::AppConfig {
        app_url: "https://moneyglow.test".to_string(),
        jwt_secret: "0123456789abcdef0123456789abcdef".to_string(),
        mail_sender: "test@moneyglow.test".to_string(),
        magic_link_ttl_minutes: 15,
        session_ttl_days: 7,
    }
}

/// A session codec matching [`test_config`].
pub fn test_codec() -> crate::core::session::SessionCodec {
    crate::core::session::SessionCodec::from_config(&test_config())
}

/// Mock mailer recording every send; optionally fails every call.
pub struct MockMailer {
    /// `(to, subject, html)` per dispatched message
    pub sent: Arc<Mutex<Vec<(String, String, String)>>>,
    fail: bool,
}

impl MockMailer {
    /// A recording mailer that always succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// A mailer that fails every send.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<()> {
        if self.fail {
            return Err(Error::Mail {
                message: "mock dispatch failure".to_string(),
            });
        }
        self.sent
            .lock()
            .map_err(|_| Error::Mail {
                message: "mock mailer poisoned".to_string(),
            })?
            .push((to.to_string(), subject.to_string(), html.to_string()));
        Ok(())
    }
}

/// Advice provider returning fixed strings, for deterministic tests.
pub struct FixedAdviceProvider;

#[async_trait]
impl AdviceProvider for FixedAdviceProvider {
    async fn daily_advice(&self, _user: &UserContext) -> Result<String> {
        Ok("Track every peso today.".to_string())
    }

    async fn quiz_challenge(&self, _user: &UserContext, personality: &str) -> Result<String> {
        Ok(format!("30-day challenge for {personality}"))
    }
}
