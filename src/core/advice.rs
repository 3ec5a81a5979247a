//! Daily advice orchestration.
//!
//! One advice text per user per UTC calendar day. Generation is delegated
//! to the injected [`AdviceProvider`]; this module owns the cache row, the
//! XP award, and the streak update - advice is the streak-qualifying action.
//! Peek mode reports the cache without generating, so a dashboard can show
//! "today's advice" without spending a generation or granting XP.

use crate::{
    core::levels::{XpAction, award_xp},
    core::streak::update_streak,
    entities::{DailyAdvice, daily_advice},
    errors::Result,
    providers::{AdviceProvider, UserContext},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

/// Result of an advice request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyAdviceOutcome {
    /// The advice text; `None` only in peek mode with a cold cache
    pub content: Option<String>,
    /// Whether the text came from today's cache row
    pub cached: bool,
}

/// Fetches (or generates) today's advice for a user.
///
/// With `peek` set, a cold cache returns `None` instead of generating -
/// no row is written, no XP granted, no streak touched.
pub async fn get_daily_advice(
    db: &sea_orm::DatabaseConnection,
    provider: &dyn AdviceProvider,
    user_id: &str,
    peek: bool,
) -> Result<DailyAdviceOutcome> {
    let today = Utc::now()
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .unwrap_or_default()
        .and_utc();

    let existing = DailyAdvice::find()
        .filter(daily_advice::Column::UserId.eq(user_id))
        .filter(daily_advice::Column::Date.eq(today))
        .one(db)
        .await?;

    if let Some(row) = existing {
        return Ok(DailyAdviceOutcome {
            content: Some(row.content),
            cached: true,
        });
    }

    if peek {
        return Ok(DailyAdviceOutcome {
            content: None,
            cached: false,
        });
    }

    let user = crate::core::users::get_user(db, user_id).await?;
    let content = provider.daily_advice(&UserContext::from_user(&user)).await?;

    let row = daily_advice::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        user_id: Set(user_id.to_string()),
        content: Set(content.clone()),
        date: Set(today),
        created_at: Set(Utc::now()),
    };
    row.insert(db).await?;

    award_xp(db, user_id, XpAction::GetDailyAdvice).await?;
    update_streak(db, user_id).await?;

    Ok(DailyAdviceOutcome {
        content: Some(content),
        cached: false,
    })
}
