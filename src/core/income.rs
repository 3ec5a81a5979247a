//! Income tracking business logic.
//!
//! Logging an income entry is an XP-earning action; deletion is not (and
//! deliberately does not claw XP back, though it can un-earn a badge since
//! badges are recomputed from counts).

use crate::{
    core::levels::{XpAction, award_xp},
    entities::{IncomeEntry, income_entry},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};
use uuid::Uuid;

/// Most recent entries returned by [`list_income`].
const LIST_LIMIT: u64 = 100;

/// Input for logging one income event.
#[derive(Debug, Clone)]
pub struct NewIncomeEntry {
    /// Platform the money came from (e.g. "TikTok")
    pub source: String,
    /// Kind of income (e.g. "Brand Deal")
    pub income_type: String,
    /// Amount in pesos, must be positive and finite
    pub amount: f64,
    /// Date the income was received
    pub date: DateTime<Utc>,
    /// Optional note, up to 500 chars
    pub note: Option<String>,
}

fn validate_entry(entry: &NewIncomeEntry) -> Result<()> {
    if entry.source.trim().is_empty() || entry.income_type.trim().is_empty() {
        return Err(Error::Validation {
            message: "Source and type are required".to_string(),
        });
    }
    if entry.amount <= 0.0 || !entry.amount.is_finite() {
        return Err(Error::InvalidAmount {
            amount: entry.amount,
        });
    }
    if entry.note.as_ref().is_some_and(|n| n.len() > 500) {
        return Err(Error::Validation {
            message: "Note must be at most 500 characters".to_string(),
        });
    }
    Ok(())
}

/// Persists an income entry and awards the logging XP.
pub async fn log_income(
    db: &sea_orm::DatabaseConnection,
    user_id: &str,
    entry: NewIncomeEntry,
) -> Result<income_entry::Model> {
    validate_entry(&entry)?;

    let model = income_entry::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        user_id: Set(user_id.to_string()),
        source: Set(entry.source.trim().to_string()),
        income_type: Set(entry.income_type.trim().to_string()),
        amount: Set(entry.amount),
        date: Set(entry.date),
        note: Set(entry.note),
        created_at: Set(Utc::now()),
    };
    let created = model.insert(db).await?;

    award_xp(db, user_id, XpAction::LogIncome).await?;

    Ok(created)
}

/// Returns the user's most recent entries, newest first, capped at 100.
pub async fn list_income(
    db: &sea_orm::DatabaseConnection,
    user_id: &str,
) -> Result<Vec<income_entry::Model>> {
    IncomeEntry::find()
        .filter(income_entry::Column::UserId.eq(user_id))
        .order_by_desc(income_entry::Column::Date)
        .limit(LIST_LIMIT)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes an entry after verifying it belongs to the caller.
pub async fn delete_income(
    db: &sea_orm::DatabaseConnection,
    user_id: &str,
    entry_id: &str,
) -> Result<()> {
    let entry = IncomeEntry::find_by_id(entry_id)
        .filter(income_entry::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or_else(|| Error::EntryNotFound {
            id: entry_id.to_string(),
        })?;

    entry.delete(db).await?;
    Ok(())
}
