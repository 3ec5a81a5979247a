//! Expense tracking business logic.
//!
//! Expenses land in one of the three 50/30/20 buckets (NEEDS, WANTS,
//! SAVINGS) and feed the monthly budget overview and the `tracker` badge.

use crate::{
    core::levels::{XpAction, award_xp},
    entities::{Expense, expense},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

/// The three budget buckets an expense can land in.
pub const EXPENSE_CATEGORIES: [&str; 3] = ["NEEDS", "WANTS", "SAVINGS"];

/// Input for logging one expense.
#[derive(Debug, Clone)]
pub struct NewExpense {
    /// One of [`EXPENSE_CATEGORIES`]
    pub category: String,
    /// Finer-grained label (e.g. "Food", "Streaming")
    pub subcategory: String,
    /// Amount in pesos, must be positive and finite
    pub amount: f64,
    /// Date the expense occurred
    pub date: DateTime<Utc>,
    /// Optional note, up to 500 chars
    pub note: Option<String>,
}

fn validate_expense(entry: &NewExpense) -> Result<()> {
    if !EXPENSE_CATEGORIES.contains(&entry.category.as_str()) {
        return Err(Error::Validation {
            message: format!("Invalid category: {}", entry.category),
        });
    }
    if entry.subcategory.trim().is_empty() || entry.subcategory.len() > 100 {
        return Err(Error::Validation {
            message: "Subcategory is required".to_string(),
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

/// Persists an expense and awards the logging XP.
pub async fn log_expense(
    db: &sea_orm::DatabaseConnection,
    user_id: &str,
    entry: NewExpense,
) -> Result<expense::Model> {
    validate_expense(&entry)?;

    let model = expense::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        user_id: Set(user_id.to_string()),
        category: Set(entry.category),
        subcategory: Set(entry.subcategory.trim().to_string()),
        amount: Set(entry.amount),
        date: Set(entry.date),
        note: Set(entry.note),
        created_at: Set(Utc::now()),
    };
    let created = model.insert(db).await?;

    award_xp(db, user_id, XpAction::LogExpense).await?;

    Ok(created)
}

/// Returns the user's expenses for one calendar month, newest first.
pub async fn list_expenses_for_month(
    db: &sea_orm::DatabaseConnection,
    user_id: &str,
    month: u32,
    year: i32,
) -> Result<Vec<expense::Model>> {
    let (start, end) = crate::core::budget::month_range(month, year)?;

    Expense::find()
        .filter(expense::Column::UserId.eq(user_id))
        .filter(expense::Column::Date.gte(start))
        .filter(expense::Column::Date.lt(end))
        .order_by_desc(expense::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes an expense after verifying it belongs to the caller.
pub async fn delete_expense(
    db: &sea_orm::DatabaseConnection,
    user_id: &str,
    expense_id: &str,
) -> Result<()> {
    let entry = Expense::find_by_id(expense_id)
        .filter(expense::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or_else(|| Error::EntryNotFound {
            id: expense_id.to_string(),
        })?;

    entry.delete(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{create_test_user, sample_expense, setup_test_db};
    use chrono::Datelike;

    #[tokio::test]
    async fn test_log_expense_persists_and_awards_xp() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "ana@example.ph").await?;

        let entry = log_expense(&db, &user.id, sample_expense("NEEDS", 250.0)).await?;
        assert_eq!(entry.category, "NEEDS");

        let stored = crate::core::users::get_user(&db, &user.id).await?;
        assert_eq!(stored.xp, 5);

        Ok(())
    }

    #[tokio::test]
    async fn test_log_expense_rejects_unknown_category() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "ana@example.ph").await?;

        let result = log_expense(&db, &user.id, sample_expense("FUN", 250.0)).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let result = log_expense(&db, &user.id, sample_expense("NEEDS", -1.0)).await;
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_expenses_windows_to_month() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "ana@example.ph").await?;
        let now = Utc::now();

        log_expense(&db, &user.id, sample_expense("NEEDS", 100.0)).await?;

        let mut last_month = sample_expense("WANTS", 50.0);
        last_month.date = now - chrono::Duration::days(45);
        log_expense(&db, &user.id, last_month).await?;

        let this_month = list_expenses_for_month(&db, &user.id, now.month(), now.year()).await?;
        assert_eq!(this_month.len(), 1);
        assert_eq!(this_month[0].category, "NEEDS");

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_expense_checks_ownership() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "ana@example.ph").await?;
        let other = create_test_user(&db, "ben@example.ph").await?;

        let entry = log_expense(&db, &owner.id, sample_expense("WANTS", 99.0)).await?;

        let result = delete_expense(&db, &other.id, &entry.id).await;
        assert!(matches!(result, Err(Error::EntryNotFound { .. })));

        delete_expense(&db, &owner.id, &entry.id).await?;

        Ok(())
    }
}
