//! Budget business logic - 50/30/20 splits.
//!
//! Two related surfaces: append-only snapshots from the quick calculator
//! (these feed the glow score), and one editable monthly budget per
//! (user, month, year) whose save is an XP-earning action and feeds the
//! `budget_boss` badge. The monthly overview joins the stored plan with
//! actual per-bucket spending.

use crate::{
    core::levels::{XpAction, award_xp},
    entities::{
        BudgetSnapshot, Expense, IncomeEntry, MonthlyBudget, budget_snapshot, expense,
        income_entry, monthly_budget,
    },
    errors::{Error, Result},
};
use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    sea_query::Expr,
};
use uuid::Uuid;

/// Snapshots returned by [`list_snapshots`].
const SNAPSHOT_LIMIT: u64 = 10;

/// Actual spending per bucket for one month.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpentTotals {
    /// Total NEEDS spending
    pub needs: f64,
    /// Total WANTS spending
    pub wants: f64,
    /// Total SAVINGS contributions
    pub savings: f64,
    /// Sum of all three buckets
    pub total: f64,
}

/// Stored plan plus actuals for one month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyOverview {
    /// The saved plan, if one exists for the month
    pub budget: Option<monthly_budget::Model>,
    /// Per-bucket spending within the month
    pub spent: SpentTotals,
    /// Sum of income entries dated within the month
    pub tracked_income: f64,
}

/// UTC range `[start, end)` covering one calendar month.
pub(crate) fn month_range(month: u32, year: i32) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let start = Utc
        .with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| Error::Validation {
            message: format!("Invalid month: {year}-{month}"),
        })?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = Utc
        .with_ymd_and_hms(next_year, next_month, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| Error::Validation {
            message: format!("Invalid month: {year}-{month}"),
        })?;
    Ok((start, end))
}

fn validate_income(income: f64) -> Result<()> {
    if income <= 0.0 || !income.is_finite() {
        return Err(Error::InvalidAmount { amount: income });
    }
    Ok(())
}

/// Records a quick 50/30/20 calculation (unrounded split).
pub async fn create_snapshot(
    db: &sea_orm::DatabaseConnection,
    user_id: &str,
    income: f64,
) -> Result<budget_snapshot::Model> {
    validate_income(income)?;

    let snapshot = budget_snapshot::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        user_id: Set(user_id.to_string()),
        income: Set(income),
        needs: Set(income * 0.5),
        wants: Set(income * 0.3),
        savings: Set(income * 0.2),
        created_at: Set(Utc::now()),
    };

    snapshot.insert(db).await.map_err(Into::into)
}

/// Returns the user's most recent snapshots, newest first, capped at 10.
pub async fn list_snapshots(
    db: &sea_orm::DatabaseConnection,
    user_id: &str,
) -> Result<Vec<budget_snapshot::Model>> {
    BudgetSnapshot::find()
        .filter(budget_snapshot::Column::UserId.eq(user_id))
        .order_by_desc(budget_snapshot::Column::CreatedAt)
        .limit(SNAPSHOT_LIMIT)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Saves (or re-saves) the monthly budget for `(user, month, year)` with a
/// whole-peso 50/30/20 split, then awards the budgeting XP.
pub async fn save_monthly_budget(
    db: &sea_orm::DatabaseConnection,
    user_id: &str,
    income: f64,
    month: u32,
    year: i32,
) -> Result<monthly_budget::Model> {
    validate_income(income)?;
    if !(1..=12).contains(&month) || !(2020..=2100).contains(&year) {
        return Err(Error::Validation {
            message: format!("Invalid month: {year}-{month}"),
        });
    }

    let needs = (income * 0.5).round();
    let wants = (income * 0.3).round();
    let savings = (income * 0.2).round();
    let now = Utc::now();

    let existing = MonthlyBudget::find()
        .filter(monthly_budget::Column::UserId.eq(user_id))
        .filter(monthly_budget::Column::Month.eq(month as i32))
        .filter(monthly_budget::Column::Year.eq(year))
        .one(db)
        .await?;

    let budget = if let Some(budget) = existing {
        let mut active: monthly_budget::ActiveModel = budget.into();
        active.income = Set(income);
        active.needs = Set(needs);
        active.wants = Set(wants);
        active.savings = Set(savings);
        active.updated_at = Set(now);
        active.update(db).await?
    } else {
        let active = monthly_budget::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_id: Set(user_id.to_string()),
            month: Set(month as i32),
            year: Set(year),
            income: Set(income),
            needs: Set(needs),
            wants: Set(wants),
            savings: Set(savings),
            created_at: Set(now),
            updated_at: Set(now),
        };
        active.insert(db).await?
    };

    award_xp(db, user_id, XpAction::SaveBudget).await?;

    Ok(budget)
}

/// Joins the stored plan with actual spending and tracked income for one
/// calendar month.
pub async fn monthly_overview(
    db: &sea_orm::DatabaseConnection,
    user_id: &str,
    month: u32,
    year: i32,
) -> Result<MonthlyOverview> {
    let (start, end) = month_range(month, year)?;

    let budget = MonthlyBudget::find()
        .filter(monthly_budget::Column::UserId.eq(user_id))
        .filter(monthly_budget::Column::Month.eq(month as i32))
        .filter(monthly_budget::Column::Year.eq(year))
        .one(db)
        .await?;

    let by_category: Vec<(String, f64)> = Expense::find()
        .select_only()
        .column(expense::Column::Category)
        .column_as(Expr::col(expense::Column::Amount).sum(), "total")
        .filter(expense::Column::UserId.eq(user_id))
        .filter(expense::Column::Date.gte(start))
        .filter(expense::Column::Date.lt(end))
        .group_by(expense::Column::Category)
        .into_tuple()
        .all(db)
        .await?;

    let mut spent = SpentTotals::default();
    for (category, total) in by_category {
        match category.as_str() {
            "NEEDS" => spent.needs = total,
            "WANTS" => spent.wants = total,
            "SAVINGS" => spent.savings = total,
            _ => {}
        }
        spent.total += total;
    }

    let tracked_income: Option<f64> = IncomeEntry::find()
        .select_only()
        .column_as(Expr::col(income_entry::Column::Amount).sum(), "total")
        .filter(income_entry::Column::UserId.eq(user_id))
        .filter(income_entry::Column::Date.gte(start))
        .filter(income_entry::Column::Date.lt(end))
        .into_tuple()
        .one(db)
        .await?
        .flatten();

    Ok(MonthlyOverview {
        budget,
        spent,
        tracked_income: tracked_income.unwrap_or(0.0),
    })
}
