//! Trends business logic - per-month income/expense summaries.

use crate::{
    core::budget::month_range,
    entities::{Expense, IncomeEntry, expense, income_entry},
    errors::Result,
};
use chrono::{Datelike, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QuerySelect, sea_query::Expr};

/// Totals for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthSummary {
    /// Calendar month 1-12
    pub month: u32,
    /// Calendar year
    pub year: i32,
    /// Short display label, e.g. "Aug 2026"
    pub label: String,
    /// Sum of income entries dated in the month
    pub income: f64,
    /// Sum of expenses dated in the month
    pub expenses: f64,
    /// Income minus expenses
    pub net: f64,
}

async fn sum_for_month(
    db: &sea_orm::DatabaseConnection,
    user_id: &str,
    month: u32,
    year: i32,
) -> Result<(f64, f64)> {
    let (start, end) = month_range(month, year)?;

    let income: Option<f64> = IncomeEntry::find()
        .select_only()
        .column_as(Expr::col(income_entry::Column::Amount).sum(), "total")
        .filter(income_entry::Column::UserId.eq(user_id))
        .filter(income_entry::Column::Date.gte(start))
        .filter(income_entry::Column::Date.lt(end))
        .into_tuple()
        .one(db)
        .await?
        .flatten();

    let expenses: Option<f64> = Expense::find()
        .select_only()
        .column_as(Expr::col(expense::Column::Amount).sum(), "total")
        .filter(expense::Column::UserId.eq(user_id))
        .filter(expense::Column::Date.gte(start))
        .filter(expense::Column::Date.lt(end))
        .into_tuple()
        .one(db)
        .await?
        .flatten();

    Ok((income.unwrap_or(0.0), expenses.unwrap_or(0.0)))
}

/// Summarizes the trailing `months_back` calendar months (current month
/// included), oldest first.
pub async fn monthly_summary(
    db: &sea_orm::DatabaseConnection,
    user_id: &str,
    months_back: u32,
) -> Result<Vec<MonthSummary>> {
    let now = Utc::now();
    let mut month = now.month();
    let mut year = now.year();

    let mut months = Vec::with_capacity(months_back as usize);
    for _ in 0..months_back {
        let (start, _) = month_range(month, year)?;
        let (income, expenses) = sum_for_month(db, user_id, month, year).await?;
        months.push(MonthSummary {
            month,
            year,
            label: start.format("%b %Y").to_string(),
            income,
            expenses,
            net: income - expenses,
        });

        if month == 1 {
            month = 12;
            year -= 1;
        } else {
            month -= 1;
        }
    }

    months.reverse();
    Ok(months)
}
