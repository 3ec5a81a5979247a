//! User account and profile business logic.
//!
//! Handles find-or-create by email (the entry point of the passwordless
//! flow), onboarding completion, and profile edits. All inputs are validated
//! here so the storage layer only ever sees well-formed rows.

use crate::{
    entities::{User, user},
    errors::{Error, Result},
    providers::{Mailer, mailer},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

/// Accepted financial goal values.
pub const FINANCIAL_GOALS: [&str; 5] = [
    "SAVE_EMERGENCY_FUND",
    "PAY_OFF_DEBT",
    "START_INVESTING",
    "BUDGET_BETTER",
    "GROW_CREATOR_INCOME",
];

/// Accepted employment status values.
pub const EMPLOYMENT_STATUSES: [&str; 4] = [
    "FULL_TIME_CREATOR",
    "STUDENT",
    "PART_TIME_PLUS_CREATOR",
    "EMPLOYED_PLUS_SIDE_HUSTLE",
];

/// Accepted emergency-fund status values.
pub const FUND_STATUSES: [&str; 3] = ["YES", "NO", "BUILDING"];

/// Accepted debt situation values.
pub const DEBT_SITUATIONS: [&str; 4] = ["NONE", "STUDENT_LOAN", "CREDIT_CARD", "INFORMAL_DEBT"];

/// Accepted language preference values.
pub const LANGUAGES: [&str; 2] = ["ENGLISH", "TAGLISH"];

/// Onboarding payload - everything required to complete a profile.
#[derive(Debug, Clone)]
pub struct OnboardingData {
    /// Display name (1-100 chars)
    pub name: String,
    /// Age in years (13-100)
    pub age: i32,
    /// At least one income source label
    pub income_sources: Vec<String>,
    /// Non-negative monthly income estimate
    pub monthly_income: f64,
    /// One of [`FINANCIAL_GOALS`]
    pub financial_goal: String,
    /// One of [`EMPLOYMENT_STATUSES`], if provided
    pub employment_status: Option<String>,
    /// One of [`FUND_STATUSES`], if provided
    pub has_emergency_fund: Option<String>,
    /// One of [`DEBT_SITUATIONS`], if provided
    pub debt_situation: Option<String>,
    /// One of [`LANGUAGES`]
    pub language_pref: String,
}

/// Partial profile edit - `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// New display name
    pub name: Option<String>,
    /// New age
    pub age: Option<i32>,
    /// New income source list
    pub income_sources: Option<Vec<String>>,
    /// New monthly income estimate
    pub monthly_income: Option<f64>,
    /// New financial goal
    pub financial_goal: Option<String>,
    /// New employment status
    pub employment_status: Option<String>,
    /// New emergency-fund status
    pub has_emergency_fund: Option<String>,
    /// New debt situation
    pub debt_situation: Option<String>,
    /// New language preference
    pub language_pref: Option<String>,
}

/// Normalizes and validates an email address.
///
/// Accepts anything of the shape `local@domain.tld`; the mail service is the
/// real authority, this only rejects obvious garbage before a row is created.
pub fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    };
    if !valid {
        return Err(Error::Validation {
            message: "Please enter a valid email address".to_string(),
        });
    }
    Ok(email)
}

fn validate_choice(value: &str, allowed: &[&str], field: &str) -> Result<()> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(Error::Validation {
            message: format!("Invalid {field}: {value}"),
        })
    }
}

fn validate_onboarding(data: &OnboardingData) -> Result<()> {
    if data.name.trim().is_empty() || data.name.len() > 100 {
        return Err(Error::Validation {
            message: "Name is required".to_string(),
        });
    }
    if !(13..=100).contains(&data.age) {
        return Err(Error::Validation {
            message: "Age must be between 13 and 100".to_string(),
        });
    }
    if data.income_sources.is_empty() {
        return Err(Error::Validation {
            message: "Select at least one income source".to_string(),
        });
    }
    if data.monthly_income < 0.0 || !data.monthly_income.is_finite() {
        return Err(Error::Validation {
            message: "Monthly income must be non-negative".to_string(),
        });
    }
    validate_choice(&data.financial_goal, &FINANCIAL_GOALS, "financial goal")?;
    if let Some(status) = &data.employment_status {
        validate_choice(status, &EMPLOYMENT_STATUSES, "employment status")?;
    }
    if let Some(fund) = &data.has_emergency_fund {
        validate_choice(fund, &FUND_STATUSES, "emergency fund status")?;
    }
    if let Some(debt) = &data.debt_situation {
        validate_choice(debt, &DEBT_SITUATIONS, "debt situation")?;
    }
    validate_choice(&data.language_pref, &LANGUAGES, "language preference")
}

fn encode_sources(sources: &[String]) -> String {
    serde_json::to_string(sources).unwrap_or_else(|_| "[]".to_string())
}

/// Finds the user owning `email`, creating a fresh un-onboarded account if
/// this is the first time the address is seen.
pub async fn find_or_create_by_email(
    db: &sea_orm::DatabaseConnection,
    email: &str,
) -> Result<user::Model> {
    let email = normalize_email(email)?;

    if let Some(existing) = User::find()
        .filter(user::Column::Email.eq(&email))
        .one(db)
        .await?
    {
        return Ok(existing);
    }

    let now = Utc::now();
    let new_user = user::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        email: Set(email.clone()),
        name: Set(None),
        age: Set(None),
        income_sources: Set("[]".to_string()),
        monthly_income: Set(None),
        financial_goal: Set(None),
        employment_status: Set(None),
        has_emergency_fund: Set(None),
        debt_situation: Set(None),
        language_pref: Set("ENGLISH".to_string()),
        quiz_result: Set(None),
        quiz_challenge: Set(None),
        onboarded: Set(false),
        is_admin: Set(false),
        xp: Set(0),
        level: Set(1),
        streak_count: Set(0),
        longest_streak: Set(0),
        last_check_in: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = new_user.insert(db).await?;
    tracing::info!(user_id = %created.id, "created new user account");
    Ok(created)
}

/// Fetches a user by id, failing with [`Error::UserNotFound`] if absent.
pub async fn get_user(db: &sea_orm::DatabaseConnection, user_id: &str) -> Result<user::Model> {
    User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::UserNotFound {
            id: user_id.to_string(),
        })
}

/// Completes onboarding: persists the profile block, flips `onboarded`, and
/// sends a welcome email best-effort. Mail failure is logged and swallowed -
/// onboarding must never be blocked by a non-critical notification.
pub async fn complete_onboarding(
    db: &sea_orm::DatabaseConnection,
    mail: &dyn Mailer,
    user_id: &str,
    data: OnboardingData,
) -> Result<user::Model> {
    validate_onboarding(&data)?;

    let user = get_user(db, user_id).await?;
    let email = user.email.clone();

    let mut active: user::ActiveModel = user.into();
    active.name = Set(Some(data.name.trim().to_string()));
    active.age = Set(Some(data.age));
    active.income_sources = Set(encode_sources(&data.income_sources));
    active.monthly_income = Set(Some(data.monthly_income));
    active.financial_goal = Set(Some(data.financial_goal));
    active.employment_status = Set(data.employment_status);
    active.has_emergency_fund = Set(data.has_emergency_fund);
    active.debt_situation = Set(data.debt_situation);
    active.language_pref = Set(data.language_pref);
    active.onboarded = Set(true);
    active.updated_at = Set(Utc::now());
    let updated = active.update(db).await?;

    let (subject, html) = mailer::welcome_email(updated.name.as_deref().unwrap_or("Friend"));
    if let Err(e) = mail.send(&email, &subject, &html).await {
        tracing::warn!(user_id, error = %e, "welcome email failed, continuing");
    }

    Ok(updated)
}

/// Applies a partial profile edit. Every provided field is re-validated with
/// the onboarding rules.
pub async fn update_profile(
    db: &sea_orm::DatabaseConnection,
    user_id: &str,
    update: ProfileUpdate,
) -> Result<user::Model> {
    if let Some(name) = &update.name {
        if name.trim().is_empty() || name.len() > 100 {
            return Err(Error::Validation {
                message: "Name is required".to_string(),
            });
        }
    }
    if let Some(age) = update.age {
        if !(13..=100).contains(&age) {
            return Err(Error::Validation {
                message: "Age must be between 13 and 100".to_string(),
            });
        }
    }
    if let Some(income) = update.monthly_income {
        if income < 0.0 || !income.is_finite() {
            return Err(Error::Validation {
                message: "Monthly income must be non-negative".to_string(),
            });
        }
    }
    if let Some(goal) = &update.financial_goal {
        validate_choice(goal, &FINANCIAL_GOALS, "financial goal")?;
    }
    if let Some(status) = &update.employment_status {
        validate_choice(status, &EMPLOYMENT_STATUSES, "employment status")?;
    }
    if let Some(fund) = &update.has_emergency_fund {
        validate_choice(fund, &FUND_STATUSES, "emergency fund status")?;
    }
    if let Some(debt) = &update.debt_situation {
        validate_choice(debt, &DEBT_SITUATIONS, "debt situation")?;
    }
    if let Some(lang) = &update.language_pref {
        validate_choice(lang, &LANGUAGES, "language preference")?;
    }

    let user = get_user(db, user_id).await?;
    let mut active: user::ActiveModel = user.into();
    if let Some(name) = update.name {
        active.name = Set(Some(name.trim().to_string()));
    }
    if let Some(age) = update.age {
        active.age = Set(Some(age));
    }
    if let Some(sources) = update.income_sources {
        active.income_sources = Set(encode_sources(&sources));
    }
    if let Some(income) = update.monthly_income {
        active.monthly_income = Set(Some(income));
    }
    if let Some(goal) = update.financial_goal {
        active.financial_goal = Set(Some(goal));
    }
    if let Some(status) = update.employment_status {
        active.employment_status = Set(Some(status));
    }
    if let Some(fund) = update.has_emergency_fund {
        active.has_emergency_fund = Set(Some(fund));
    }
    if let Some(debt) = update.debt_situation {
        active.debt_situation = Set(Some(debt));
    }
    if let Some(lang) = update.language_pref {
        active.language_pref = Set(lang);
    }
    active.updated_at = Set(Utc::now());

    active.update(db).await.map_err(Into::into)
}
