//! Advice-generation boundary.
//!
//! The production implementation wraps a text-generation API; the core only
//! sees [`AdviceProvider`]. [`TopicAdviceProvider`] is a deterministic dev
//! implementation that rotates through a fixed financial-literacy topic
//! list, so the full advice flow (caching, XP, streak) works offline.

use crate::entities::user;
use crate::errors::Result;
use async_trait::async_trait;
use chrono::{Datelike, Utc};

/// Profile snapshot handed to the provider for personalization.
#[derive(Debug, Clone)]
pub struct UserContext {
    /// Display name, if onboarded
    pub name: Option<String>,
    /// Age in years
    pub age: Option<i32>,
    /// Income source labels
    pub income_sources: Vec<String>,
    /// Self-reported monthly income in pesos
    pub monthly_income: Option<f64>,
    /// Primary financial goal
    pub financial_goal: Option<String>,
    /// Money-personality quiz result, if taken
    pub quiz_result: Option<String>,
    /// `"ENGLISH"` or `"TAGLISH"`
    pub language_pref: String,
}

impl UserContext {
    /// Builds a context from a stored user row. The `income_sources` column
    /// holds a JSON array; anything unparseable degrades to an empty list.
    pub fn from_user(user: &user::Model) -> Self {
        let income_sources: Vec<String> =
            serde_json::from_str(&user.income_sources).unwrap_or_default();
        Self {
            name: user.name.clone(),
            age: user.age,
            income_sources,
            monthly_income: user.monthly_income,
            financial_goal: user.financial_goal.clone(),
            quiz_result: user.quiz_result.clone(),
            language_pref: user.language_pref.clone(),
        }
    }
}

/// Trait for generating personalized advice and challenges.
#[async_trait]
pub trait AdviceProvider: Send + Sync {
    /// One day's worth of financial advice for this user.
    async fn daily_advice(&self, user: &UserContext) -> Result<String>;

    /// A 30-day money challenge tailored to a quiz personality
    /// (`"YOLO"`, `"CHILL"`, `"PLAN"`, or `"MASTER"`).
    async fn quiz_challenge(&self, user: &UserContext, personality: &str) -> Result<String>;
}

/// Rotating topics for the offline advice provider.
const ADVICE_TOPICS: [&str; 10] = [
    "budgeting tips for irregular income",
    "saving strategies for young Filipinos",
    "avoiding online scams and fraud",
    "basic tax tips for content creators",
    "building an emergency fund",
    "smart use of digital banks",
    "tracking and growing creator income",
    "the power of compound interest",
    "needs vs wants",
    "automating your savings",
];

/// Deterministic dev provider: picks a topic by day of year.
pub struct TopicAdviceProvider;

#[async_trait]
impl AdviceProvider for TopicAdviceProvider {
    async fn daily_advice(&self, user: &UserContext) -> Result<String> {
        let idx = Utc::now().ordinal0() as usize % ADVICE_TOPICS.len();
        let topic = ADVICE_TOPICS[idx];
        let name = user.name.as_deref().unwrap_or("Friend");
        Ok(format!(
            "Hey {name}! Today's focus: {topic}. Small consistent steps beat big one-time moves - pick one thing you can do in the next 10 minutes."
        ))
    }

    async fn quiz_challenge(&self, user: &UserContext, personality: &str) -> Result<String> {
        let name = user.name.as_deref().unwrap_or("Friend");
        Ok(format!(
            "# 30-Day Money Challenge for {name} ({personality})\n\n\
             Week 1: track every peso in and out.\n\
             Week 2: set your 50/30/20 budget and stick to the needs bucket.\n\
             Week 3: automate one transfer to savings.\n\
             Week 4: review the month and set next month's goal."
        ))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn sample_context() -> UserContext {
        UserContext {
            name: Some("Ana".to_string()),
            age: Some(21),
            income_sources: vec!["TikTok".to_string()],
            monthly_income: Some(15000.0),
            financial_goal: Some("SAVE_EMERGENCY_FUND".to_string()),
            quiz_result: None,
            language_pref: "ENGLISH".to_string(),
        }
    }

    #[tokio::test]
    async fn test_topic_provider_mentions_user() {
        let provider = TopicAdviceProvider;
        let advice = provider.daily_advice(&sample_context()).await.unwrap();
        assert!(advice.contains("Ana"));
    }

    #[tokio::test]
    async fn test_quiz_challenge_mentions_personality() {
        let provider = TopicAdviceProvider;
        let challenge = provider
            .quiz_challenge(&sample_context(), "PLAN")
            .await
            .unwrap();
        assert!(challenge.contains("PLAN"));
        assert!(challenge.contains("Week 4"));
    }

    #[test]
    fn test_context_from_user_parses_sources() {
        let user = user::Model {
            id: "u1".to_string(),
            email: "a@b.ph".to_string(),
            name: None,
            age: None,
            income_sources: r#"["TikTok","GCash"]"#.to_string(),
            monthly_income: None,
            financial_goal: None,
            employment_status: None,
            has_emergency_fund: None,
            debt_situation: None,
            language_pref: "ENGLISH".to_string(),
            quiz_result: None,
            quiz_challenge: None,
            onboarded: false,
            is_admin: false,
            xp: 0,
            level: 1,
            streak_count: 0,
            longest_streak: 0,
            last_check_in: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let ctx = UserContext::from_user(&user);
        assert_eq!(ctx.income_sources, vec!["TikTok", "GCash"]);
    }

    #[test]
    fn test_context_tolerates_bad_sources_json() {
        let user = user::Model {
            id: "u1".to_string(),
            email: "a@b.ph".to_string(),
            name: None,
            age: None,
            income_sources: "not json".to_string(),
            monthly_income: None,
            financial_goal: None,
            employment_status: None,
            has_emergency_fund: None,
            debt_situation: None,
            language_pref: "ENGLISH".to_string(),
            quiz_result: None,
            quiz_challenge: None,
            onboarded: false,
            is_admin: false,
            xp: 0,
            level: 1,
            streak_count: 0,
            longest_streak: 0,
            last_check_in: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let ctx = UserContext::from_user(&user);
        assert!(ctx.income_sources.is_empty());
    }
}
