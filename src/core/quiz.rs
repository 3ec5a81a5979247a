//! Money-personality quiz business logic.
//!
//! The quiz itself runs client-side; this module records the outcome,
//! generates the personalized 30-day challenge through the injected
//! provider, and grants the completion XP. The stored `quiz_result` is what
//! the `self_aware` badge and the advice personalization read.

use crate::{
    core::levels::{XpAction, award_xp},
    entities::user,
    errors::{Error, Result},
    providers::{AdviceProvider, UserContext},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, Set};

/// The four quiz personalities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizResult {
    /// Spends first, thinks later
    Yolo,
    /// Relaxed, saves when convenient
    Chill,
    /// Budgets and tracks deliberately
    Plan,
    /// Optimizes everything
    Master,
}

impl QuizResult {
    /// Canonical stored string for this personality.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yolo => "YOLO",
            Self::Chill => "CHILL",
            Self::Plan => "PLAN",
            Self::Master => "MASTER",
        }
    }

    /// Parses a stored/submitted personality string.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "YOLO" => Ok(Self::Yolo),
            "CHILL" => Ok(Self::Chill),
            "PLAN" => Ok(Self::Plan),
            "MASTER" => Ok(Self::Master),
            other => Err(Error::Validation {
                message: format!("Invalid quiz result: {other}"),
            }),
        }
    }
}

/// Outcome of completing the quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizCompletion {
    /// The recorded personality
    pub result: QuizResult,
    /// The generated 30-day challenge text
    pub challenge: String,
}

/// Records a quiz result, generates the challenge, and awards the XP.
pub async fn complete_quiz(
    db: &sea_orm::DatabaseConnection,
    provider: &dyn AdviceProvider,
    user_id: &str,
    result: QuizResult,
) -> Result<QuizCompletion> {
    let user = crate::core::users::get_user(db, user_id).await?;

    let challenge = provider
        .quiz_challenge(&UserContext::from_user(&user), result.as_str())
        .await?;

    let mut active: user::ActiveModel = user.into();
    active.quiz_result = Set(Some(result.as_str().to_string()));
    active.quiz_challenge = Set(Some(challenge.clone()));
    active.updated_at = Set(Utc::now());
    active.update(db).await?;

    award_xp(db, user_id, XpAction::CompleteQuiz).await?;

    Ok(QuizCompletion { result, challenge })
}
