//! Feedback business logic - thumbs up/down with optional context.

use crate::{
    entities::feedback,
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, Set};
use uuid::Uuid;

/// Input for one feedback submission.
#[derive(Debug, Clone, Default)]
pub struct NewFeedback {
    /// -1 (down), 0 (neutral), or 1 (up)
    pub rating: i32,
    /// Optional free-form reason, up to 500 chars
    pub reason: Option<String>,
    /// What the feedback is about (e.g. "advice"), up to 50 chars
    pub context: Option<String>,
    /// Page it was submitted from, up to 100 chars
    pub page: Option<String>,
}

/// Persists one feedback row for the user.
pub async fn submit_feedback(
    db: &sea_orm::DatabaseConnection,
    user_id: &str,
    input: NewFeedback,
) -> Result<feedback::Model> {
    if !(-1..=1).contains(&input.rating) {
        return Err(Error::Validation {
            message: "Rating must be -1, 0, or 1".to_string(),
        });
    }
    if input.reason.as_ref().is_some_and(|r| r.len() > 500)
        || input.context.as_ref().is_some_and(|c| c.len() > 50)
        || input.page.as_ref().is_some_and(|p| p.len() > 100)
    {
        return Err(Error::Validation {
            message: "Feedback fields exceed length limits".to_string(),
        });
    }

    let row = feedback::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        user_id: Set(user_id.to_string()),
        rating: Set(input.rating),
        reason: Set(input.reason),
        context: Set(input.context),
        page: Set(input.page),
        created_at: Set(Utc::now()),
    };

    row.insert(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{create_test_user, setup_test_db};

    #[tokio::test]
    async fn test_submit_feedback() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "ana@example.ph").await?;

        let saved = submit_feedback(
            &db,
            &user.id,
            NewFeedback {
                rating: 1,
                reason: Some("love the streaks".to_string()),
                context: Some("advice".to_string()),
                page: Some("/dashboard".to_string()),
            },
        )
        .await?;

        assert_eq!(saved.rating, 1);
        assert_eq!(saved.context.as_deref(), Some("advice"));

        Ok(())
    }

    #[tokio::test]
    async fn test_rating_out_of_range() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "ana@example.ph").await?;

        let result = submit_feedback(
            &db,
            &user.id,
            NewFeedback {
                rating: 2,
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        Ok(())
    }
}
