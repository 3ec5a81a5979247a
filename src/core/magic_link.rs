//! Magic-link issuance and consumption - the passwordless login flow.
//!
//! State machine per link: Issued -> Consumed (terminal) or Issued ->
//! Expired (terminal). Consumption is a conditional update whose
//! `rows_affected` is the sole arbiter between racing verifications: the
//! loser is rejected as already used and never issued a session. Marking
//! used happens strictly before session issuance, so a crash in between can
//! waste a link but never let it succeed twice.

use crate::{
    config::app::AppConfig,
    core::session::{SessionCodec, SessionPayload},
    entities::{MagicLink, magic_link},
    errors::{Error, Result},
    providers::{Mailer, mailer},
};
use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, sea_query::Expr,
};
use uuid::Uuid;

/// Result of a successful magic-link verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    /// Freshly signed session token for the link's owner
    pub session_token: String,
    /// Where the client should land: `/onboarding` or `/dashboard`
    pub redirect_to: String,
    /// Id of the signed-in user
    pub user_id: String,
}

/// Issues a magic link for `email` and dispatches the login email.
///
/// First-time addresses get a fresh un-onboarded account. The link row is
/// persisted before the send; if the mail dispatch fails the error
/// propagates but the row is left intact (the user retries the whole flow).
pub async fn issue(
    db: &sea_orm::DatabaseConnection,
    mail: &dyn Mailer,
    config: &AppConfig,
    email: &str,
) -> Result<magic_link::Model> {
    let user = crate::core::users::find_or_create_by_email(db, email).await?;

    let now = Utc::now();
    let link = magic_link::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        token: Set(Uuid::new_v4().to_string()),
        user_id: Set(user.id.clone()),
        expires_at: Set(now + Duration::minutes(config.magic_link_ttl_minutes)),
        used_at: Set(None),
        created_at: Set(now),
    };
    let link = link.insert(db).await?;

    let (subject, html) =
        mailer::magic_link_email(&config.app_url, &link.token, config.magic_link_ttl_minutes);
    mail.send(&user.email, &subject, &html).await?;

    tracing::info!(user_id = %user.id, "magic link issued");
    Ok(link)
}

/// Verifies and consumes a magic-link token, exchanging it for a session.
///
/// Rejections are distinct and terminal for the token: unknown tokens are
/// [`Error::LinkInvalid`], consumed ones [`Error::LinkAlreadyUsed`], and
/// stale ones [`Error::LinkExpired`].
pub async fn verify(
    db: &sea_orm::DatabaseConnection,
    codec: &SessionCodec,
    token: &str,
) -> Result<LoginOutcome> {
    let link = MagicLink::find()
        .filter(magic_link::Column::Token.eq(token))
        .one(db)
        .await?
        .ok_or(Error::LinkInvalid)?;

    if link.used_at.is_some() {
        return Err(Error::LinkAlreadyUsed);
    }

    let now = Utc::now();
    if now > link.expires_at {
        return Err(Error::LinkExpired);
    }

    // Conditional consumption: only one concurrent verification can flip
    // used_at from null, and only the winner proceeds to a session.
    let marked = MagicLink::update_many()
        .col_expr(magic_link::Column::UsedAt, Expr::value(now))
        .filter(magic_link::Column::Id.eq(&link.id))
        .filter(magic_link::Column::UsedAt.is_null())
        .exec(db)
        .await?;
    if marked.rows_affected == 0 {
        return Err(Error::LinkAlreadyUsed);
    }

    let user = crate::core::users::get_user(db, &link.user_id).await?;
    let session_token = codec.create_session(&SessionPayload {
        user_id: user.id.clone(),
        email: user.email.clone(),
    })?;

    let redirect_to = if user.onboarded {
        "/dashboard".to_string()
    } else {
        "/onboarding".to_string()
    };

    tracing::info!(user_id = %user.id, "magic link consumed");
    Ok(LoginOutcome {
        session_token,
        redirect_to,
        user_id: user.id,
    })
}

/// Deletes links past their expiry. Nothing in the crate schedules this -
/// it exists for operators to run from a cron job.
pub async fn purge_expired(db: &sea_orm::DatabaseConnection) -> Result<u64> {
    let deleted = MagicLink::delete_many()
        .filter(magic_link::Column::ExpiresAt.lt(Utc::now()))
        .exec(db)
        .await?;
    Ok(deleted.rows_affected)
}
