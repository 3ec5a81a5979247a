//! Session credential business logic.
//!
//! Sessions are stateless: a signed token carrying `{user_id, email}` and
//! its own expiry, verified without a server-side lookup. There is no
//! revocation list - logging out is cookie deletion on the client. The admin
//! flag is deliberately NOT embedded in the token; [`SessionCodec::require_admin`]
//! re-reads it from storage so revocation takes effect on the next request.

use crate::{
    config::app::AppConfig,
    errors::{Error, Result},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Name of the HTTP cookie carrying the session token.
pub const COOKIE_NAME: &str = "moneyglow_session";

/// The authenticated identity asserted by a session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPayload {
    /// Id of the signed-in user
    pub user_id: String,
    /// Email at sign-in time
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies session tokens with a server-held secret (HS256).
pub struct SessionCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SessionCodec {
    /// Builds a codec from a raw secret and a session lifetime in days.
    #[must_use]
    pub fn new(secret: &str, ttl_days: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::days(ttl_days),
        }
    }

    /// Builds a codec from the loaded application configuration.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.jwt_secret, config.session_ttl_days)
    }

    /// Issues a signed token for `payload` with the configured expiry.
    pub fn create_session(&self, payload: &SessionPayload) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: payload.user_id.clone(),
            email: payload.email.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(Into::into)
    }

    /// Verifies a token. Signature or expiry failure yields `None` - this
    /// never surfaces an error to callers.
    #[must_use]
    pub fn verify_session(&self, token: &str) -> Option<SessionPayload> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let data = decode::<Claims>(token, &self.decoding, &validation).ok()?;
        Some(SessionPayload {
            user_id: data.claims.sub,
            email: data.claims.email,
        })
    }

    /// Fails with [`Error::Unauthorized`] unless a valid session is present.
    pub fn require_auth(&self, token: Option<&str>) -> Result<SessionPayload> {
        token
            .and_then(|t| self.verify_session(t))
            .ok_or(Error::Unauthorized)
    }

    /// Like [`SessionCodec::require_auth`], but additionally fails with
    /// [`Error::Forbidden`] unless the session's user currently holds the
    /// admin flag in storage.
    pub async fn require_admin(
        &self,
        db: &sea_orm::DatabaseConnection,
        token: Option<&str>,
    ) -> Result<SessionPayload> {
        let session = self.require_auth(token)?;
        let user = crate::core::users::get_user(db, &session.user_id).await?;
        if !user.is_admin {
            return Err(Error::Forbidden);
        }
        Ok(session)
    }
}

/// Builds the `Set-Cookie` header value installing a session token.
#[must_use]
pub fn set_session_cookie(token: &str, ttl_days: i64) -> String {
    let max_age = ttl_days * 24 * 60 * 60;
    format!("{COOKIE_NAME}={token}; HttpOnly; Path=/; Max-Age={max_age}; SameSite=Lax")
}

/// Builds the `Set-Cookie` header value clearing the session.
#[must_use]
pub fn clear_session_cookie() -> String {
    format!("{COOKIE_NAME}=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{create_test_user, set_admin, setup_test_db, test_codec};

    fn sample_payload() -> SessionPayload {
        SessionPayload {
            user_id: "user-1".to_string(),
            email: "ana@example.ph".to_string(),
        }
    }

    #[test]
    fn test_create_and_verify_round_trip() {
        let codec = test_codec();
        let token = codec.create_session(&sample_payload()).unwrap();

        let verified = codec.verify_session(&token).unwrap();
        assert_eq!(verified, sample_payload());
    }

    #[test]
    fn test_verify_rejects_tampered_token() {
        let codec = test_codec();
        let token = codec.create_session(&sample_payload()).unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        assert!(codec.verify_session(&tampered).is_none());

        // Token signed with a different secret fails too
        let other = SessionCodec::new("another-secret-also-32-bytes-long!!", 7);
        assert!(other.verify_session(&token).is_none());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        // Negative TTL puts the embedded expiry in the past
        let expired = SessionCodec::new("0123456789abcdef0123456789abcdef", -1);
        let token = expired.create_session(&sample_payload()).unwrap();
        assert!(expired.verify_session(&token).is_none());
    }

    #[test]
    fn test_require_auth_distinguishes_unauthorized() {
        let codec = test_codec();

        let result = codec.require_auth(None);
        assert!(matches!(result, Err(Error::Unauthorized)));

        let result = codec.require_auth(Some("garbage"));
        assert!(matches!(result, Err(Error::Unauthorized)));

        let token = codec.create_session(&sample_payload()).unwrap();
        assert!(codec.require_auth(Some(&token)).is_ok());
    }

    #[tokio::test]
    async fn test_require_admin_forbidden_for_regular_user() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "ana@example.ph").await?;
        let codec = test_codec();
        let token = codec.create_session(&SessionPayload {
            user_id: user.id.clone(),
            email: user.email.clone(),
        })?;

        let result = codec.require_admin(&db, Some(&token)).await;
        assert!(matches!(result, Err(Error::Forbidden)));

        // Promote and the same token now passes
        set_admin(&db, &user.id, true).await?;
        assert!(codec.require_admin(&db, Some(&token)).await.is_ok());

        Ok(())
    }

    #[tokio::test]
    async fn test_require_admin_revocation_is_immediate() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "ana@example.ph").await?;
        set_admin(&db, &user.id, true).await?;

        let codec = test_codec();
        let token = codec.create_session(&SessionPayload {
            user_id: user.id.clone(),
            email: user.email.clone(),
        })?;
        assert!(codec.require_admin(&db, Some(&token)).await.is_ok());

        // The flag lives in storage, not the token: revoking takes effect
        // on the very next call with the same still-valid token
        set_admin(&db, &user.id, false).await?;
        let result = codec.require_admin(&db, Some(&token)).await;
        assert!(matches!(result, Err(Error::Forbidden)));

        Ok(())
    }

    #[test]
    fn test_cookie_helpers() {
        let set = set_session_cookie("tok123", 7);
        assert!(set.starts_with("moneyglow_session=tok123;"));
        assert!(set.contains("HttpOnly"));
        assert!(set.contains("Max-Age=604800"));
        assert!(set.contains("SameSite=Lax"));

        let clear = clear_session_cookie();
        assert!(clear.contains("Max-Age=0"));
    }
}
