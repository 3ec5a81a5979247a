//! Transactional email boundary.
//!
//! Implement [`Mailer`] to integrate with a real delivery service (Mailjet,
//! SES, SMTP, ...). The library itself only builds message bodies and calls
//! `send`.

use crate::errors::Result;
use async_trait::async_trait;

/// Trait for sending transactional email.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send an email.
    ///
    /// - `to`: recipient email address
    /// - `subject`: email subject line
    /// - `html`: HTML body
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<()>;
}

/// Development mailer that logs messages instead of delivering them.
pub struct ConsoleMailer;

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send(&self, to: &str, subject: &str, _html: &str) -> Result<()> {
        tracing::info!(to, subject, "mail (console mailer, not delivered)");
        Ok(())
    }
}

/// Builds the magic-link login email.
///
/// The URL embeds the single-use token: `{app_url}/verify?token={token}`.
/// Returns `(subject, html_body)`.
pub fn magic_link_email(app_url: &str, token: &str, ttl_minutes: i64) -> (String, String) {
    let magic_url = format!("{app_url}/verify?token={token}");
    let subject = "Your MoneyGlow Login Link".to_string();
    let html = format!(
        r##"<div style="font-family: 'Segoe UI', sans-serif; max-width: 480px; margin: 0 auto; padding: 32px; background: #0D0D0D; color: #F5F5F5;">
  <h1 style="font-size: 24px; color: #FF6B9D; margin-bottom: 8px;">MoneyGlow</h1>
  <p style="color: #999; font-size: 13px; margin-top: 0;">Your Financial Glow-Up Starts Here</p>
  <hr style="border: none; border-top: 1px solid #2A2A2A; margin: 24px 0;" />
  <p style="font-size: 15px; line-height: 1.6;">Click the button below to sign in to your MoneyGlow account:</p>
  <a href="{magic_url}" style="display: inline-block; background: #FF6B9D; color: white; padding: 14px 28px; border-radius: 12px; text-decoration: none; font-weight: 600; margin: 16px 0; font-size: 15px;">
    Sign In to MoneyGlow
  </a>
  <p style="color: #666; font-size: 13px; margin-top: 24px;">This link expires in {ttl_minutes} minutes. If you didn't request this, you can safely ignore this email.</p>
</div>"##
    );
    (subject, html)
}

/// Builds the post-onboarding welcome email. Returns `(subject, html_body)`.
pub fn welcome_email(name: &str) -> (String, String) {
    let subject = "Welcome to MoneyGlow!".to_string();
    let html = format!(
        r##"<div style="font-family: 'Segoe UI', sans-serif; max-width: 480px; margin: 0 auto; padding: 32px; background: #0D0D0D; color: #F5F5F5;">
  <h1 style="font-size: 24px; color: #FF6B9D; margin-bottom: 8px;">Welcome, {name}!</h1>
  <p style="font-size: 15px; line-height: 1.6;">Your financial glow-up starts now. Log your first income entry, set a 50/30/20 budget, and keep your streak alive to earn XP and badges.</p>
</div>"##
    );
    (subject, html)
}
