//! Application configuration loading.
//!
//! Non-secret settings (public URL, mail sender, credential lifetimes) can be
//! provided in an optional `moneyglow.toml`; environment variables override
//! the file, and secrets (`JWT_SECRET`) are only ever read from the
//! environment. The composition root calls [`AppConfig::load`] once at
//! startup and hands the result to the core.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default lifetime of a magic link, in minutes.
pub const DEFAULT_MAGIC_LINK_TTL_MINUTES: i64 = 15;

/// Default lifetime of a session credential, in days.
pub const DEFAULT_SESSION_TTL_DAYS: i64 = 7;

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Public base URL used to build verification links (no trailing slash)
    pub app_url: String,
    /// Secret for signing session credentials, at least 32 bytes
    pub jwt_secret: String,
    /// From-address for outbound mail
    pub mail_sender: String,
    /// Magic-link lifetime in minutes
    pub magic_link_ttl_minutes: i64,
    /// Session lifetime in days
    pub session_ttl_days: i64,
}

/// Optional settings file (`moneyglow.toml`) - every field may be omitted.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    app_url: Option<String>,
    mail_sender: Option<String>,
    magic_link_ttl_minutes: Option<i64>,
    session_ttl_days: Option<i64>,
}

fn load_file_config<P: AsRef<Path>>(path: P) -> Result<FileConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse moneyglow.toml: {e}"),
    })
}

impl AppConfig {
    /// Loads configuration from `moneyglow.toml` (if present) and the
    /// environment, with the environment taking precedence.
    ///
    /// Also attempts to load a `.env` file first so local development can
    /// keep secrets out of the shell profile.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `JWT_SECRET` is missing or too short,
    /// or if an existing `moneyglow.toml` fails to parse.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::load_from("moneyglow.toml")
    }

    /// Same as [`AppConfig::load`] but with an explicit settings-file path.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = if path.as_ref().exists() {
            load_file_config(path)?
        } else {
            FileConfig::default()
        };

        let jwt_secret = std::env::var("JWT_SECRET").map_err(|_| Error::Config {
            message: "JWT_SECRET is not set".to_string(),
        })?;
        if jwt_secret.len() < 32 {
            return Err(Error::Config {
                message: "JWT_SECRET must be at least 32 bytes".to_string(),
            });
        }

        let app_url = std::env::var("APP_URL")
            .ok()
            .or(file.app_url)
            .unwrap_or_else(|| "http://localhost:3000".to_string());

        let mail_sender = std::env::var("MAIL_SENDER")
            .ok()
            .or(file.mail_sender)
            .unwrap_or_else(|| "hello@moneyglow.ph".to_string());

        let magic_link_ttl_minutes = std::env::var("MAGIC_LINK_TTL_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(file.magic_link_ttl_minutes)
            .unwrap_or(DEFAULT_MAGIC_LINK_TTL_MINUTES);

        let session_ttl_days = std::env::var("SESSION_TTL_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(file.session_ttl_days)
            .unwrap_or(DEFAULT_SESSION_TTL_DAYS);

        Ok(Self {
            app_url: app_url.trim_end_matches('/').to_string(),
            jwt_secret,
            mail_sender,
            magic_link_ttl_minutes,
            session_ttl_days,
        })
    }
}
