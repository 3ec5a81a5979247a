//! Unified error type for the `MoneyGlow` domain library.
//!
//! Every core operation returns [`Result`]. The routing layer maps these
//! variants onto transport status codes; the reason strings here are the
//! user-facing messages for auth and magic-link failures.

use thiserror::Error;

/// All failure modes surfaced by the domain layer.
#[derive(Debug, Error)]
pub enum Error {
    /// No session, or the presented session credential failed verification.
    #[error("Unauthorized")]
    Unauthorized,

    /// Valid session, but the user does not hold the admin flag.
    #[error("Forbidden")]
    Forbidden,

    /// Magic-link token not found.
    #[error("Invalid or expired link")]
    LinkInvalid,

    /// Magic-link token was already consumed once.
    #[error("This link has already been used")]
    LinkAlreadyUsed,

    /// Magic-link token is past its expiry.
    #[error("This link has expired")]
    LinkExpired,

    /// No user row for the given id.
    #[error("User not found: {id}")]
    UserNotFound {
        /// The id that failed to resolve
        id: String,
    },

    /// No row (or not owned by the caller) for the given id.
    #[error("Entry not found: {id}")]
    EntryNotFound {
        /// The id that failed to resolve
        id: String,
    },

    /// Rejected input (bad email, out-of-range age, unknown category, ...).
    #[error("Validation error: {message}")]
    Validation {
        /// What was wrong with the input
        message: String,
    },

    /// A monetary amount that is zero, negative, or non-finite.
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// Missing or malformed configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// The mail collaborator failed to dispatch.
    #[error("Mail error: {message}")]
    Mail {
        /// Description from the mail provider
        message: String,
    },

    /// The advice collaborator failed to generate.
    #[error("Provider error: {message}")]
    Provider {
        /// Description from the provider
        message: String,
    },

    /// Session token signing failure.
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Database error from the storage layer.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
