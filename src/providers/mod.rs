//! External collaborator boundaries.
//!
//! The core never talks to a mail service or a text-generation service
//! directly; it goes through the traits defined here. The composition root
//! constructs one concrete instance of each at startup and passes them in
//! (no process-wide singletons).

/// Advice/challenge generation boundary
pub mod advice;
/// Transactional email boundary
pub mod mailer;

pub use advice::{AdviceProvider, TopicAdviceProvider, UserContext};
pub use mailer::{ConsoleMailer, Mailer};
