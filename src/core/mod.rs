//! Core business logic - framework-agnostic operations consumed by the
//! HTTP routing layer. Everything here takes a `DatabaseConnection` (and,
//! where needed, an injected collaborator) and returns structured data.

/// Admin aggregate statistics and per-user detail views
pub mod admin;
/// Daily advice caching, XP, and streak orchestration
pub mod advice;
/// Badge catalog and earned-state evaluation
pub mod badges;
/// 50/30/20 snapshots, monthly budgets, and the monthly overview
pub mod budget;
/// Expense logging and monthly listings
pub mod expense;
/// Thumbs feedback submissions
pub mod feedback;
/// Glow score calculation and label bands
pub mod glow;
/// Income entry logging and listings
pub mod income;
/// Per-month income/expense trend summaries
pub mod insights;
/// XP actions, the level table, and the award path
pub mod levels;
/// Magic-link issuance and single-use consumption
pub mod magic_link;
/// Money-personality quiz completion
pub mod quiz;
/// Signed session codec, auth guards, and cookie helpers
pub mod session;
/// Composed per-user gamification summary
pub mod stats;
/// Consecutive-day streak tracking
pub mod streak;
/// Tax estimator and compound-interest projection
pub mod tax;
/// Account creation, onboarding, and profile edits
pub mod users;
