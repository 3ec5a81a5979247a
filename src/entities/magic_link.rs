//! Magic-link entity - Single-use login credentials delivered by email.
//!
//! A link with non-null `used_at` must never grant a session again, and a
//! link past `expires_at` must never grant a session at all. Rows are
//! written once at issuance and mutated exactly once on consumption.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Magic-link database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "magic_links")]
pub struct Model {
    /// Unique identifier (UUIDv4 string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Opaque single-use token embedded in the emailed URL
    #[sea_orm(unique)]
    pub token: String,
    /// Owning user
    pub user_id: String,
    /// Absolute expiry, 15 minutes after issuance
    pub expires_at: DateTimeUtc,
    /// Consumption timestamp; null means unconsumed
    pub used_at: Option<DateTimeUtc>,
    /// When the link was issued
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `MagicLink` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each magic link belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
