//! The resource aggregate root and its directly attached text rows.

use chrono::NaiveDate;
use mde_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from `resources`, joined with its rights, resource type and language.
#[derive(Debug, Clone, FromRow)]
pub struct ResourceDetail {
    pub id: DbId,
    pub doi: Option<String>,
    pub version: Option<String>,
    pub year: i32,
    pub date_created: NaiveDate,
    pub date_embargo_until: Option<NaiveDate>,
    pub rights_text: String,
    pub rights_identifier: Option<String>,
    pub rights_uri: Option<String>,
    pub resource_type_general: String,
    pub resource_type_description: Option<String>,
    pub language_code: String,
    pub language_name: String,
    pub updated_at: Timestamp,
}

/// A title with its resolved title type (Main, Alternative, Translated, ...).
#[derive(Debug, Clone, FromRow)]
pub struct Title {
    pub id: DbId,
    pub text: String,
    pub title_type: String,
}

/// A typed free-text description (Abstract, Methods, Other, ...).
#[derive(Debug, Clone, FromRow)]
pub struct Description {
    pub id: DbId,
    pub description_type: String,
    pub description: String,
}
