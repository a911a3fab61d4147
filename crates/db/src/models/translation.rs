//! Per-language translations of a film's editorial text.

use moviehunt_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `film_translations` table.
///
/// Any field may be `None` when only part of the review has been translated.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct FilmTranslation {
    pub id: DbId,
    pub film_id: DbId,
    pub language_code: String,
    pub title: Option<String>,
    pub synopsis: Option<String>,
    pub review: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting or replacing a translation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpsertTranslation {
    pub title: Option<String>,
    pub synopsis: Option<String>,
    pub review: Option<String>,
}
