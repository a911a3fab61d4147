//! Remarkable staff: the cast and crew a review singles out.

use moviehunt_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `remarkable_staff` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct RemarkableStaff {
    pub id: DbId,
    pub film_id: DbId,
    pub name: String,
    /// Free-form role, e.g. `"Director"` or `"Cinematographer"`.
    pub role: String,
    pub description: Option<String>,
    pub photo_url: Option<String>,
    pub tmdb_person_id: Option<i32>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateStaff {
    pub name: String,
    pub role: String,
    pub description: Option<String>,
    pub photo_url: Option<String>,
    pub tmdb_person_id: Option<i32>,
    pub sort_order: Option<i32>,
}
