//! Genre model and DTOs.

use moviehunt_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `genres` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Genre {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub tmdb_genre_id: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateGenre {
    pub name: String,
    /// Derived from `name` when omitted.
    pub slug: Option<String>,
    pub tmdb_genre_id: Option<i32>,
}

/// DTO for replacing the genres of a film.
#[derive(Debug, Clone, Deserialize)]
pub struct SetFilmGenres {
    pub genre_ids: Vec<DbId>,
}
