//! Film entity model and DTOs.

use moviehunt_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A full row from the `films` table, used on the film detail page.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Film {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub original_title: Option<String>,
    pub release_year: Option<i32>,
    pub director: Option<String>,
    pub synopsis: Option<String>,
    pub review: Option<String>,
    /// Editorial rating on a 0-10 scale.
    pub rating: Option<f64>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub trailer_url: Option<String>,
    pub tmdb_id: Option<i32>,
    pub imdb_id: Option<String>,
    pub runtime_minutes: Option<i32>,
    pub country: Option<String>,
    pub is_hidden_gem: bool,
    /// "Hunted by MovieHunt" editorial tag.
    pub is_hunted: bool,
    /// `None` while the review is a draft.
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Card-sized view of a film for listings. Leaves out the review body.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct FilmSummary {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub original_title: Option<String>,
    pub release_year: Option<i32>,
    pub director: Option<String>,
    pub synopsis: Option<String>,
    pub rating: Option<f64>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub is_hidden_gem: bool,
    pub is_hunted: bool,
    pub published_at: Option<Timestamp>,
}

/// DTO for creating a film review.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateFilm {
    pub title: String,
    /// Derived from title and year when omitted.
    pub slug: Option<String>,
    pub original_title: Option<String>,
    pub release_year: Option<i32>,
    pub director: Option<String>,
    pub synopsis: Option<String>,
    pub review: Option<String>,
    pub rating: Option<f64>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub trailer_url: Option<String>,
    pub tmdb_id: Option<i32>,
    pub imdb_id: Option<String>,
    pub runtime_minutes: Option<i32>,
    pub country: Option<String>,
    pub is_hidden_gem: Option<bool>,
    pub is_hunted: Option<bool>,
    pub published_at: Option<Timestamp>,
}

/// DTO for updating a film. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFilm {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub original_title: Option<String>,
    pub release_year: Option<i32>,
    pub director: Option<String>,
    pub synopsis: Option<String>,
    pub review: Option<String>,
    pub rating: Option<f64>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub trailer_url: Option<String>,
    pub imdb_id: Option<String>,
    pub runtime_minutes: Option<i32>,
    pub country: Option<String>,
}

/// DTO for changing the editorial tags of a film.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilmFlags {
    pub is_hidden_gem: Option<bool>,
    pub is_hunted: Option<bool>,
}
