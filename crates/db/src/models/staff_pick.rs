//! Staff picks: films hand-selected for the home page.

use moviehunt_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::film::FilmSummary;

/// A row from the `staff_picks` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct StaffPick {
    pub id: DbId,
    pub film_id: DbId,
    pub picked_by: String,
    pub note: Option<String>,
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A staff pick joined with the picked film.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct StaffPickEntry {
    pub pick_id: DbId,
    pub picked_by: String,
    pub note: Option<String>,
    pub position: i32,
    #[sqlx(flatten)]
    pub film: FilmSummary,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateStaffPick {
    pub film_id: DbId,
    pub picked_by: String,
    pub note: Option<String>,
    pub position: Option<i32>,
}
