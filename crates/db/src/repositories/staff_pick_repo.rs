//! Repository for the `staff_picks` table.

use moviehunt_core::types::DbId;
use sqlx::PgPool;

use crate::models::staff_pick::{CreateStaffPick, StaffPick, StaffPickEntry};

const PICK_COLUMNS: &str = "id, film_id, picked_by, note, position, created_at, updated_at";

pub struct StaffPickRepo;

impl StaffPickRepo {
    /// Picks of published films in display order, joined with the film card.
    pub async fn list(pool: &PgPool, limit: i64) -> Result<Vec<StaffPickEntry>, sqlx::Error> {
        sqlx::query_as::<_, StaffPickEntry>(
            "SELECT sp.id AS pick_id, sp.picked_by, sp.note, sp.position, \
                 f.id, f.slug, f.title, f.original_title, f.release_year, f.director, \
                 f.synopsis, f.rating, f.poster_url, f.backdrop_url, f.is_hidden_gem, \
                 f.is_hunted, f.published_at \
             FROM staff_picks sp \
             JOIN films f ON f.id = sp.film_id \
             WHERE f.published_at IS NOT NULL AND f.published_at <= NOW() \
             ORDER BY sp.position, sp.created_at DESC \
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Pick a film, or update the existing pick for it.
    ///
    /// A re-pick without a position keeps the one already stored.
    pub async fn add(pool: &PgPool, input: &CreateStaffPick) -> Result<StaffPick, sqlx::Error> {
        let query = format!(
            "INSERT INTO staff_picks (film_id, picked_by, note, position) \
             VALUES ($1, $2, $3, COALESCE($4, 0)) \
             ON CONFLICT (film_id) DO UPDATE SET \
                 picked_by = EXCLUDED.picked_by, \
                 note = EXCLUDED.note, \
                 position = COALESCE($4, staff_picks.position) \
             RETURNING {PICK_COLUMNS}"
        );
        sqlx::query_as::<_, StaffPick>(&query)
            .bind(input.film_id)
            .bind(&input.picked_by)
            .bind(&input.note)
            .bind(input.position)
            .fetch_one(pool)
            .await
    }

    /// Returns `true` if the film was picked.
    pub async fn remove(pool: &PgPool, film_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM staff_picks WHERE film_id = $1")
            .bind(film_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
