//! Repository for the `remarkable_staff` table.

use moviehunt_core::types::DbId;
use sqlx::PgPool;

use crate::models::staff::{CreateStaff, RemarkableStaff};

const STAFF_COLUMNS: &str = "\
    id, film_id, name, role, description, photo_url, tmdb_person_id, sort_order, \
    created_at, updated_at";

pub struct StaffRepo;

impl StaffRepo {
    /// Staff highlighted for a film, in display order.
    pub async fn list_for_film(
        pool: &PgPool,
        film_id: DbId,
    ) -> Result<Vec<RemarkableStaff>, sqlx::Error> {
        let query = format!(
            "SELECT {STAFF_COLUMNS} FROM remarkable_staff \
             WHERE film_id = $1 \
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, RemarkableStaff>(&query)
            .bind(film_id)
            .fetch_all(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        film_id: DbId,
        input: &CreateStaff,
    ) -> Result<RemarkableStaff, sqlx::Error> {
        let query = format!(
            "INSERT INTO remarkable_staff \
                 (film_id, name, role, description, photo_url, tmdb_person_id, sort_order) \
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 0)) \
             RETURNING {STAFF_COLUMNS}"
        );
        sqlx::query_as::<_, RemarkableStaff>(&query)
            .bind(film_id)
            .bind(&input.name)
            .bind(&input.role)
            .bind(&input.description)
            .bind(&input.photo_url)
            .bind(input.tmdb_person_id)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM remarkable_staff WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
