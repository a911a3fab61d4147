//! Repository for the `genres` and `film_genres` tables.

use moviehunt_core::slug::slugify;
use moviehunt_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::genre::{CreateGenre, Genre};

const GENRE_COLUMNS: &str = "id, name, slug, tmdb_genre_id, created_at, updated_at";

pub struct GenreRepo;

impl GenreRepo {
    /// All genres ordered by name.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Genre>, sqlx::Error> {
        let query = format!("SELECT {GENRE_COLUMNS} FROM genres ORDER BY name");
        sqlx::query_as::<_, Genre>(&query).fetch_all(pool).await
    }

    /// Insert a genre, or update name and TMDB id if the slug already exists.
    pub async fn upsert_by_slug(pool: &PgPool, input: &CreateGenre) -> Result<Genre, sqlx::Error> {
        Self::upsert_inner(pool, input).await
    }

    /// Replace the genres of a film in a single transaction.
    pub async fn set_film_genres(
        pool: &PgPool,
        film_id: DbId,
        genre_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        Self::set_film_genres_inner(&mut tx, film_id, genre_ids).await?;
        tx.commit().await
    }

    /// Genres of a single film.
    pub async fn list_for_film(pool: &PgPool, film_id: DbId) -> Result<Vec<Genre>, sqlx::Error> {
        sqlx::query_as::<_, Genre>(
            "SELECT g.id, g.name, g.slug, g.tmdb_genre_id, g.created_at, g.updated_at \
             FROM genres g \
             JOIN film_genres fg ON fg.genre_id = g.id \
             WHERE fg.film_id = $1 \
             ORDER BY g.name",
        )
        .bind(film_id)
        .fetch_all(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    pub(crate) async fn upsert_inner<'e, E>(
        executor: E,
        input: &CreateGenre,
    ) -> Result<Genre, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let slug = input
            .slug
            .clone()
            .unwrap_or_else(|| slugify(&input.name, None));
        let query = format!(
            "INSERT INTO genres (name, slug, tmdb_genre_id) VALUES ($1, $2, $3) \
             ON CONFLICT (slug) DO UPDATE SET \
                 name = EXCLUDED.name, \
                 tmdb_genre_id = COALESCE(EXCLUDED.tmdb_genre_id, genres.tmdb_genre_id) \
             RETURNING {GENRE_COLUMNS}"
        );
        sqlx::query_as::<_, Genre>(&query)
            .bind(&input.name)
            .bind(&slug)
            .bind(input.tmdb_genre_id)
            .fetch_one(executor)
            .await
    }

    /// Replace genre associations within an existing transaction.
    pub(crate) async fn set_film_genres_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        film_id: DbId,
        genre_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM film_genres WHERE film_id = $1")
            .bind(film_id)
            .execute(&mut **tx)
            .await?;

        if !genre_ids.is_empty() {
            sqlx::query(
                "INSERT INTO film_genres (film_id, genre_id) \
                 SELECT $1, UNNEST($2::BIGINT[]) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(film_id)
            .bind(genre_ids)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}
