//! Repository for the `film_translations` table.

use moviehunt_core::types::DbId;
use sqlx::PgPool;

use crate::models::translation::{FilmTranslation, UpsertTranslation};

const TRANSLATION_COLUMNS: &str = "\
    id, film_id, language_code, title, synopsis, review, created_at, updated_at";

pub struct TranslationRepo;

impl TranslationRepo {
    pub async fn find(
        pool: &PgPool,
        film_id: DbId,
        language_code: &str,
    ) -> Result<Option<FilmTranslation>, sqlx::Error> {
        let query = format!(
            "SELECT {TRANSLATION_COLUMNS} FROM film_translations \
             WHERE film_id = $1 AND language_code = $2"
        );
        sqlx::query_as::<_, FilmTranslation>(&query)
            .bind(film_id)
            .bind(language_code)
            .fetch_optional(pool)
            .await
    }

    /// Translations of many films into one language, in a single query.
    pub async fn list_for_films(
        pool: &PgPool,
        film_ids: &[DbId],
        language_code: &str,
    ) -> Result<Vec<FilmTranslation>, sqlx::Error> {
        if film_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {TRANSLATION_COLUMNS} FROM film_translations \
             WHERE film_id = ANY($1) AND language_code = $2"
        );
        sqlx::query_as::<_, FilmTranslation>(&query)
            .bind(film_ids)
            .bind(language_code)
            .fetch_all(pool)
            .await
    }

    /// Insert a translation or replace the fields of an existing one.
    pub async fn upsert(
        pool: &PgPool,
        film_id: DbId,
        language_code: &str,
        input: &UpsertTranslation,
    ) -> Result<FilmTranslation, sqlx::Error> {
        let query = format!(
            "INSERT INTO film_translations (film_id, language_code, title, synopsis, review) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (film_id, language_code) DO UPDATE SET \
                 title = EXCLUDED.title, \
                 synopsis = EXCLUDED.synopsis, \
                 review = EXCLUDED.review \
             RETURNING {TRANSLATION_COLUMNS}"
        );
        sqlx::query_as::<_, FilmTranslation>(&query)
            .bind(film_id)
            .bind(language_code)
            .bind(&input.title)
            .bind(&input.synopsis)
            .bind(&input.review)
            .fetch_one(pool)
            .await
    }

    /// Language codes a film has been translated into.
    pub async fn list_languages(pool: &PgPool, film_id: DbId) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT language_code FROM film_translations \
             WHERE film_id = $1 \
             ORDER BY language_code",
        )
        .bind(film_id)
        .fetch_all(pool)
        .await
    }
}
