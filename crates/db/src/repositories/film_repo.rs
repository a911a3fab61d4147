//! Repository for the `films` table.
//!
//! Public listings only ever see published films; the admin lookups
//! (`find_by_id`, `update`, ...) see drafts too.

use moviehunt_core::filter::{FilmFilter, FilmSort};
use moviehunt_core::pagination::Pagination;
use moviehunt_core::slug::film_slug;
use moviehunt_core::types::{DbId, Timestamp};
use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};

use crate::models::film::{CreateFilm, Film, FilmFlags, FilmSummary, UpdateFilm};
use crate::models::genre::{CreateGenre, Genre};
use crate::repositories::GenreRepo;

/// Column list for full `films` rows.
const FILM_COLUMNS: &str = "\
    id, slug, title, original_title, release_year, director, synopsis, review, \
    rating, poster_url, backdrop_url, trailer_url, tmdb_id, imdb_id, \
    runtime_minutes, country, is_hidden_gem, is_hunted, published_at, \
    created_at, updated_at";

/// Column list for listing cards.
const SUMMARY_COLUMNS: &str = "\
    id, slug, title, original_title, release_year, director, synopsis, rating, \
    poster_url, backdrop_url, is_hidden_gem, is_hunted, published_at";

/// Visibility predicate for public queries.
const PUBLISHED: &str = "published_at IS NOT NULL AND published_at <= NOW()";

/// Provides CRUD and listing queries for films.
pub struct FilmRepo;

impl FilmRepo {
    // -----------------------------------------------------------------------
    // CRUD
    // -----------------------------------------------------------------------

    /// Insert a new film. The slug is derived from title and year when absent.
    ///
    /// When no slug can be derived the insert fails on
    /// `ck_films_slug_not_blank`.
    pub async fn create(pool: &PgPool, input: &CreateFilm) -> Result<Film, sqlx::Error> {
        Self::insert(pool, input).await
    }

    /// Insert a film together with its genres in one transaction.
    ///
    /// Genres are upserted by slug and become the film's complete genre list.
    /// Nothing is written when any step fails.
    pub async fn create_with_genres(
        pool: &PgPool,
        input: &CreateFilm,
        genres: &[CreateGenre],
    ) -> Result<(Film, Vec<Genre>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let film = Self::insert(&mut *tx, input).await?;
        let mut stored = Vec::with_capacity(genres.len());
        for genre in genres {
            stored.push(GenreRepo::upsert_inner(&mut *tx, genre).await?);
        }
        let genre_ids: Vec<DbId> = stored.iter().map(|g| g.id).collect();
        GenreRepo::set_film_genres_inner(&mut tx, film.id, &genre_ids).await?;

        tx.commit().await?;
        Ok((film, stored))
    }

    async fn insert<'e, E>(executor: E, input: &CreateFilm) -> Result<Film, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let slug = input
            .slug
            .clone()
            .or_else(|| film_slug(&input.title, input.release_year, input.tmdb_id))
            .unwrap_or_default();

        let query = format!(
            "INSERT INTO films (slug, title, original_title, release_year, director, synopsis, \
                 review, rating, poster_url, backdrop_url, trailer_url, tmdb_id, imdb_id, \
                 runtime_minutes, country, is_hidden_gem, is_hunted, published_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, \
                 COALESCE($16, false), COALESCE($17, false), $18) \
             RETURNING {FILM_COLUMNS}"
        );
        sqlx::query_as::<_, Film>(&query)
            .bind(&slug)
            .bind(&input.title)
            .bind(&input.original_title)
            .bind(input.release_year)
            .bind(&input.director)
            .bind(&input.synopsis)
            .bind(&input.review)
            .bind(input.rating)
            .bind(&input.poster_url)
            .bind(&input.backdrop_url)
            .bind(&input.trailer_url)
            .bind(input.tmdb_id)
            .bind(&input.imdb_id)
            .bind(input.runtime_minutes)
            .bind(&input.country)
            .bind(input.is_hidden_gem)
            .bind(input.is_hunted)
            .bind(input.published_at)
            .fetch_one(executor)
            .await
    }

    /// Find a film by id, published or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Film>, sqlx::Error> {
        let query = format!("SELECT {FILM_COLUMNS} FROM films WHERE id = $1");
        sqlx::query_as::<_, Film>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a published film by its slug.
    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Film>, sqlx::Error> {
        let query = format!("SELECT {FILM_COLUMNS} FROM films WHERE slug = $1 AND {PUBLISHED}");
        sqlx::query_as::<_, Film>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Partial update. Returns `None` if the film does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFilm,
    ) -> Result<Option<Film>, sqlx::Error> {
        let query = format!(
            "UPDATE films SET \
                 title = COALESCE($2, title), \
                 slug = COALESCE($3, slug), \
                 original_title = COALESCE($4, original_title), \
                 release_year = COALESCE($5, release_year), \
                 director = COALESCE($6, director), \
                 synopsis = COALESCE($7, synopsis), \
                 review = COALESCE($8, review), \
                 rating = COALESCE($9, rating), \
                 poster_url = COALESCE($10, poster_url), \
                 backdrop_url = COALESCE($11, backdrop_url), \
                 trailer_url = COALESCE($12, trailer_url), \
                 imdb_id = COALESCE($13, imdb_id), \
                 runtime_minutes = COALESCE($14, runtime_minutes), \
                 country = COALESCE($15, country) \
             WHERE id = $1 \
             RETURNING {FILM_COLUMNS}"
        );
        sqlx::query_as::<_, Film>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.original_title)
            .bind(input.release_year)
            .bind(&input.director)
            .bind(&input.synopsis)
            .bind(&input.review)
            .bind(input.rating)
            .bind(&input.poster_url)
            .bind(&input.backdrop_url)
            .bind(&input.trailer_url)
            .bind(&input.imdb_id)
            .bind(input.runtime_minutes)
            .bind(&input.country)
            .fetch_optional(pool)
            .await
    }

    /// Set or clear the hidden-gem / hunted tags.
    pub async fn set_flags(
        pool: &PgPool,
        id: DbId,
        flags: &FilmFlags,
    ) -> Result<Option<Film>, sqlx::Error> {
        let query = format!(
            "UPDATE films SET \
                 is_hidden_gem = COALESCE($2, is_hidden_gem), \
                 is_hunted = COALESCE($3, is_hunted) \
             WHERE id = $1 \
             RETURNING {FILM_COLUMNS}"
        );
        sqlx::query_as::<_, Film>(&query)
            .bind(id)
            .bind(flags.is_hidden_gem)
            .bind(flags.is_hunted)
            .fetch_optional(pool)
            .await
    }

    /// Set the publication time. `None` turns the film back into a draft.
    pub async fn publish(
        pool: &PgPool,
        id: DbId,
        at: Option<Timestamp>,
    ) -> Result<Option<Film>, sqlx::Error> {
        let query = format!(
            "UPDATE films SET published_at = $2 WHERE id = $1 RETURNING {FILM_COLUMNS}"
        );
        sqlx::query_as::<_, Film>(&query)
            .bind(id)
            .bind(at)
            .fetch_optional(pool)
            .await
    }

    /// Delete a film. Translations, staff, genres and picks cascade.
    ///
    /// Returns `true` if a film was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM films WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Home page sections
    // -----------------------------------------------------------------------

    /// Most recently published films.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<FilmSummary>, sqlx::Error> {
        Self::list_section(pool, None, "published_at DESC, id DESC", limit).await
    }

    /// Highest-rated published films.
    pub async fn list_top_rated(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<FilmSummary>, sqlx::Error> {
        Self::list_section(
            pool,
            Some("rating IS NOT NULL"),
            "rating DESC, published_at DESC",
            limit,
        )
        .await
    }

    /// Published films tagged as hidden gems, newest first.
    pub async fn list_hidden_gems(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<FilmSummary>, sqlx::Error> {
        Self::list_section(pool, Some("is_hidden_gem"), "published_at DESC, id DESC", limit).await
    }

    /// Published films tagged "Hunted by MovieHunt", newest first.
    pub async fn list_hunted(pool: &PgPool, limit: i64) -> Result<Vec<FilmSummary>, sqlx::Error> {
        Self::list_section(pool, Some("is_hunted"), "published_at DESC, id DESC", limit).await
    }

    /// Newest published films that have a backdrop, for the home carousel.
    pub async fn list_carousel(pool: &PgPool, limit: i64) -> Result<Vec<FilmSummary>, sqlx::Error> {
        Self::list_section(
            pool,
            Some("backdrop_url IS NOT NULL"),
            "published_at DESC, id DESC",
            limit,
        )
        .await
    }

    async fn list_section(
        pool: &PgPool,
        extra: Option<&str>,
        order: &str,
        limit: i64,
    ) -> Result<Vec<FilmSummary>, sqlx::Error> {
        let extra = extra.map(|e| format!(" AND {e}")).unwrap_or_default();
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM films \
             WHERE {PUBLISHED}{extra} \
             ORDER BY {order} \
             LIMIT $1"
        );
        sqlx::query_as::<_, FilmSummary>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Filtered listing
    // -----------------------------------------------------------------------

    /// One page of published films matching `filter`.
    pub async fn list_filtered(
        pool: &PgPool,
        filter: &FilmFilter,
        pagination: &Pagination,
    ) -> Result<Vec<FilmSummary>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {SUMMARY_COLUMNS} FROM films f WHERE {PUBLISHED}"
        ));
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY ")
            .push(order_clause(filter.sort))
            .push(" LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        qb.build_query_as::<FilmSummary>().fetch_all(pool).await
    }

    /// Number of published films matching `filter`.
    pub async fn count_filtered(pool: &PgPool, filter: &FilmFilter) -> Result<i64, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT COUNT(*) FROM films f WHERE {PUBLISHED}"
        ));
        push_filter(&mut qb, filter);

        qb.build_query_scalar::<i64>().fetch_one(pool).await
    }
}

/// Append the `AND ...` conditions of a filter to a query over `films f`.
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &FilmFilter) {
    if let Some(genre) = &filter.genre {
        qb.push(
            " AND EXISTS (SELECT 1 FROM film_genres fg \
               JOIN genres g ON g.id = fg.genre_id \
               WHERE fg.film_id = f.id AND g.slug = ",
        )
        .push_bind(genre.clone())
        .push(")");
    }
    if let Some(year) = filter.year {
        qb.push(" AND f.release_year = ").push_bind(year);
    }
    if let Some(rating) = filter.min_rating {
        qb.push(" AND f.rating >= ").push_bind(rating);
    }
    if filter.hidden_gem {
        qb.push(" AND f.is_hidden_gem");
    }
    if filter.hunted {
        qb.push(" AND f.is_hunted");
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", escape_like(search));
        qb.push(" AND (f.title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR f.original_title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR f.director ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

fn order_clause(sort: FilmSort) -> &'static str {
    match sort {
        FilmSort::Recent => "f.published_at DESC, f.id DESC",
        FilmSort::TopRated => "f.rating DESC NULLS LAST, f.published_at DESC",
        FilmSort::Title => "f.title ASC, f.id ASC",
        FilmSort::ReleaseYear => "f.release_year DESC NULLS LAST, f.title ASC",
    }
}

/// Escape `LIKE` wildcards so user input matches literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
