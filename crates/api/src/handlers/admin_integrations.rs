//! Admin handlers that call third-party services: TMDB prefill, DeepL
//! translation and MailerLite announcements.
//!
//! Each one answers 503 when its integration is not configured.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use moviehunt_core::error::CoreError;
use moviehunt_core::locale::DEFAULT_LANGUAGE;
use moviehunt_core::types::DbId;
use moviehunt_db::models::film::{CreateFilm, Film};
use moviehunt_db::models::genre::{CreateGenre, Genre};
use moviehunt_db::models::translation::UpsertTranslation;
use moviehunt_db::repositories::{FilmRepo, GenreRepo, TranslationRepo};
use moviehunt_db::DbPool;
use moviehunt_mail::new_review_campaign;
use moviehunt_tmdb::types::{Credits, MovieDetails, TmdbGenre, Video};
use moviehunt_tmdb::{image_url, pick_trailer, youtube_url, ImageSize, TmdbError};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::admin_films::translation_language;
use crate::middleware::rbac::RequireAdmin;
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Reviews are authored in English.
const SOURCE_LANG_DEEPL: &str = "EN";

/// Body of `POST /admin/films/import/tmdb`.
#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub tmdb_id: i32,
}

// ---------------------------------------------------------------------------
// TMDB
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/tmdb/search?q=&year=
pub async fn search_tmdb(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let query = params.q.trim();
    if query.is_empty() {
        return Err(AppError::BadRequest("q must not be empty".into()));
    }
    let results = state
        .tmdb()?
        .search_movie(query, params.year, DEFAULT_LANGUAGE.tmdb_tag())
        .await?;

    Ok(Json(DataResponse { data: results }))
}

/// POST /api/v1/admin/films/import/tmdb
///
/// Create a draft review prefilled from TMDB: details, poster and backdrop,
/// trailer, director, country and genres. The editor writes the review and
/// rating before publishing.
pub async fn import_tmdb(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<ImportRequest>,
) -> AppResult<impl IntoResponse> {
    let tmdb = state.tmdb()?;
    let id = input.tmdb_id;
    let lang = DEFAULT_LANGUAGE.tmdb_tag();

    let (details, videos, credits) = tokio::try_join!(
        tmdb.movie_details(id, lang),
        tmdb.movie_videos(id, lang),
        tmdb.movie_credits(id),
    )
    .map_err(|e| match e {
        TmdbError::NotFound(_) => {
            AppError::Core(CoreError::Validation(format!("No TMDB movie with id {id}")))
        }
        other => other.into(),
    })?;

    let (film, genres) = FilmRepo::create_with_genres(
        &state.pool,
        &film_from_tmdb(&details, &videos, &credits),
        &genre_inputs(&details.genres),
    )
    .await?;
    state.catalog.invalidate();

    tracing::info!(
        film_id = film.id,
        tmdb_id = id,
        genres = genres.len(),
        user_id = %admin.user_id,
        "Film imported from TMDB",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: film })))
}

/// POST /api/v1/admin/genres/sync-tmdb
///
/// Upsert TMDB's movie genre list so imported films map onto local genres.
pub async fn sync_tmdb_genres(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let remote = state.tmdb()?.genre_list(DEFAULT_LANGUAGE.tmdb_tag()).await?;
    let genres = upsert_tmdb_genres(&state.pool, &remote).await?;
    state.catalog.invalidate();

    tracing::info!(count = genres.len(), user_id = %admin.user_id, "TMDB genres synced");

    Ok(Json(DataResponse { data: genres }))
}

async fn upsert_tmdb_genres(
    pool: &DbPool,
    remote: &[TmdbGenre],
) -> Result<Vec<Genre>, sqlx::Error> {
    let mut genres = Vec::with_capacity(remote.len());
    for input in genre_inputs(remote) {
        genres.push(GenreRepo::upsert_by_slug(pool, &input).await?);
    }
    Ok(genres)
}

fn genre_inputs(remote: &[TmdbGenre]) -> Vec<CreateGenre> {
    remote
        .iter()
        .map(|g| CreateGenre {
            name: g.name.clone(),
            slug: None,
            tmdb_genre_id: Some(g.id),
        })
        .collect()
}

/// Draft film built from TMDB data. Rating and review stay empty.
fn film_from_tmdb(details: &MovieDetails, videos: &[Video], credits: &Credits) -> CreateFilm {
    let directors: Vec<&str> = credits
        .crew_with_job("Director")
        .into_iter()
        .map(|c| c.name.as_str())
        .collect();

    CreateFilm {
        title: details.title.clone(),
        slug: None,
        original_title: details
            .original_title
            .clone()
            .filter(|t| *t != details.title),
        release_year: details.release_year(),
        director: (!directors.is_empty()).then(|| directors.join(", ")),
        synopsis: details
            .overview
            .clone()
            .filter(|o| !o.trim().is_empty()),
        review: None,
        rating: None,
        poster_url: image_url(details.poster_path.as_deref(), ImageSize::W500),
        backdrop_url: image_url(details.backdrop_path.as_deref(), ImageSize::W1280),
        trailer_url: pick_trailer(videos).map(|v| youtube_url(&v.key)),
        tmdb_id: Some(details.id),
        imdb_id: details.imdb_id.clone().filter(|i| !i.is_empty()),
        runtime_minutes: details.runtime.filter(|r| *r > 0),
        country: details.production_countries.first().map(|c| c.name.clone()),
        is_hidden_gem: None,
        is_hunted: None,
        published_at: None,
    }
}

// ---------------------------------------------------------------------------
// DeepL
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/films/{id}/translate/{lang}
///
/// Machine-translate title, synopsis and review and store the result,
/// replacing any existing translation for that language.
pub async fn translate_film(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path((film_id, lang)): Path<(DbId, String)>,
) -> AppResult<impl IntoResponse> {
    let lang = translation_language(&lang)?;
    let deepl = state.deepl()?;
    let film = find_film(&state, film_id).await?;

    let fields = [
        Some(film.title.as_str()),
        film.synopsis.as_deref(),
        film.review.as_deref(),
    ];
    let mut translated = deepl
        .translate_fields(&fields, lang.deepl_target(), Some(SOURCE_LANG_DEEPL))
        .await?
        .into_iter();

    let input = UpsertTranslation {
        title: translated.next().flatten(),
        synopsis: translated.next().flatten(),
        review: translated.next().flatten(),
    };
    let translation = TranslationRepo::upsert(&state.pool, film_id, lang.code(), &input).await?;
    state.catalog.invalidate();

    tracing::info!(
        film_id,
        lang = lang.code(),
        user_id = %admin.user_id,
        "Film machine-translated"
    );

    Ok(Json(DataResponse { data: translation }))
}

// ---------------------------------------------------------------------------
// MailerLite
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/films/{id}/announce
///
/// Send a newsletter campaign for a published review.
pub async fn announce_film(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(film_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let newsletter = state.newsletter()?;
    let film = find_film(&state, film_id).await?;

    let published = film
        .published_at
        .is_some_and(|at| at <= chrono::Utc::now());
    if !published {
        return Err(AppError::Core(CoreError::Conflict(
            "Only published reviews can be announced".into(),
        )));
    }

    let url = format!("{}/films/{}", state.config.site_url, film.slug);
    let draft = new_review_campaign(
        &film.title,
        film.release_year,
        film.synopsis.as_deref(),
        &url,
    );
    let campaign = newsletter.announce(&draft).await?;

    tracing::info!(
        film_id,
        campaign_id = %campaign.id,
        user_id = %admin.user_id,
        "Review announced"
    );

    Ok(Json(DataResponse { data: campaign }))
}

async fn find_film(state: &AppState, film_id: DbId) -> AppResult<Film> {
    FilmRepo::find_by_id(&state.pool, film_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Film",
            id: film_id,
        }))
}
