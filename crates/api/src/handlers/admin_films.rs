//! Admin handlers for films and the data hanging off them.
//!
//! All endpoints require [`RequireAdmin`]. Every successful write drops the
//! catalog caches so the public pages pick up the change immediately.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use moviehunt_core::error::CoreError;
use moviehunt_core::locale::{Language, SUPPORTED_LANGUAGES};
use moviehunt_core::slug::film_slug;
use moviehunt_core::types::{DbId, Timestamp};
use moviehunt_db::models::film::{CreateFilm, FilmFlags, UpdateFilm};
use moviehunt_db::models::genre::SetFilmGenres;
use moviehunt_db::models::staff::CreateStaff;
use moviehunt_db::models::translation::UpsertTranslation;
use moviehunt_db::repositories::{FilmRepo, GenreRepo, StaffRepo, TranslationRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /admin/films/{id}/publish`.
#[derive(Debug, Default, Deserialize)]
pub struct PublishRequest {
    /// Defaults to now. Send `"draft": true` to unpublish.
    pub published_at: Option<Timestamp>,
    #[serde(default)]
    pub draft: bool,
}

fn film_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Film", id })
}

fn require_non_blank(field: &str, value: Option<&str>) -> AppResult<()> {
    match value {
        Some(v) if v.trim().is_empty() => Err(AppError::Core(CoreError::Validation(format!(
            "{field} must not be blank"
        )))),
        _ => Ok(()),
    }
}

/// Parse a `{lang}` path segment into a language that stores translations.
pub(crate) fn translation_language(code: &str) -> AppResult<Language> {
    let lang = Language::parse(code).ok_or_else(|| {
        let known: Vec<&str> = SUPPORTED_LANGUAGES.iter().map(Language::code).collect();
        AppError::BadRequest(format!(
            "Unsupported language '{code}', expected one of {}",
            known.join(", ")
        ))
    })?;
    if !lang.needs_translation() {
        return Err(AppError::BadRequest(format!(
            "'{}' is the source language and has no translation",
            lang.code()
        )));
    }
    Ok(lang)
}

// ---------------------------------------------------------------------------
// Film CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/films/{id}
///
/// Drafts included.
pub async fn get_film(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(film_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let film = FilmRepo::find_by_id(&state.pool, film_id)
        .await?
        .ok_or_else(|| film_not_found(film_id))?;

    Ok(Json(DataResponse { data: film }))
}

/// POST /api/v1/admin/films
///
/// Create a review. The slug is derived from title and year when omitted.
pub async fn create_film(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateFilm>,
) -> AppResult<impl IntoResponse> {
    require_non_blank("title", Some(&input.title))?;
    require_non_blank("slug", input.slug.as_deref())?;
    let derivable = film_slug(&input.title, input.release_year, input.tmdb_id).is_some();
    if input.slug.is_none() && !derivable {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot derive a slug from this title; provide one".into(),
        )));
    }

    let film = FilmRepo::create(&state.pool, &input).await?;
    state.catalog.invalidate();

    tracing::info!(film_id = film.id, slug = %film.slug, user_id = %admin.user_id, "Film created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: film })))
}

/// PUT /api/v1/admin/films/{id}
pub async fn update_film(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(film_id): Path<DbId>,
    Json(input): Json<UpdateFilm>,
) -> AppResult<impl IntoResponse> {
    require_non_blank("title", input.title.as_deref())?;
    require_non_blank("slug", input.slug.as_deref())?;

    let film = FilmRepo::update(&state.pool, film_id, &input)
        .await?
        .ok_or_else(|| film_not_found(film_id))?;
    state.catalog.invalidate();

    tracing::info!(film_id, user_id = %admin.user_id, "Film updated");

    Ok(Json(DataResponse { data: film }))
}

/// DELETE /api/v1/admin/films/{id}
///
/// Translations, staff, genre links and the staff pick go with it.
pub async fn delete_film(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(film_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !FilmRepo::delete(&state.pool, film_id).await? {
        return Err(film_not_found(film_id));
    }
    state.catalog.invalidate();

    tracing::info!(film_id, user_id = %admin.user_id, "Film deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/films/{id}/flags
///
/// Set or clear the hidden-gem and hunted tags. Omitted flags are unchanged.
pub async fn set_flags(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(film_id): Path<DbId>,
    Json(input): Json<FilmFlags>,
) -> AppResult<impl IntoResponse> {
    let film = FilmRepo::set_flags(&state.pool, film_id, &input)
        .await?
        .ok_or_else(|| film_not_found(film_id))?;
    state.catalog.invalidate();

    tracing::info!(
        film_id,
        is_hidden_gem = film.is_hidden_gem,
        is_hunted = film.is_hunted,
        user_id = %admin.user_id,
        "Film flags updated",
    );

    Ok(Json(DataResponse { data: film }))
}

/// POST /api/v1/admin/films/{id}/publish
pub async fn publish_film(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(film_id): Path<DbId>,
    Json(input): Json<PublishRequest>,
) -> AppResult<impl IntoResponse> {
    let at = if input.draft {
        None
    } else {
        Some(input.published_at.unwrap_or_else(chrono::Utc::now))
    };

    let film = FilmRepo::publish(&state.pool, film_id, at)
        .await?
        .ok_or_else(|| film_not_found(film_id))?;
    state.catalog.invalidate();

    tracing::info!(
        film_id,
        draft = input.draft,
        user_id = %admin.user_id,
        "Film publication changed"
    );

    Ok(Json(DataResponse { data: film }))
}

// ---------------------------------------------------------------------------
// Genres, staff and translations of a film
// ---------------------------------------------------------------------------

/// PUT /api/v1/admin/films/{id}/genres
///
/// Replace the genre list of a film.
pub async fn set_film_genres(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(film_id): Path<DbId>,
    Json(input): Json<SetFilmGenres>,
) -> AppResult<impl IntoResponse> {
    FilmRepo::find_by_id(&state.pool, film_id)
        .await?
        .ok_or_else(|| film_not_found(film_id))?;

    GenreRepo::set_film_genres(&state.pool, film_id, &input.genre_ids).await?;
    state.catalog.invalidate();

    let genres = GenreRepo::list_for_film(&state.pool, film_id).await?;

    tracing::info!(film_id, count = genres.len(), user_id = %admin.user_id, "Film genres set");

    Ok(Json(DataResponse { data: genres }))
}

/// POST /api/v1/admin/films/{id}/staff
pub async fn add_staff(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(film_id): Path<DbId>,
    Json(input): Json<CreateStaff>,
) -> AppResult<impl IntoResponse> {
    require_non_blank("name", Some(&input.name))?;
    require_non_blank("role", Some(&input.role))?;
    FilmRepo::find_by_id(&state.pool, film_id)
        .await?
        .ok_or_else(|| film_not_found(film_id))?;

    let staff = StaffRepo::create(&state.pool, film_id, &input).await?;
    state.catalog.invalidate();

    tracing::info!(film_id, staff_id = staff.id, user_id = %admin.user_id, "Staff added");

    Ok((StatusCode::CREATED, Json(DataResponse { data: staff })))
}

/// DELETE /api/v1/admin/staff/{id}
pub async fn delete_staff(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(staff_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !StaffRepo::delete(&state.pool, staff_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Staff",
            id: staff_id,
        }));
    }
    state.catalog.invalidate();

    tracing::info!(staff_id, user_id = %admin.user_id, "Staff deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/admin/films/{id}/translations/{lang}
///
/// Hand-written translation. Blank fields fall back to English on the site.
pub async fn upsert_translation(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path((film_id, lang)): Path<(DbId, String)>,
    Json(input): Json<UpsertTranslation>,
) -> AppResult<impl IntoResponse> {
    let lang = translation_language(&lang)?;
    FilmRepo::find_by_id(&state.pool, film_id)
        .await?
        .ok_or_else(|| film_not_found(film_id))?;

    let translation = TranslationRepo::upsert(&state.pool, film_id, lang.code(), &input).await?;
    state.catalog.invalidate();

    tracing::info!(film_id, lang = lang.code(), user_id = %admin.user_id, "Translation saved");

    Ok(Json(DataResponse { data: translation }))
}
