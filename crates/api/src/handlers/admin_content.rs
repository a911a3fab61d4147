//! Admin handlers for site-wide content: genres, staff picks and the cache.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use moviehunt_core::error::CoreError;
use moviehunt_core::types::DbId;
use moviehunt_db::models::genre::CreateGenre;
use moviehunt_db::models::staff_pick::CreateStaffPick;
use moviehunt_db::repositories::{FilmRepo, GenreRepo, StaffPickRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Genres
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/genres
///
/// Create a genre, or rename the one with the same slug.
pub async fn upsert_genre(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateGenre>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name must not be blank".into(),
        )));
    }

    let genre = GenreRepo::upsert_by_slug(&state.pool, &input).await?;
    state.catalog.invalidate();

    tracing::info!(
        genre_id = genre.id,
        slug = %genre.slug,
        user_id = %admin.user_id,
        "Genre saved"
    );

    Ok(Json(DataResponse { data: genre }))
}

// ---------------------------------------------------------------------------
// Staff picks
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/staff-picks
///
/// A film is picked at most once; picking it again replaces the pick.
pub async fn add_staff_pick(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateStaffPick>,
) -> AppResult<impl IntoResponse> {
    if input.picked_by.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "picked_by must not be blank".into(),
        )));
    }
    FilmRepo::find_by_id(&state.pool, input.film_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Film",
            id: input.film_id,
        }))?;

    let pick = StaffPickRepo::add(&state.pool, &input).await?;
    state.catalog.invalidate();

    tracing::info!(
        film_id = pick.film_id,
        pick_id = pick.id,
        user_id = %admin.user_id,
        "Staff pick added"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: pick })))
}

/// DELETE /api/v1/admin/staff-picks/{film_id}
pub async fn remove_staff_pick(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(film_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !StaffPickRepo::remove(&state.pool, film_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "StaffPick",
            id: film_id,
        }));
    }
    state.catalog.invalidate();

    tracing::info!(film_id, user_id = %admin.user_id, "Staff pick removed");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/cache/clear
///
/// Drop every cached page, e.g. after editing rows directly in Supabase.
pub async fn clear_cache(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    state.catalog.invalidate();

    tracing::info!(user_id = %admin.user_id, "Catalog cache cleared");

    Ok(StatusCode::NO_CONTENT)
}
