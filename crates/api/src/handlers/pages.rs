//! Handlers for the public page-data endpoints.
//!
//! Every response is assembled by [`CatalogService`](moviehunt_catalog::CatalogService)
//! from cached rows, with the visitor's language merged in per request.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::query::{FilmsQuery, Lang};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/pages/home
///
/// Carousel and listing sections of the home page. A section whose query
/// fails is returned empty rather than failing the page.
pub async fn home_page(
    State(state): State<AppState>,
    Lang(lang): Lang,
) -> AppResult<impl IntoResponse> {
    let page = state.catalog.home_page(lang).await;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/films
///
/// Filtered, paginated film listing.
pub async fn list_films(
    State(state): State<AppState>,
    Lang(lang): Lang,
    Query(params): Query<FilmsQuery>,
) -> AppResult<impl IntoResponse> {
    let (filter, pagination) = params.into_parts();
    let page = state.catalog.films_page(filter, pagination, lang).await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/films/{slug}
pub async fn film_detail(
    State(state): State<AppState>,
    Lang(lang): Lang,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let detail = state.catalog.film_detail(&slug, lang).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// GET /api/v1/genres
pub async fn list_genres(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let genres = state.catalog.genres().await?;
    Ok(Json(DataResponse { data: genres }))
}

/// GET /api/v1/staff-picks
pub async fn list_staff_picks(
    State(state): State<AppState>,
    Lang(lang): Lang,
) -> AppResult<impl IntoResponse> {
    let picks = state.catalog.staff_picks(lang).await?;
    Ok(Json(DataResponse { data: picks }))
}
