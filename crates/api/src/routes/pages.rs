//! Public page-data routes.

use axum::routing::get;
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// ```text
/// GET /pages/home        -> home_page
/// GET /films             -> list_films
/// GET /films/{slug}      -> film_detail
/// GET /genres            -> list_genres
/// GET /staff-picks       -> list_staff_picks
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pages/home", get(pages::home_page))
        .route("/films", get(pages::list_films))
        .route("/films/{slug}", get(pages::film_detail))
        .route("/genres", get(pages::list_genres))
        .route("/staff-picks", get(pages::list_staff_picks))
}
