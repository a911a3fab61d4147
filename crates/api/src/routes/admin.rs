//! Admin routes, mounted at `/admin`. Every handler requires the admin role.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{admin_content, admin_films, admin_integrations};
use crate::state::AppState;

/// ```text
/// POST   /films                               -> create_film
/// GET    /films/{id}                          -> get_film
/// PUT    /films/{id}                          -> update_film
/// DELETE /films/{id}                          -> delete_film
/// POST   /films/{id}/flags                    -> set_flags
/// POST   /films/{id}/publish                  -> publish_film
/// PUT    /films/{id}/genres                   -> set_film_genres
/// POST   /films/{id}/staff                    -> add_staff
/// PUT    /films/{id}/translations/{lang}      -> upsert_translation
/// POST   /films/{id}/translate/{lang}         -> translate_film
/// POST   /films/{id}/announce                 -> announce_film
/// POST   /films/import/tmdb                   -> import_tmdb
/// DELETE /staff/{id}                          -> delete_staff
/// POST   /genres                              -> upsert_genre
/// POST   /genres/sync-tmdb                    -> sync_tmdb_genres
/// GET    /tmdb/search                         -> search_tmdb
/// POST   /staff-picks                         -> add_staff_pick
/// DELETE /staff-picks/{film_id}               -> remove_staff_pick
/// POST   /cache/clear                         -> clear_cache
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/films", post(admin_films::create_film))
        .route(
            "/films/{id}",
            get(admin_films::get_film)
                .put(admin_films::update_film)
                .delete(admin_films::delete_film),
        )
        .route("/films/{id}/flags", post(admin_films::set_flags))
        .route("/films/{id}/publish", post(admin_films::publish_film))
        .route("/films/{id}/genres", put(admin_films::set_film_genres))
        .route("/films/{id}/staff", post(admin_films::add_staff))
        .route(
            "/films/{id}/translations/{lang}",
            put(admin_films::upsert_translation),
        )
        .route(
            "/films/{id}/translate/{lang}",
            post(admin_integrations::translate_film),
        )
        .route(
            "/films/{id}/announce",
            post(admin_integrations::announce_film),
        )
        .route("/films/import/tmdb", post(admin_integrations::import_tmdb))
        .route("/staff/{id}", delete(admin_films::delete_staff))
        .route("/genres", post(admin_content::upsert_genre))
        .route(
            "/genres/sync-tmdb",
            post(admin_integrations::sync_tmdb_genres),
        )
        .route("/tmdb/search", get(admin_integrations::search_tmdb))
        .route("/staff-picks", post(admin_content::add_staff_pick))
        .route(
            "/staff-picks/{film_id}",
            delete(admin_content::remove_staff_pick),
        )
        .route("/cache/clear", post(admin_content::clear_cache))
}
