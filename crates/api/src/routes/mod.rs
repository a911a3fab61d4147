pub mod admin;
pub mod forms;
pub mod health;
pub mod pages;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /pages/home                                      home page sections
/// /films                                           filtered listing
/// /films/{slug}                                    detail page
/// /genres                                          all genres
/// /staff-picks                                     staff picks
///
/// /newsletter/subscribe                            newsletter signup (POST)
/// /contact                                         contact form (POST)
///
/// /admin/films                                     create (admin only)
/// /admin/films/{id}                                get, update, delete
/// /admin/films/{id}/flags                          hidden gem / hunted (POST)
/// /admin/films/{id}/publish                        publish or unpublish (POST)
/// /admin/films/{id}/genres                         replace genres (PUT)
/// /admin/films/{id}/staff                          add remarkable staff (POST)
/// /admin/films/{id}/translations/{lang}            save translation (PUT)
/// /admin/films/{id}/translate/{lang}               DeepL translation (POST)
/// /admin/films/{id}/announce                       MailerLite campaign (POST)
/// /admin/films/import/tmdb                         draft from TMDB (POST)
/// /admin/staff/{id}                                delete staff
/// /admin/genres                                    upsert genre (POST)
/// /admin/genres/sync-tmdb                          import TMDB genres (POST)
/// /admin/tmdb/search                               TMDB search
/// /admin/staff-picks                               add pick (POST)
/// /admin/staff-picks/{film_id}                     remove pick
/// /admin/cache/clear                               drop cached pages (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(pages::router())
        .merge(forms::router())
        .nest("/admin", admin::router())
}
