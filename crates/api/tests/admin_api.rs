//! Integration tests for the admin endpoints: access control, film editing
//! and cache invalidation.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, delete_auth, get, get_auth, post_json, post_json_auth,
    put_json_auth, reader_token, token_for,
};
use serde_json::json;
use sqlx::PgPool;

async fn create_film(app: axum::Router, token: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_json_auth(app, "/api/v1/admin/films", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

// ---------------------------------------------------------------------------
// Access control
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_routes_require_a_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app.clone(), "/api/v1/admin/films", json!({"title": "Heat"})).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");

    let response = get_auth(app, "/api/v1/admin/films/1", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn readers_are_forbidden(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/admin/cache/clear",
        &reader_token(),
        json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_role_claim_grants_access(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = token_for("someone@example.com", Some("admin"));

    let response = post_json_auth(app, "/api/v1/admin/cache/clear", &token, json!({})).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// Film lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn draft_becomes_public_once_published(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = admin_token();

    let film = create_film(
        app.clone(),
        &token,
        json!({"title": "Heat", "release_year": 1995, "rating": 8.5}),
    )
    .await;
    assert_eq!(film["slug"], "heat-1995");
    assert!(film["published_at"].is_null());
    let id = film["id"].as_i64().unwrap();

    // Drafts are visible to admins only.
    let response = get_auth(app.clone(), &format!("/api/v1/admin/films/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = get(app.clone(), "/api/v1/films/heat-1995").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/admin/films/{id}/publish"),
        &token,
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"]["published_at"].is_string());

    let response = get(app.clone(), "/api/v1/films/heat-1995").await;
    assert_eq!(response.status(), StatusCode::OK);

    // And back to draft.
    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/admin/films/{id}/publish"),
        &token,
        json!({"draft": true}),
    )
    .await;
    assert!(body_json(response).await["data"]["published_at"].is_null());
    let response = get(app, "/api/v1/films/heat-1995").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_flags_and_delete(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = admin_token();
    let id = create_film(app.clone(), &token, json!({"title": "Ran", "release_year": 1985})).await
        ["id"]
        .as_i64()
        .unwrap();
    let uri = format!("/api/v1/admin/films/{id}");

    let body = json!({"director": "Akira Kurosawa"});
    let response = put_json_auth(app.clone(), &uri, &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["director"], "Akira Kurosawa");
    assert_eq!(json["data"]["title"], "Ran");

    let response = post_json_auth(
        app.clone(),
        &format!("{uri}/flags"),
        &token,
        json!({"is_hidden_gem": true}),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["is_hidden_gem"], true);
    assert_eq!(json["data"]["is_hunted"], false);

    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json_auth(app, &uri, &token, json!({"title": "Ran"})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_film_input_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = admin_token();

    let body = json!({"title": "  "});
    let response = post_json_auth(app.clone(), "/api/v1/admin/films", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/admin/films",
        &token,
        json!({"title": "Heat", "rating": 11}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // No Latin letters, no year, no TMDB id: nothing to build a slug from.
    let response = post_json_auth(
        app.clone(),
        "/api/v1/admin/films",
        &token,
        json!({"title": "東京物語"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    create_film(app.clone(), &token, json!({"title": "Heat", "release_year": 1995})).await;
    let response = post_json_auth(
        app,
        "/api/v1/admin/films",
        &token,
        json!({"title": "Heat", "release_year": 1995}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Genres, staff and translations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn genres_staff_and_translations_show_on_detail(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = admin_token();
    let id = create_film(
        app.clone(),
        &token,
        json!({"title": "Heat", "release_year": 1995, "published_at": "2024-01-01T00:00:00Z"}),
    )
    .await["id"]
        .as_i64()
        .unwrap();

    let body = json!({"name": "Crime"});
    let response = post_json_auth(app.clone(), "/api/v1/admin/genres", &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let genre_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/admin/films/{id}/genres"),
        &token,
        json!({"genre_ids": [genre_id]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/admin/films/{id}/staff"),
        &token,
        json!({"name": "Dante Spinotti", "role": "Cinematography"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let staff_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/admin/films/{id}/translations/de"),
        &token,
        json!({"synopsis": "Ein Meisterdieb und ein Cop."}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(app.clone(), "/api/v1/films/heat-1995?lang=de").await).await;
    let data = &json["data"];
    assert_eq!(data["genres"][0]["slug"], "crime");
    assert_eq!(data["staff"][0]["name"], "Dante Spinotti");
    assert_eq!(data["film"]["synopsis"], "Ein Meisterdieb und ein Cop.");
    assert_eq!(data["available_languages"][0], "de");

    let uri = format!("/api/v1/admin/staff/{staff_id}");
    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let json = body_json(get(app, "/api/v1/films/heat-1995").await).await;
    assert!(json["data"]["staff"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn translations_need_a_supported_target_language(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = admin_token();
    let id = create_film(app.clone(), &token, json!({"title": "Heat"})).await["id"]
        .as_i64()
        .unwrap();

    for lang in ["en", "xx"] {
        let response = put_json_auth(
            app.clone(),
            &format!("/api/v1/admin/films/{id}/translations/{lang}"),
            &token,
            json!({"title": "Heat"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "lang {lang}");
    }
}

// ---------------------------------------------------------------------------
// Staff picks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn staff_pick_add_replace_and_remove(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = admin_token();
    let id = create_film(
        app.clone(),
        &token,
        json!({"title": "Heat", "published_at": "2024-01-01T00:00:00Z"}),
    )
    .await["id"]
        .as_i64()
        .unwrap();
    let pick = json!({"film_id": id, "picked_by": "Marta"});

    let response = post_json_auth(app.clone(), "/api/v1/admin/staff-picks", &token, pick).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let repick = json!({"film_id": id, "picked_by": "Luis", "note": "Still the best"});
    let response = post_json_auth(app.clone(), "/api/v1/admin/staff-picks", &token, repick).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(get(app.clone(), "/api/v1/staff-picks").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["picked_by"], "Luis");

    let uri = format!("/api/v1/admin/staff-picks/{id}");
    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json_auth(
        app,
        "/api/v1/admin/staff-picks",
        &token,
        json!({"film_id": 999999, "picked_by": "Marta"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Cache invalidation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_writes_invalidate_cached_pages(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token();

    // Prime the cache with an empty listing.
    let json = body_json(get(app.clone(), "/api/v1/films").await).await;
    assert_eq!(json["data"]["results"]["total"], 0);

    create_film(
        app.clone(),
        &token,
        json!({"title": "Heat", "published_at": "2024-01-01T00:00:00Z"}),
    )
    .await;

    let json = body_json(get(app.clone(), "/api/v1/films").await).await;
    assert_eq!(json["data"]["results"]["total"], 1);

    // Rows written behind the API's back stay hidden until the cache is cleared.
    sqlx::query("UPDATE films SET title = 'Heat (1995)'")
        .execute(&pool)
        .await
        .unwrap();
    let json = body_json(get(app.clone(), "/api/v1/films").await).await;
    assert_eq!(json["data"]["results"]["items"][0]["title"], "Heat");

    let uri = "/api/v1/admin/cache/clear";
    let response = post_json_auth(app.clone(), uri, &token, json!({})).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let json = body_json(get(app, "/api/v1/films").await).await;
    assert_eq!(json["data"]["results"]["items"][0]["title"], "Heat (1995)");
}

// ---------------------------------------------------------------------------
// Integrations that are not configured
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unconfigured_integrations_return_503(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = admin_token();
    let id = create_film(
        app.clone(),
        &token,
        json!({"title": "Heat", "published_at": "2024-01-01T00:00:00Z"}),
    )
    .await["id"]
        .as_i64()
        .unwrap();

    let calls = [
        ("POST", "/api/v1/admin/films/import/tmdb".to_string(), json!({"tmdb_id": 949})),
        ("POST", "/api/v1/admin/genres/sync-tmdb".to_string(), json!({})),
        ("POST", format!("/api/v1/admin/films/{id}/translate/fr"), json!({})),
        ("POST", format!("/api/v1/admin/films/{id}/announce"), json!({})),
        ("GET", "/api/v1/admin/tmdb/search?q=heat".to_string(), json!(null)),
    ];

    for (method, uri, body) in calls {
        let response = if method == "GET" {
            get_auth(app.clone(), &uri, &token).await
        } else {
            post_json_auth(app.clone(), &uri, &token, body).await
        };
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE, "{uri}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "SERVICE_UNAVAILABLE");
    }
}
