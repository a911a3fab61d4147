//! Integration tests for the film catalog repositories.
//!
//! Exercises the repository layer against a real database:
//! - Published vs draft visibility
//! - Slug derivation and transactional genre linking
//! - Home page sections (top rated, hidden gems)
//! - Filtered listing and counts
//! - Translation upsert and batch lookup
//! - Staff picks

use chrono::{Duration, Utc};
use moviehunt_core::filter::{FilmFilter, FilmSort};
use moviehunt_core::pagination::Pagination;
use moviehunt_db::models::film::{CreateFilm, FilmFlags};
use moviehunt_db::models::genre::CreateGenre;
use moviehunt_db::models::staff_pick::CreateStaffPick;
use moviehunt_db::models::translation::UpsertTranslation;
use moviehunt_db::repositories::{FilmRepo, GenreRepo, StaffPickRepo, TranslationRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn published_film(title: &str, year: i32, rating: f64) -> CreateFilm {
    CreateFilm {
        title: title.to_string(),
        release_year: Some(year),
        rating: Some(rating),
        published_at: Some(Utc::now() - Duration::hours(1)),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Visibility
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_derives_slug(pool: PgPool) {
    let film = FilmRepo::create(&pool, &published_film("La Haine", 1995, 9.0))
        .await
        .unwrap();
    assert_eq!(film.slug, "la-haine-1995");
    assert!(!film.is_hidden_gem);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn drafts_are_hidden_from_public_lookups(pool: PgPool) {
    let draft = FilmRepo::create(
        &pool,
        &CreateFilm {
            title: "Unfinished".into(),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let by_slug = FilmRepo::find_published_by_slug(&pool, &draft.slug)
        .await
        .unwrap();
    assert!(by_slug.is_none());

    // Admin lookup still sees it.
    assert!(FilmRepo::find_by_id(&pool, draft.id).await.unwrap().is_some());

    FilmRepo::publish(&pool, draft.id, Some(Utc::now() - Duration::minutes(1)))
        .await
        .unwrap();
    let by_slug = FilmRepo::find_published_by_slug(&pool, &draft.slug)
        .await
        .unwrap();
    assert!(by_slug.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_slug_violates_unique_constraint(pool: PgPool) {
    FilmRepo::create(&pool, &published_film("Stalker", 1979, 9.5))
        .await
        .unwrap();
    let err = FilmRepo::create(&pool, &published_film("Stalker", 1979, 9.5))
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("expected a database error");
    assert_eq!(db_err.constraint(), Some("uq_films_slug"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_latin_title_uses_tmdb_id_or_is_rejected(pool: PgPool) {
    let imported = FilmRepo::create(
        &pool,
        &CreateFilm {
            title: "東京物語".into(),
            tmdb_id: Some(18148),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(imported.slug, "film-18148");

    let err = FilmRepo::create(
        &pool,
        &CreateFilm {
            title: "東京物語".into(),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    let db_err = err.as_database_error().expect("expected a database error");
    assert_eq!(db_err.constraint(), Some("ck_films_slug_not_blank"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_genres_links_upserted_genres(pool: PgPool) {
    let genres = [
        CreateGenre {
            name: "Crime".into(),
            slug: None,
            tmdb_genre_id: Some(80),
        },
        CreateGenre {
            name: "Thriller".into(),
            slug: None,
            tmdb_genre_id: Some(53),
        },
    ];

    let (film, stored) =
        FilmRepo::create_with_genres(&pool, &published_film("Heat", 1995, 8.5), &genres)
            .await
            .unwrap();
    assert_eq!(stored.len(), 2);

    let linked = GenreRepo::list_for_film(&pool, film.id).await.unwrap();
    let slugs: Vec<_> = linked.iter().map(|g| g.slug.as_str()).collect();
    assert_eq!(slugs, vec!["crime", "thriller"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_genres_writes_nothing_when_a_genre_fails(pool: PgPool) {
    let genres = [
        CreateGenre {
            name: "Crime".into(),
            slug: None,
            tmdb_genre_id: Some(80),
        },
        // Slugifies to "", rejected by ck_genres_slug_not_blank.
        CreateGenre {
            name: "???".into(),
            slug: None,
            tmdb_genre_id: None,
        },
    ];

    let err = FilmRepo::create_with_genres(&pool, &published_film("Heat", 1995, 8.5), &genres)
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("expected a database error");
    assert_eq!(db_err.constraint(), Some("ck_genres_slug_not_blank"));

    let films = FilmRepo::count_filtered(&pool, &FilmFilter::default()).await.unwrap();
    assert_eq!(films, 0);
    assert!(GenreRepo::list_all(&pool).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn top_rated_orders_by_rating(pool: PgPool) {
    FilmRepo::create(&pool, &published_film("Middling", 2001, 6.0))
        .await
        .unwrap();
    FilmRepo::create(&pool, &published_film("Great", 2002, 9.1))
        .await
        .unwrap();
    FilmRepo::create(&pool, &published_film("Good", 2003, 7.5))
        .await
        .unwrap();

    let top = FilmRepo::list_top_rated(&pool, 2).await.unwrap();
    let titles: Vec<_> = top.iter().map(|f| f.title.as_str()).collect();
    assert_eq!(titles, vec!["Great", "Good"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn hidden_gems_only_returns_tagged_films(pool: PgPool) {
    let gem = FilmRepo::create(&pool, &published_film("Gem", 1988, 8.0))
        .await
        .unwrap();
    FilmRepo::create(&pool, &published_film("Blockbuster", 1997, 7.0))
        .await
        .unwrap();

    FilmRepo::set_flags(
        &pool,
        gem.id,
        &FilmFlags {
            is_hidden_gem: Some(true),
            is_hunted: None,
        },
    )
    .await
    .unwrap();

    let gems = FilmRepo::list_hidden_gems(&pool, 10).await.unwrap();
    assert_eq!(gems.len(), 1);
    assert_eq!(gems[0].id, gem.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn carousel_requires_backdrop(pool: PgPool) {
    FilmRepo::create(&pool, &published_film("No Backdrop", 2001, 7.0))
        .await
        .unwrap();
    let with_backdrop = FilmRepo::create(
        &pool,
        &CreateFilm {
            backdrop_url: Some("https://image.tmdb.org/t/p/w1280/b.jpg".into()),
            ..published_film("Backdrop", 2002, 7.5)
        },
    )
    .await
    .unwrap();

    let carousel = FilmRepo::list_carousel(&pool, 5).await.unwrap();
    assert_eq!(carousel.len(), 1);
    assert_eq!(carousel[0].id, with_backdrop.id);
}

// ---------------------------------------------------------------------------
// Filtered listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn filter_by_genre_and_paginate(pool: PgPool) {
    let horror = GenreRepo::upsert_by_slug(
        &pool,
        &CreateGenre {
            name: "Horror".into(),
            slug: None,
            tmdb_genre_id: Some(27),
        },
    )
    .await
    .unwrap();

    for (i, title) in ["Alpha", "Bravo", "Charlie"].iter().enumerate() {
        let film = FilmRepo::create(&pool, &published_film(title, 1980 + i as i32, 7.0))
            .await
            .unwrap();
        GenreRepo::set_film_genres(&pool, film.id, &[horror.id])
            .await
            .unwrap();
    }
    FilmRepo::create(&pool, &published_film("Delta", 1990, 7.0))
        .await
        .unwrap();

    let filter = FilmFilter::default()
        .with_genre(Some("horror"))
        .with_sort(FilmSort::Title);
    let total = FilmRepo::count_filtered(&pool, &filter).await.unwrap();
    assert_eq!(total, 3);

    let page2 = FilmRepo::list_filtered(&pool, &filter, &Pagination::from_params(Some(2), Some(2)))
        .await
        .unwrap();
    assert_eq!(page2.len(), 1);
    assert_eq!(page2[0].title, "Charlie");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_matches_title_and_director_literally(pool: PgPool) {
    FilmRepo::create(
        &pool,
        &CreateFilm {
            director: Some("Agnès Varda".into()),
            ..published_film("Cléo from 5 to 7", 1962, 8.7)
        },
    )
    .await
    .unwrap();
    FilmRepo::create(&pool, &published_film("100% Wolf", 2020, 5.0))
        .await
        .unwrap();

    let by_director = FilmFilter {
        search: Some("varda".into()),
        ..Default::default()
    };
    assert_eq!(FilmRepo::count_filtered(&pool, &by_director).await.unwrap(), 1);

    // `%` must not act as a wildcard.
    let literal = FilmFilter {
        search: Some("0%".into()),
        ..Default::default()
    };
    let found = FilmRepo::list_filtered(&pool, &literal, &Pagination::default())
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "100% Wolf");
}

// ---------------------------------------------------------------------------
// Translations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn translation_upsert_replaces_fields(pool: PgPool) {
    let film = FilmRepo::create(&pool, &published_film("Rashomon", 1950, 9.0))
        .await
        .unwrap();

    TranslationRepo::upsert(
        &pool,
        film.id,
        "es",
        &UpsertTranslation {
            title: Some("Rashomon (es)".into()),
            synopsis: Some("Sinopsis".into()),
            review: None,
        },
    )
    .await
    .unwrap();
    let updated = TranslationRepo::upsert(
        &pool,
        film.id,
        "es",
        &UpsertTranslation {
            title: Some("Rashōmon".into()),
            synopsis: None,
            review: Some("Reseña".into()),
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.title.as_deref(), Some("Rashōmon"));
    assert_eq!(updated.synopsis, None);

    let batch = TranslationRepo::list_for_films(&pool, &[film.id], "es")
        .await
        .unwrap();
    assert_eq!(batch.len(), 1);
    assert!(TranslationRepo::list_for_films(&pool, &[film.id], "fr")
        .await
        .unwrap()
        .is_empty());
    assert_eq!(
        TranslationRepo::list_languages(&pool, film.id).await.unwrap(),
        vec!["es".to_string()]
    );
}

// ---------------------------------------------------------------------------
// Staff picks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn staff_picks_skip_drafts_and_follow_position(pool: PgPool) {
    let first = FilmRepo::create(&pool, &published_film("First", 2010, 8.0))
        .await
        .unwrap();
    let second = FilmRepo::create(&pool, &published_film("Second", 2011, 8.0))
        .await
        .unwrap();
    let draft = FilmRepo::create(
        &pool,
        &CreateFilm {
            title: "Draft".into(),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    for (film_id, position) in [(second.id, 1), (first.id, 2), (draft.id, 0)] {
        StaffPickRepo::add(
            &pool,
            &CreateStaffPick {
                film_id,
                picked_by: "Editor".into(),
                note: None,
                position: Some(position),
            },
        )
        .await
        .unwrap();
    }

    let picks = StaffPickRepo::list(&pool, 10).await.unwrap();
    let titles: Vec<_> = picks.iter().map(|p| p.film.title.as_str()).collect();
    assert_eq!(titles, vec!["Second", "First"]);

    assert!(StaffPickRepo::remove(&pool, second.id).await.unwrap());
    assert!(!StaffPickRepo::remove(&pool, second.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn staff_repick_without_position_keeps_existing_position(pool: PgPool) {
    let film = FilmRepo::create(&pool, &published_film("Yi Yi", 2000, 9.1))
        .await
        .unwrap();
    let pick = |picked_by: &str, position: Option<i32>| CreateStaffPick {
        film_id: film.id,
        picked_by: picked_by.into(),
        note: None,
        position,
    };

    let first = StaffPickRepo::add(&pool, &pick("Ana", Some(3))).await.unwrap();
    assert_eq!(first.position, 3);

    let repicked = StaffPickRepo::add(&pool, &pick("Luis", None)).await.unwrap();
    assert_eq!(repicked.id, first.id);
    assert_eq!(repicked.picked_by, "Luis");
    assert_eq!(repicked.position, 3);

    let moved = StaffPickRepo::add(&pool, &pick("Luis", Some(1))).await.unwrap();
    assert_eq!(moved.position, 1);

    let fresh = FilmRepo::create(&pool, &published_film("Ran", 1985, 9.0))
        .await
        .unwrap();
    let defaulted = StaffPickRepo::add(
        &pool,
        &CreateStaffPick {
            film_id: fresh.id,
            picked_by: "Ana".into(),
            note: None,
            position: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(defaulted.position, 0);
}
