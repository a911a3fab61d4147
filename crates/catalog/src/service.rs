//! Page aggregation over the repositories, the TTL caches and TMDB.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moviehunt_core::error::CoreError;
use moviehunt_core::filter::FilmFilter;
use moviehunt_core::locale::Language;
use moviehunt_core::pagination::{Page, Pagination};
use moviehunt_core::types::DbId;
use moviehunt_db::models::film::{Film, FilmSummary};
use moviehunt_db::models::genre::Genre;
use moviehunt_db::models::staff_pick::StaffPickEntry;
use moviehunt_db::models::translation::FilmTranslation;
use moviehunt_db::repositories::{FilmRepo, GenreRepo, StaffPickRepo, StaffRepo, TranslationRepo};
use moviehunt_db::DbPool;
use moviehunt_tmdb::{TmdbClient, TmdbError};

use crate::cache::TtlCache;
use crate::enrich::{apply_translations, merge_translation, Translatable};
use crate::error::CatalogError;
use crate::pages::{CarouselSection, FilmDetail, FilmsPage, HomePage, TmdbExtras};

/// Tuning knobs for [`CatalogService`].
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// How long page data stays cached.
    pub cache_ttl: Duration,
    /// Capacity bound of each cache.
    pub cache_capacity: u64,
    /// Films per home page section.
    pub section_limit: i64,
    /// Slides in the home page carousel.
    pub carousel_limit: i64,
    /// Films in the staff picks list.
    pub staff_picks_limit: i64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(300),
            cache_capacity: 1_000,
            section_limit: 8,
            carousel_limit: 5,
            staff_picks_limit: 12,
        }
    }
}

/// Builds the data behind every public page.
///
/// Untranslated rows are cached; translations are merged per request so one
/// cached entry serves every language.
pub struct CatalogService {
    pool: DbPool,
    tmdb: Option<Arc<TmdbClient>>,
    config: CatalogConfig,
    sections: TtlCache<Vec<FilmSummary>>,
    picks: TtlCache<Vec<StaffPickEntry>>,
    listings: TtlCache<Page<FilmSummary>>,
    films: TtlCache<Film>,
    genres: TtlCache<Vec<Genre>>,
    extras: TtlCache<TmdbExtras>,
}

impl CatalogService {
    pub fn new(pool: DbPool, tmdb: Option<Arc<TmdbClient>>, config: CatalogConfig) -> Self {
        Self {
            sections: TtlCache::new(config.cache_ttl, config.cache_capacity),
            picks: TtlCache::new(config.cache_ttl, config.cache_capacity),
            listings: TtlCache::new(config.cache_ttl, config.cache_capacity),
            films: TtlCache::new(config.cache_ttl, config.cache_capacity),
            genres: TtlCache::new(config.cache_ttl, config.cache_capacity),
            extras: TtlCache::new(config.cache_ttl, config.cache_capacity),
            pool,
            tmdb,
            config,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Home
    // -----------------------------------------------------------------------

    /// All home page sections, queried concurrently.
    ///
    /// A failing section is logged and rendered empty; the page itself
    /// never fails.
    pub async fn home_page(&self, lang: Language) -> HomePage {
        let pool = &self.pool;
        let limit = self.config.section_limit;
        let carousel_limit = self.config.carousel_limit;

        let (carousel, recent, top_rated, hidden_gems, hunted, staff_picks) = tokio::join!(
            self.section("home:carousel", || FilmRepo::list_carousel(pool, carousel_limit)),
            self.section("home:recent", || FilmRepo::list_recent(pool, limit)),
            self.section("home:top_rated", || FilmRepo::list_top_rated(pool, limit)),
            self.section("home:hidden_gems", || FilmRepo::list_hidden_gems(pool, limit)),
            self.section("home:hunted", || FilmRepo::list_hunted(pool, limit)),
            self.cached_staff_picks(),
        );
        let staff_picks = staff_picks.unwrap_or_else(|e| {
            tracing::warn!(
                section = "home:staff_picks",
                error = %e,
                "Home section failed, rendering empty"
            );
            Vec::new()
        });

        let mut page = HomePage {
            language: lang,
            carousel: CarouselSection::new(carousel),
            recent,
            top_rated,
            hidden_gems,
            hunted,
            staff_picks,
        };

        if lang.needs_translation() {
            let ids: Vec<DbId> = page
                .carousel
                .films
                .iter()
                .chain(&page.recent)
                .chain(&page.top_rated)
                .chain(&page.hidden_gems)
                .chain(&page.hunted)
                .map(|f| f.id)
                .chain(page.staff_picks.iter().map(|p| p.film.id))
                .collect();
            let translations = self.translations_for(&ids, lang).await;
            apply_translations(&mut page.carousel.films, &translations);
            apply_translations(&mut page.recent, &translations);
            apply_translations(&mut page.top_rated, &translations);
            apply_translations(&mut page.hidden_gems, &translations);
            apply_translations(&mut page.hunted, &translations);
            apply_translations(&mut page.staff_picks, &translations);
        }

        page
    }

    async fn section<F, Fut>(&self, name: &'static str, fetch: F) -> Vec<FilmSummary>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<FilmSummary>, sqlx::Error>>,
    {
        match self.sections.get_or_try_insert_with(name, fetch).await {
            Ok(films) => films,
            Err(e) => {
                tracing::warn!(section = name, error = %e, "Home section failed, rendering empty");
                Vec::new()
            }
        }
    }

    // -----------------------------------------------------------------------
    // Listing
    // -----------------------------------------------------------------------

    /// One page of the filtered films listing, with the total count.
    pub async fn films_page(
        &self,
        filter: FilmFilter,
        pagination: Pagination,
        lang: Language,
    ) -> Result<FilmsPage, CatalogError> {
        let filter = filter.normalized();
        filter.validate()?;

        let key = format!(
            "{}|page={}|per_page={}",
            filter.cache_key(),
            pagination.page(),
            pagination.per_page()
        );
        let mut results = self
            .listings
            .get_or_try_insert_with(&key, || async {
                let (items, total) = tokio::try_join!(
                    FilmRepo::list_filtered(&self.pool, &filter, &pagination),
                    FilmRepo::count_filtered(&self.pool, &filter),
                )?;
                Ok::<_, sqlx::Error>(Page::new(items, &pagination, total))
            })
            .await?;
        self.translate(&mut results.items, lang).await;

        Ok(FilmsPage {
            language: lang,
            query: filter.to_query_string(),
            filter,
            results,
        })
    }

    // -----------------------------------------------------------------------
    // Detail
    // -----------------------------------------------------------------------

    /// Everything the film page shows. Only published films are visible.
    pub async fn film_detail(
        &self,
        slug: &str,
        lang: Language,
    ) -> Result<FilmDetail, CatalogError> {
        let mut film = self
            .films
            .get_or_try_insert_with(&format!("film:{slug}"), || async {
                FilmRepo::find_published_by_slug(&self.pool, slug)
                    .await?
                    .ok_or_else(|| {
                        CatalogError::from(CoreError::NotFoundBySlug {
                            entity: "film",
                            slug: slug.to_string(),
                        })
                    })
            })
            .await?;

        let (genres, staff, languages, translation, tmdb) = tokio::join!(
            GenreRepo::list_for_film(&self.pool, film.id),
            StaffRepo::list_for_film(&self.pool, film.id),
            TranslationRepo::list_languages(&self.pool, film.id),
            self.translation_for(film.id, lang),
            self.tmdb_extras(film.tmdb_id, lang),
        );

        if let Some(translation) = translation {
            merge_translation(&mut film, &translation);
        }
        let available_languages = languages.unwrap_or_else(|e| {
            tracing::warn!(film_id = film.id, error = %e, "Failed to list translation languages");
            Vec::new()
        });

        Ok(FilmDetail {
            language: lang,
            film,
            genres: genres?,
            staff: staff?,
            available_languages,
            tmdb,
        })
    }

    async fn tmdb_extras(&self, tmdb_id: Option<i32>, lang: Language) -> Option<TmdbExtras> {
        let client = self.tmdb.as_ref()?;
        let id = tmdb_id?;
        let key = format!("tmdb:{id}:{}", lang.code());

        let result = self
            .extras
            .get_or_try_insert_with(&key, || async {
                let (videos, credits) = tokio::try_join!(
                    client.movie_videos(id, lang.tmdb_tag()),
                    client.movie_credits(id),
                )?;
                Ok::<_, TmdbError>(TmdbExtras::from_parts(&videos, &credits))
            })
            .await;

        match result {
            Ok(extras) => Some(extras),
            Err(e) => {
                tracing::warn!(tmdb_id = id, error = %e, "TMDB enrichment failed");
                None
            }
        }
    }

    // -----------------------------------------------------------------------
    // Genres and staff picks
    // -----------------------------------------------------------------------

    pub async fn genres(&self) -> Result<Vec<Genre>, CatalogError> {
        let genres = self
            .genres
            .get_or_try_insert_with("genres", || GenreRepo::list_all(&self.pool))
            .await?;
        Ok(genres)
    }

    pub async fn staff_picks(&self, lang: Language) -> Result<Vec<StaffPickEntry>, CatalogError> {
        let mut picks = self.cached_staff_picks().await?;
        self.translate(&mut picks, lang).await;
        Ok(picks)
    }

    async fn cached_staff_picks(&self) -> Result<Vec<StaffPickEntry>, Arc<sqlx::Error>> {
        self.picks
            .get_or_try_insert_with("staff_picks", || {
                StaffPickRepo::list(&self.pool, self.config.staff_picks_limit)
            })
            .await
    }

    // -----------------------------------------------------------------------
    // Translations
    // -----------------------------------------------------------------------

    async fn translate<T: Translatable>(&self, items: &mut [T], lang: Language) {
        if !lang.needs_translation() || items.is_empty() {
            return;
        }
        let ids: Vec<DbId> = items.iter().map(Translatable::film_id).collect();
        let translations = self.translations_for(&ids, lang).await;
        apply_translations(items, &translations);
    }

    /// Translations for `ids`; empty when the lookup fails.
    async fn translations_for(&self, ids: &[DbId], lang: Language) -> Vec<FilmTranslation> {
        match TranslationRepo::list_for_films(&self.pool, ids, lang.code()).await {
            Ok(translations) => translations,
            Err(e) => {
                tracing::warn!(
                    lang = %lang,
                    error = %e,
                    "Failed to load translations, serving originals"
                );
                Vec::new()
            }
        }
    }

    async fn translation_for(&self, film_id: DbId, lang: Language) -> Option<FilmTranslation> {
        if !lang.needs_translation() {
            return None;
        }
        match TranslationRepo::find(&self.pool, film_id, lang.code()).await {
            Ok(translation) => translation,
            Err(e) => {
                tracing::warn!(
                    film_id,
                    lang = %lang,
                    error = %e,
                    "Failed to load translation, serving original"
                );
                None
            }
        }
    }

    // -----------------------------------------------------------------------
    // Invalidation
    // -----------------------------------------------------------------------

    /// Drop every cached page. Called after admin writes.
    pub fn invalidate(&self) {
        self.sections.invalidate_all();
        self.picks.invalidate_all();
        self.listings.invalidate_all();
        self.films.invalidate_all();
        self.genres.invalidate_all();
        self.extras.invalidate_all();
        tracing::debug!("Catalog caches invalidated");
    }
}
