//! Serializable page data returned by [`CatalogService`](crate::CatalogService).

use moviehunt_core::carousel::Carousel;
use moviehunt_core::filter::FilmFilter;
use moviehunt_core::locale::Language;
use moviehunt_core::pagination::Page;
use moviehunt_db::models::film::{Film, FilmSummary};
use moviehunt_db::models::genre::Genre;
use moviehunt_db::models::staff::RemarkableStaff;
use moviehunt_db::models::staff_pick::StaffPickEntry;
use moviehunt_tmdb::types::{CastMember, Credits, Video};
use moviehunt_tmdb::{pick_trailer, youtube_url};
use serde::Serialize;

/// Number of billed cast members shown on the detail page.
pub const TOP_CAST: usize = 8;

/// Crew jobs highlighted on the detail page, in display order.
pub const HIGHLIGHTED_JOBS: &[&str] = &[
    "Director",
    "Screenplay",
    "Writer",
    "Director of Photography",
    "Original Music Composer",
    "Editor",
];

#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    pub language: Language,
    pub carousel: CarouselSection,
    pub recent: Vec<FilmSummary>,
    pub top_rated: Vec<FilmSummary>,
    pub hidden_gems: Vec<FilmSummary>,
    pub hunted: Vec<FilmSummary>,
    pub staff_picks: Vec<StaffPickEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CarouselSection {
    pub films: Vec<FilmSummary>,
    pub state: Carousel,
}

impl CarouselSection {
    pub fn new(films: Vec<FilmSummary>) -> Self {
        let state = Carousel::new(films.len());
        Self { films, state }
    }
}

/// The filtered films listing.
#[derive(Debug, Clone, Serialize)]
pub struct FilmsPage {
    pub language: Language,
    pub filter: FilmFilter,
    /// Canonical query string of `filter`, for building page links.
    pub query: String,
    pub results: Page<FilmSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilmDetail {
    pub language: Language,
    pub film: Film,
    pub genres: Vec<Genre>,
    pub staff: Vec<RemarkableStaff>,
    /// Language codes with a stored translation.
    pub available_languages: Vec<String>,
    /// `None` when TMDB is not configured, the film has no TMDB id, or the
    /// lookup failed.
    pub tmdb: Option<TmdbExtras>,
}

/// Metadata pulled live from TMDB for the detail page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TmdbExtras {
    pub trailer: Option<Trailer>,
    pub top_cast: Vec<CastMember>,
    pub crew: Vec<CrewCredit>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trailer {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrewCredit {
    pub job: String,
    pub name: String,
}

impl TmdbExtras {
    pub fn from_parts(videos: &[Video], credits: &Credits) -> Self {
        let trailer = pick_trailer(videos).map(|v| Trailer {
            name: v.name.clone(),
            url: youtube_url(&v.key),
        });
        let crew = HIGHLIGHTED_JOBS
            .iter()
            .flat_map(|job| {
                credits.crew_with_job(job).into_iter().map(|c| CrewCredit {
                    job: c.job.clone(),
                    name: c.name.clone(),
                })
            })
            .collect();
        Self {
            trailer,
            top_cast: credits.top_cast(TOP_CAST),
            crew,
        }
    }
}
