//! Response payloads of the TMDB endpoints we call.
//!
//! Only the fields MovieHunt uses are modelled; serde ignores the rest.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TmdbGenre {
    pub id: i32,
    pub name: String,
}

/// `GET /movie/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MovieDetails {
    pub id: i32,
    pub title: String,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    /// `YYYY-MM-DD`, or empty for unreleased films.
    pub release_date: Option<String>,
    pub runtime: Option<i32>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub production_countries: Vec<ProductionCountry>,
    pub vote_average: Option<f64>,
}

impl MovieDetails {
    /// Release year parsed from `release_date`.
    pub fn release_year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .and_then(|y| y.parse().ok())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProductionCountry {
    pub iso_3166_1: String,
    pub name: String,
}

/// One entry of `GET /movie/{id}/videos`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Video {
    pub key: String,
    pub name: String,
    /// Hosting site, e.g. `"YouTube"` or `"Vimeo"`.
    pub site: String,
    /// `"Trailer"`, `"Teaser"`, `"Clip"`, ...
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub official: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

/// `GET /movie/{id}/credits`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

impl Credits {
    /// Names of everyone credited with `job` (e.g. `"Director"`).
    pub fn crew_with_job(&self, job: &str) -> Vec<&CrewMember> {
        self.crew.iter().filter(|c| c.job == job).collect()
    }

    /// The first `n` billed cast members.
    pub fn top_cast(&self, n: usize) -> Vec<CastMember> {
        let mut cast = self.cast.clone();
        cast.sort_by_key(|c| c.order);
        cast.truncate(n);
        cast
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CastMember {
    pub id: i32,
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CrewMember {
    pub id: i32,
    pub name: String,
    pub job: String,
    pub department: Option<String>,
    pub profile_path: Option<String>,
}

/// One hit of `GET /search/movie`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SearchResult {
    pub id: i32,
    pub title: String,
    pub original_title: Option<String>,
    pub release_date: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchPage {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GenreList {
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_movie_details_and_year() {
        let json = serde_json::json!({
            "id": 603,
            "title": "The Matrix",
            "original_title": "The Matrix",
            "overview": "Set in the 22nd century...",
            "release_date": "1999-03-30",
            "runtime": 136,
            "poster_path": "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg",
            "backdrop_path": null,
            "imdb_id": "tt0133093",
            "genres": [{"id": 28, "name": "Action"}],
            "vote_average": 8.2,
            "budget": 63000000
        });
        let details: MovieDetails = serde_json::from_value(json).unwrap();
        assert_eq!(details.release_year(), Some(1999));
        assert_eq!(details.genres[0].name, "Action");
        assert!(details.production_countries.is_empty());
    }

    #[test]
    fn empty_release_date_has_no_year() {
        let json = serde_json::json!({"id": 1, "title": "TBA", "release_date": ""});
        let details: MovieDetails = serde_json::from_value(json).unwrap();
        assert_eq!(details.release_year(), None);
    }

    #[test]
    fn video_type_field_is_renamed() {
        let json = serde_json::json!({
            "key": "vKQi3bBA1y8", "name": "Trailer", "site": "YouTube",
            "type": "Trailer", "official": true
        });
        let video: Video = serde_json::from_value(json).unwrap();
        assert_eq!(video.kind, "Trailer");
    }

    fn cast_member(id: i32, name: &str, order: i32) -> CastMember {
        CastMember {
            id,
            name: name.into(),
            character: None,
            profile_path: None,
            order,
        }
    }

    #[test]
    fn top_cast_sorts_by_billing_order() {
        let credits = Credits {
            cast: vec![cast_member(2, "B", 1), cast_member(3, "C", 2), cast_member(1, "A", 0)],
            crew: vec![CrewMember {
                id: 9,
                name: "Director Person".into(),
                job: "Director".into(),
                department: Some("Directing".into()),
                profile_path: None,
            }],
        };
        let names: Vec<_> = credits.top_cast(2).into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(credits.crew_with_job("Director").len(), 1);
        assert!(credits.crew_with_job("Composer").is_empty());
    }
}
