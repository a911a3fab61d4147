//! Film listing filters and their query-string form.
//!
//! The listing page keeps all of its filter state in the URL, so a filter
//! must round-trip through query parameters and every toggle must be
//! idempotent: applying the same change twice yields the same URL.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Earliest release year accepted in a filter.
pub const MIN_YEAR: i32 = 1870;

/// Latest release year accepted in a filter.
pub const MAX_YEAR: i32 = 2100;

/// Maximum length of a free-text search term.
pub const MAX_SEARCH_LEN: usize = 100;

/// Sort order for film listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilmSort {
    /// Most recently published first.
    #[default]
    Recent,
    /// Highest rating first.
    TopRated,
    /// Alphabetical by title.
    Title,
    /// Newest release year first.
    ReleaseYear,
}

impl FilmSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilmSort::Recent => "recent",
            FilmSort::TopRated => "top_rated",
            FilmSort::Title => "title",
            FilmSort::ReleaseYear => "release_year",
        }
    }
}

/// Filter state of the film listing page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilmFilter {
    /// Genre slug.
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub min_rating: Option<f64>,
    #[serde(default)]
    pub hidden_gem: bool,
    #[serde(default)]
    pub hunted: bool,
    /// Free-text search over title, original title and director.
    #[serde(default, rename = "q")]
    pub search: Option<String>,
    #[serde(default)]
    pub sort: FilmSort,
}

impl FilmFilter {
    /// Trim text fields and drop the empty ones.
    pub fn normalized(mut self) -> Self {
        self.genre = non_blank(self.genre.take()).map(|g| g.to_lowercase());
        self.search = non_blank(self.search.take());
        self
    }

    /// Check value ranges. Call after [`normalized`](Self::normalized).
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(rating) = self.min_rating {
            if !(0.0..=10.0).contains(&rating) {
                return Err(CoreError::Validation(format!(
                    "min_rating must be between 0 and 10, got {rating}"
                )));
            }
        }
        if let Some(year) = self.year {
            if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
                return Err(CoreError::Validation(format!(
                    "year must be between {MIN_YEAR} and {MAX_YEAR}, got {year}"
                )));
            }
        }
        if let Some(search) = &self.search {
            if search.chars().count() > MAX_SEARCH_LEN {
                return Err(CoreError::Validation(format!(
                    "search must be at most {MAX_SEARCH_LEN} characters"
                )));
            }
        }
        Ok(())
    }

    /// Whether no filter is applied (default sort included).
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn toggle_hidden_gem(mut self) -> Self {
        self.hidden_gem = !self.hidden_gem;
        self
    }

    pub fn toggle_hunted(mut self) -> Self {
        self.hunted = !self.hunted;
        self
    }

    /// Set the hidden-gem flag explicitly. Setting the current value is a no-op.
    pub fn with_hidden_gem(mut self, on: bool) -> Self {
        self.hidden_gem = on;
        self
    }

    /// Set the hunted flag explicitly. Setting the current value is a no-op.
    pub fn with_hunted(mut self, on: bool) -> Self {
        self.hunted = on;
        self
    }

    /// Select a genre, or clear it with `None`.
    pub fn with_genre(mut self, genre: Option<&str>) -> Self {
        self.genre = non_blank(genre.map(str::to_string)).map(|g| g.to_lowercase());
        self
    }

    /// Select `genre`, or clear the selection when it is already selected.
    pub fn toggle_genre(self, genre: &str) -> Self {
        let genre = genre.trim().to_lowercase();
        if self.genre.as_deref() == Some(genre.as_str()) {
            self.with_genre(None)
        } else {
            self.with_genre(Some(&genre))
        }
    }

    pub fn with_year(mut self, year: Option<i32>) -> Self {
        self.year = year;
        self
    }

    pub fn with_sort(mut self, sort: FilmSort) -> Self {
        self.sort = sort;
        self
    }

    /// Canonical query string. Parameters appear in a fixed order and
    /// default values are omitted, so equal filters give equal strings.
    pub fn to_query_string(&self) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        if let Some(genre) = &self.genre {
            query.append_pair("genre", genre);
        }
        if let Some(year) = self.year {
            query.append_pair("year", &year.to_string());
        }
        if let Some(rating) = self.min_rating {
            query.append_pair("min_rating", &rating.to_string());
        }
        if self.hidden_gem {
            query.append_pair("hidden_gem", "true");
        }
        if self.hunted {
            query.append_pair("hunted", "true");
        }
        if let Some(search) = &self.search {
            query.append_pair("q", search);
        }
        if self.sort != FilmSort::default() {
            query.append_pair("sort", self.sort.as_str());
        }
        query.finish()
    }

    /// Stable cache key for this filter.
    pub fn cache_key(&self) -> String {
        format!("filter:{}", self.to_query_string())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn empty_filter_has_empty_query() {
        assert_eq!(FilmFilter::default().to_query_string(), "");
        assert!(FilmFilter::default().is_empty());
    }

    #[test]
    fn query_string_has_canonical_order() {
        let filter = FilmFilter::default()
            .with_sort(FilmSort::TopRated)
            .with_hunted(true)
            .with_genre(Some("Drama"))
            .with_year(Some(1999));
        assert_eq!(
            filter.to_query_string(),
            "genre=drama&year=1999&hunted=true&sort=top_rated"
        );
    }

    #[test]
    fn search_is_url_encoded() {
        let filter = FilmFilter {
            search: Some("la haine & co".into()),
            ..Default::default()
        };
        assert_eq!(filter.to_query_string(), "q=la+haine+%26+co");
    }

    #[test]
    fn setting_same_value_twice_is_idempotent() {
        let once = FilmFilter::default().with_hidden_gem(true);
        let twice = once.clone().with_hidden_gem(true);
        assert_eq!(once.to_query_string(), twice.to_query_string());

        let once = FilmFilter::default().with_genre(Some("horror"));
        let twice = once.clone().with_genre(Some("horror"));
        assert_eq!(once, twice);
    }

    #[test]
    fn double_toggle_restores_original_query() {
        let base = FilmFilter::default().with_genre(Some("comedy"));
        let toggled = base.clone().toggle_hidden_gem().toggle_hidden_gem();
        assert_eq!(base.to_query_string(), toggled.to_query_string());

        let hunted = base.clone().toggle_hunted();
        assert!(hunted.hunted);
        assert_eq!(base, hunted.toggle_hunted());
    }

    #[test]
    fn toggling_selected_genre_clears_it() {
        let filter = FilmFilter::default().toggle_genre("Western");
        assert_eq!(filter.genre.as_deref(), Some("western"));
        let filter = filter.toggle_genre("western");
        assert_eq!(filter.genre, None);
    }

    #[test]
    fn normalized_drops_blank_fields() {
        let filter = FilmFilter {
            genre: Some("  ".into()),
            search: Some("  kurosawa ".into()),
            ..Default::default()
        }
        .normalized();
        assert_eq!(filter.genre, None);
        assert_eq!(filter.search.as_deref(), Some("kurosawa"));
    }

    #[test]
    fn validate_rejects_out_of_range_rating() {
        let filter = FilmFilter {
            min_rating: Some(11.0),
            ..Default::default()
        };
        assert_matches!(filter.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn validate_rejects_out_of_range_year() {
        let filter = FilmFilter::default().with_year(Some(1700));
        assert_matches!(filter.validate(), Err(CoreError::Validation(_)));
        assert!(FilmFilter::default().with_year(Some(1975)).validate().is_ok());
    }

    #[test]
    fn cache_key_distinguishes_filters() {
        let a = FilmFilter::default().with_hunted(true);
        let b = FilmFilter::default().with_hidden_gem(true);
        assert_ne!(a.cache_key(), b.cache_key());
        assert_eq!(a.cache_key(), a.clone().cache_key());
    }

    #[test]
    fn deserializes_from_json_params() {
        let filter: FilmFilter = serde_json::from_value(serde_json::json!({
            "genre": "drama",
            "hidden_gem": true,
            "q": "noir",
            "sort": "release_year"
        }))
        .unwrap();
        assert_eq!(filter.genre.as_deref(), Some("drama"));
        assert!(filter.hidden_gem);
        assert_eq!(filter.search.as_deref(), Some("noir"));
        assert_eq!(filter.sort, FilmSort::ReleaseYear);
    }
}
