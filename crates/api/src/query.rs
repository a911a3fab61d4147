//! Shared query parameter types and the language extractor.

use axum::extract::{FromRequestParts, Query};
use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::request::Parts;
use moviehunt_core::filter::{FilmFilter, FilmSort};
use moviehunt_core::locale::{negotiate, Language};
use moviehunt_core::pagination::Pagination;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct LangParams {
    pub lang: Option<String>,
}

/// The visitor's language: `?lang=` first, then `Accept-Language`, then English.
///
/// Never rejects; unknown values fall through to the next source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lang(pub Language);

impl<S: Send + Sync> FromRequestParts<S> for Lang {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let params = Query::<LangParams>::try_from_uri(&parts.uri)
            .map(|Query(p)| p)
            .unwrap_or_default();
        let accept = parts
            .headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok());
        Ok(Lang(negotiate(params.lang.as_deref(), accept)))
    }
}

/// Query parameters of `GET /films`.
///
/// Kept flat rather than `#[serde(flatten)]`-ing [`FilmFilter`]: flattened
/// structs lose the typed parsing of numbers and booleans in query strings.
#[derive(Debug, Default, Deserialize)]
pub struct FilmsQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub min_rating: Option<f64>,
    #[serde(default)]
    pub hidden_gem: bool,
    #[serde(default)]
    pub hunted: bool,
    pub q: Option<String>,
    #[serde(default)]
    pub sort: FilmSort,
}

impl FilmsQuery {
    pub fn into_parts(self) -> (FilmFilter, Pagination) {
        let pagination = Pagination::from_params(self.page, self.per_page);
        let filter = FilmFilter {
            genre: self.genre,
            year: self.year,
            min_rating: self.min_rating,
            hidden_gem: self.hidden_gem,
            hunted: self.hunted,
            search: self.q,
            sort: self.sort,
        };
        (filter, pagination)
    }
}

/// `?q=&year=` for the admin TMDB search.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub year: Option<i32>,
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    async fn lang_for(uri: &str, accept: Option<&str>) -> Language {
        let mut builder = Request::builder().uri(uri);
        if let Some(accept) = accept {
            builder = builder.header(ACCEPT_LANGUAGE, accept);
        }
        let (mut parts, ()) = builder.body(()).unwrap().into_parts();
        let Ok(Lang(lang)) = Lang::from_request_parts(&mut parts, &()).await;
        lang
    }

    #[tokio::test]
    async fn query_parameter_wins() {
        assert_eq!(lang_for("/films?lang=fr", Some("de")).await, Language::Fr);
    }

    #[tokio::test]
    async fn falls_back_to_accept_language_then_english() {
        assert_eq!(
            lang_for("/films?lang=xx", Some("es-MX,es;q=0.9")).await,
            Language::Es
        );
        assert_eq!(lang_for("/films", None).await, Language::En);
    }

    #[test]
    fn films_query_builds_filter_and_pagination() {
        let (filter, pagination) = FilmsQuery {
            page: Some(2),
            per_page: Some(500),
            hidden_gem: true,
            q: Some("heat".into()),
            sort: FilmSort::TopRated,
            ..Default::default()
        }
        .into_parts();
        assert_eq!(pagination.page(), 2);
        assert_eq!(pagination.per_page(), moviehunt_core::pagination::MAX_PER_PAGE);
        assert!(filter.hidden_gem);
        assert_eq!(filter.search.as_deref(), Some("heat"));
    }
}
