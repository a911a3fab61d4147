//! HTTP client for the TMDB v3 endpoints.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::types::{
    Credits, GenreList, MovieDetails, SearchPage, SearchResult, TmdbGenre, Video, VideoList,
};

/// Default API root.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// HTTP request timeout for a single TMDB call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// TMDB has no resource at the requested path.
    #[error("TMDB resource not found: {0}")]
    NotFound(String),

    /// TMDB returned a non-2xx status code.
    #[error("TMDB API error ({status}): {body}")]
    Api { status: u16, body: String },
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// How requests authenticate against TMDB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TmdbAuth {
    /// v4 "API Read Access Token", sent as a bearer token.
    Bearer(String),
    /// v3 API key, sent as the `api_key` query parameter.
    ApiKey(String),
}

#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub auth: TmdbAuth,
    pub base_url: String,
}

impl TmdbConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` when neither credential is set, which disables TMDB
    /// enrichment.
    ///
    /// | Variable          | Required | Default                          |
    /// |-------------------|----------|----------------------------------|
    /// | `TMDB_READ_TOKEN` | one of   | --                               |
    /// | `TMDB_API_KEY`    | one of   | --                               |
    /// | `TMDB_BASE_URL`   | no       | `https://api.themoviedb.org/3`   |
    pub fn from_env() -> Option<Self> {
        let auth = match (
            non_empty_env("TMDB_READ_TOKEN"),
            non_empty_env("TMDB_API_KEY"),
        ) {
            (Some(token), _) => TmdbAuth::Bearer(token),
            (None, Some(key)) => TmdbAuth::ApiKey(key),
            (None, None) => return None,
        };
        Some(Self {
            auth,
            base_url: non_empty_env("TMDB_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
        })
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Thin typed wrapper over the TMDB REST API.
pub struct TmdbClient {
    client: reqwest::Client,
    config: TmdbConfig,
}

impl TmdbClient {
    pub fn new(config: TmdbConfig) -> Result<Self, TmdbError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: TmdbConfig) -> Self {
        Self { client, config }
    }

    /// `GET /movie/{id}`.
    pub async fn movie_details(&self, id: i32, language: &str) -> Result<MovieDetails, TmdbError> {
        self.get(&format!("/movie/{id}"), &[("language", language.to_string())])
            .await
    }

    /// `GET /movie/{id}/videos`. Returns videos in `language` plus English ones.
    pub async fn movie_videos(&self, id: i32, language: &str) -> Result<Vec<Video>, TmdbError> {
        let list: VideoList = self
            .get(
                &format!("/movie/{id}/videos"),
                &[
                    ("language", language.to_string()),
                    ("include_video_language", format!("{},en,null", primary(language))),
                ],
            )
            .await?;
        Ok(list.results)
    }

    /// `GET /movie/{id}/credits`.
    pub async fn movie_credits(&self, id: i32) -> Result<Credits, TmdbError> {
        self.get(&format!("/movie/{id}/credits"), &[]).await
    }

    /// `GET /search/movie`, first page only.
    pub async fn search_movie(
        &self,
        query: &str,
        year: Option<i32>,
        language: &str,
    ) -> Result<Vec<SearchResult>, TmdbError> {
        let mut params = vec![
            ("query", query.to_string()),
            ("language", language.to_string()),
            ("include_adult", "false".to_string()),
        ];
        if let Some(year) = year {
            params.push(("year", year.to_string()));
        }
        let page: SearchPage = self.get("/search/movie", &params).await?;
        Ok(page.results)
    }

    /// `GET /genre/movie/list`.
    pub async fn genre_list(&self, language: &str) -> Result<Vec<TmdbGenre>, TmdbError> {
        let list: GenreList = self
            .get("/genre/movie/list", &[("language", language.to_string())])
            .await?;
        Ok(list.genres)
    }

    // ---- private helpers ----

    /// Build an authenticated GET request.
    fn request(&self, path: &str, params: &[(&str, String)]) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        let builder = self.client.get(url).query(params);
        match &self.config.auth {
            TmdbAuth::Bearer(token) => builder.bearer_auth(token),
            TmdbAuth::ApiKey(key) => builder.query(&[("api_key", key)]),
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, TmdbError> {
        let response = self.request(path, params).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(TmdbError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(path, status = status.as_u16(), "TMDB request failed");
            return Err(TmdbError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

/// `es-ES` -> `es`.
fn primary(language: &str) -> &str {
    language.split('-').next().unwrap_or(language)
}
