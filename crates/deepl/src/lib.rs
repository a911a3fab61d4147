//! DeepL translation client.
//!
//! [`DeeplClient`] wraps the `/v2/translate` endpoint. Reviews are authored in
//! English and translated on demand from the admin API; the results are
//! stored in `film_translations` so DeepL is never on the public read path.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Endpoint for paid API keys.
const PRO_BASE_URL: &str = "https://api.deepl.com";

/// Endpoint for free-tier API keys (those ending in `:fx`).
const FREE_BASE_URL: &str = "https://api-free.deepl.com";

/// DeepL accepts at most 50 texts per request.
pub const MAX_TEXTS_PER_REQUEST: usize = 50;

/// Long reviews can take a while to translate.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DeeplError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// 456: the account's character quota is used up.
    #[error("DeepL quota exceeded")]
    QuotaExceeded,

    #[error("DeepL API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The response did not contain one translation per input text.
    #[error("DeepL returned {got} translations for {expected} texts")]
    CountMismatch { expected: usize, got: usize },
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct DeeplConfig {
    pub auth_key: String,
    pub base_url: String,
}

impl DeeplConfig {
    /// Build a config, picking the free or pro endpoint from the key suffix.
    pub fn new(auth_key: String) -> Self {
        let base_url = if auth_key.ends_with(":fx") {
            FREE_BASE_URL
        } else {
            PRO_BASE_URL
        };
        Self {
            auth_key,
            base_url: base_url.to_string(),
        }
    }

    /// Load from `DEEPL_AUTH_KEY`. Returns `None` when unset, which disables
    /// machine translation. `DEEPL_BASE_URL` overrides the endpoint.
    pub fn from_env() -> Option<Self> {
        let key = std::env::var("DEEPL_AUTH_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())?;
        let mut config = Self::new(key);
        if let Ok(base_url) = std::env::var("DEEPL_BASE_URL") {
            config.base_url = base_url;
        }
        Some(config)
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: &'a [String],
    target_lang: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_lang: Option<&'a str>,
    /// Keep paragraph breaks in long reviews.
    preserve_formatting: bool,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<Translation>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Translation {
    pub detected_source_language: Option<String>,
    pub text: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct DeeplClient {
    client: reqwest::Client,
    config: DeeplConfig,
}

impl DeeplClient {
    pub fn new(config: DeeplConfig) -> Result<Self, DeeplError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    /// Translate `texts` into `target_lang` (a DeepL code such as `ES` or `PT-PT`).
    ///
    /// Output order matches input order. Large inputs are split into
    /// batches of [`MAX_TEXTS_PER_REQUEST`]. Empty input makes no request.
    pub async fn translate(
        &self,
        texts: &[String],
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> Result<Vec<String>, DeeplError> {
        let mut out = Vec::with_capacity(texts.len());
        for batch in texts.chunks(MAX_TEXTS_PER_REQUEST) {
            let translations = self.translate_batch(batch, target_lang, source_lang).await?;
            out.extend(translations.into_iter().map(|t| t.text));
        }
        Ok(out)
    }

    /// Translate optional fields, skipping the blank ones.
    ///
    /// Returns a vector aligned with `fields`: `None` stays `None`.
    pub async fn translate_fields(
        &self,
        fields: &[Option<&str>],
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> Result<Vec<Option<String>>, DeeplError> {
        let present: Vec<String> = fields
            .iter()
            .flatten()
            .filter(|f| !f.trim().is_empty())
            .map(|f| f.to_string())
            .collect();
        let mut translated = self
            .translate(&present, target_lang, source_lang)
            .await?
            .into_iter();

        Ok(fields
            .iter()
            .map(|f| match f {
                Some(text) if !text.trim().is_empty() => translated.next(),
                _ => None,
            })
            .collect())
    }

    fn request(
        &self,
        texts: &[String],
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> reqwest::RequestBuilder {
        let body = TranslateRequest {
            text: texts,
            target_lang,
            source_lang,
            preserve_formatting: true,
        };
        self.client
            .post(format!(
                "{}/v2/translate",
                self.config.base_url.trim_end_matches('/')
            ))
            .header(
                reqwest::header::AUTHORIZATION,
                format!("DeepL-Auth-Key {}", self.config.auth_key),
            )
            .json(&body)
    }

    async fn translate_batch(
        &self,
        texts: &[String],
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> Result<Vec<Translation>, DeeplError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let response = self.request(texts, target_lang, source_lang).send().await?;
        let status = response.status();
        if status.as_u16() == 456 {
            tracing::error!("DeepL character quota exceeded");
            return Err(DeeplError::QuotaExceeded);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(DeeplError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TranslateResponse = response.json().await?;
        if parsed.translations.len() != texts.len() {
            return Err(DeeplError::CountMismatch {
                expected: texts.len(),
                got: parsed.translations.len(),
            });
        }
        tracing::debug!(count = texts.len(), target_lang, "DeepL batch translated");
        Ok(parsed.translations)
    }
}
