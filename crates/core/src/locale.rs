//! Site languages and language negotiation.
//!
//! Reviews are written in English and translated into the other site
//! languages. A request picks its language from an explicit `?lang=` query
//! parameter first, then from `Accept-Language`, then falls back to English.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Languages the site is published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Es,
    Fr,
    De,
    It,
    Pt,
}

/// Language the reviews are authored in.
pub const DEFAULT_LANGUAGE: Language = Language::En;

/// All supported languages, default first.
pub const SUPPORTED_LANGUAGES: &[Language] = &[
    Language::En,
    Language::Es,
    Language::Fr,
    Language::De,
    Language::It,
    Language::Pt,
];

impl Language {
    /// Parse a language code such as `es`, `ES` or `es-MX`.
    pub fn parse(code: &str) -> Option<Self> {
        let primary = code.trim().split(['-', '_']).next()?.to_ascii_lowercase();
        match primary.as_str() {
            "en" => Some(Language::En),
            "es" => Some(Language::Es),
            "fr" => Some(Language::Fr),
            "de" => Some(Language::De),
            "it" => Some(Language::It),
            "pt" => Some(Language::Pt),
            _ => None,
        }
    }

    /// ISO 639-1 code as stored in `film_translations.language_code`.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
            Language::It => "it",
            Language::Pt => "pt",
        }
    }

    /// Target language code expected by the DeepL API.
    ///
    /// DeepL deprecated the bare `EN` and `PT` targets in favour of regional
    /// variants.
    pub fn deepl_target(&self) -> &'static str {
        match self {
            Language::En => "EN-US",
            Language::Es => "ES",
            Language::Fr => "FR",
            Language::De => "DE",
            Language::It => "IT",
            Language::Pt => "PT-PT",
        }
    }

    /// Language tag for TMDB requests (`language=` parameter).
    pub fn tmdb_tag(&self) -> &'static str {
        match self {
            Language::En => "en-US",
            Language::Es => "es-ES",
            Language::Fr => "fr-FR",
            Language::De => "de-DE",
            Language::It => "it-IT",
            Language::Pt => "pt-PT",
        }
    }

    /// Whether content in this language comes from `film_translations`.
    pub fn needs_translation(&self) -> bool {
        *self != DEFAULT_LANGUAGE
    }
}

impl Default for Language {
    fn default() -> Self {
        DEFAULT_LANGUAGE
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Pick the response language for a request.
///
/// An unsupported `?lang=` value is ignored rather than rejected.
pub fn negotiate(query_lang: Option<&str>, accept_language: Option<&str>) -> Language {
    if let Some(lang) = query_lang.and_then(Language::parse) {
        return lang;
    }
    accept_language
        .and_then(best_accepted)
        .unwrap_or(DEFAULT_LANGUAGE)
}

/// Highest-weighted supported language in an `Accept-Language` header.
///
/// Weights are capped at 1; an entry whose `q` is not a finite number is skipped.
fn best_accepted(header: &str) -> Option<Language> {
    let mut best: Option<(Language, f32)> = None;
    for entry in header.split(',') {
        let mut parts = entry.split(';');
        let Some(lang) = parts.next().and_then(Language::parse) else {
            continue;
        };
        let quality = match parts.find_map(|p| p.trim().strip_prefix("q=")) {
            None => 1.0,
            Some(q) => match q.trim().parse::<f32>() {
                Ok(q) if q.is_finite() => q.min(1.0),
                _ => continue,
            },
        };
        if quality <= 0.0 {
            continue;
        }
        if best.map_or(true, |(_, q)| quality > q) {
            best = Some((lang, quality));
        }
    }
    best.map(|(lang, _)| lang)
}
