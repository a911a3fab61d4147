//! `Cache-Control` policy for static assets.
//!
//! Mirrors the service worker strategy: fingerprinted build output is served
//! cache-first, images may be stale while revalidating, and everything else
//! (HTML, manifests, the service worker itself) goes to the network first.

/// One year, the conventional lifetime for immutable assets.
const IMMUTABLE_MAX_AGE_SECS: u64 = 31_536_000;

/// Freshness window for images.
const IMAGE_MAX_AGE_SECS: u64 = 86_400;

/// How long a stale image may be served while it is revalidated.
const IMAGE_STALE_SECS: u64 = 604_800;

const FONT_EXTENSIONS: &[&str] = &["woff", "woff2", "ttf", "otf"];

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "avif", "gif", "svg", "ico"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Content-addressed assets that never change under the same URL.
    CacheFirst,
    /// Images: serve from cache, refresh in the background.
    StaleWhileRevalidate,
    /// Always revalidate with the server.
    NetworkFirst,
}

impl CachePolicy {
    pub fn for_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let file = path.rsplit('/').next().unwrap_or(path);

        // The service worker must never be cached or updates stop reaching clients.
        if file == "sw.js" || file == "service-worker.js" {
            return CachePolicy::NetworkFirst;
        }

        let extension = file
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        if path.starts_with("/_next/static/") || FONT_EXTENSIONS.contains(&extension.as_str()) {
            return CachePolicy::CacheFirst;
        }
        if matches!(extension.as_str(), "js" | "css") && is_fingerprinted(file) {
            return CachePolicy::CacheFirst;
        }
        if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            return CachePolicy::StaleWhileRevalidate;
        }
        CachePolicy::NetworkFirst
    }

    /// Value for the `Cache-Control` response header.
    pub fn header_value(&self) -> String {
        match self {
            CachePolicy::CacheFirst => {
                format!("public, max-age={IMMUTABLE_MAX_AGE_SECS}, immutable")
            }
            CachePolicy::StaleWhileRevalidate => format!(
                "public, max-age={IMAGE_MAX_AGE_SECS}, stale-while-revalidate={IMAGE_STALE_SECS}"
            ),
            CachePolicy::NetworkFirst => "no-cache".to_string(),
        }
    }
}

/// Whether a file name carries a content hash, e.g. `app.3f9a1c2b.js`.
fn is_fingerprinted(file: &str) -> bool {
    file.split('.').any(|segment| {
        segment.len() >= 8 && segment.chars().all(|c| c.is_ascii_hexdigit())
    })
}
