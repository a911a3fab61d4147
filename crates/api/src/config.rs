use std::path::PathBuf;

use crate::auth::supabase::SupabaseAuthConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except the
/// Supabase JWT secret. Optional integrations (TMDB, DeepL, Resend,
/// MailerLite, SMTP) are configured by their own crates.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Maximum connections in the database pool (default: `10`).
    pub db_max_connections: u32,
    /// Lifetime of cached page data in seconds (default: `300`).
    pub cache_ttl_secs: u64,
    /// Directory of the built front-end, served with cache headers.
    pub static_dir: Option<PathBuf>,
    /// Public site URL, used for links in outgoing email.
    pub site_url: String,
    /// Sender of transactional email.
    pub mail_from: String,
    /// Recipient of contact form messages.
    pub contact_recipient: Option<String>,
    /// Supabase access token verification and admin allow-list.
    pub auth: SupabaseAuthConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                              |
    /// |------------------------|--------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                            |
    /// | `PORT`                 | `3000`                               |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`              |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                 |
    /// | `DB_MAX_CONNECTIONS`   | `10`                                 |
    /// | `CACHE_TTL_SECS`       | `300`                                |
    /// | `STATIC_DIR`           | --                                   |
    /// | `SITE_URL`             | `http://localhost:3000`              |
    /// | `MAIL_FROM`            | `MovieHunt <noreply@moviehunt.app>`  |
    /// | `CONTACT_RECIPIENT`    | --                                   |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let cache_ttl_secs: u64 = std::env::var("CACHE_TTL_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("CACHE_TTL_SECS must be a valid u64");

        let static_dir = std::env::var("STATIC_DIR")
            .ok()
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from);

        let site_url = std::env::var("SITE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .trim_end_matches('/')
            .to_string();

        let mail_from = std::env::var("MAIL_FROM")
            .unwrap_or_else(|_| "MovieHunt <noreply@moviehunt.app>".into());

        let contact_recipient = std::env::var("CONTACT_RECIPIENT")
            .ok()
            .filter(|r| !r.trim().is_empty());

        let auth = SupabaseAuthConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            db_max_connections,
            cache_ttl_secs,
            static_dir,
            site_url,
            mail_from,
            contact_recipient,
            auth,
        }
    }
}
