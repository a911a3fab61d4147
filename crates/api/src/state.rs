use std::sync::Arc;

use moviehunt_catalog::CatalogService;
use moviehunt_core::error::CoreError;
use moviehunt_deepl::DeeplClient;
use moviehunt_mail::{MailerLiteClient, TransactionalMailer};
use moviehunt_tmdb::TmdbClient;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// Integrations are `None` when their credentials are not configured.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: moviehunt_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Cached page data for the public endpoints.
    pub catalog: Arc<CatalogService>,
    pub tmdb: Option<Arc<TmdbClient>>,
    pub deepl: Option<Arc<DeeplClient>>,
    /// Resend, or SMTP when Resend is not configured.
    pub mailer: Option<Arc<dyn TransactionalMailer>>,
    pub newsletter: Option<Arc<MailerLiteClient>>,
}

impl AppState {
    pub fn tmdb(&self) -> AppResult<&TmdbClient> {
        self.tmdb
            .as_deref()
            .ok_or_else(|| unavailable("TMDB is not configured"))
    }

    pub fn deepl(&self) -> AppResult<&DeeplClient> {
        self.deepl
            .as_deref()
            .ok_or_else(|| unavailable("Translation is not configured"))
    }

    pub fn mailer(&self) -> AppResult<&dyn TransactionalMailer> {
        self.mailer
            .as_deref()
            .ok_or_else(|| unavailable("Email is not configured"))
    }

    pub fn newsletter(&self) -> AppResult<&MailerLiteClient> {
        self.newsletter
            .as_deref()
            .ok_or_else(|| unavailable("Newsletter is not configured"))
    }
}

fn unavailable(msg: &str) -> AppError {
    AppError::Core(CoreError::Unavailable(msg.to_string()))
}
