use std::sync::Arc;

use moviehunt_core::error::CoreError;

/// Errors from the catalog. Cached lookups share one fetch between callers,
/// so database errors are reference-counted.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(Arc<sqlx::Error>),
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        CatalogError::Database(Arc::new(err))
    }
}

impl From<Arc<sqlx::Error>> for CatalogError {
    fn from(err: Arc<sqlx::Error>) -> Self {
        CatalogError::Database(err)
    }
}

impl From<Arc<CatalogError>> for CatalogError {
    fn from(err: Arc<CatalogError>) -> Self {
        Arc::unwrap_or_clone(err)
    }
}
