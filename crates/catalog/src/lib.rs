//! Page data for the public site.
//!
//! [`CatalogService`] aggregates the repository queries each page needs,
//! keeps the results in short-lived in-memory caches and merges in the
//! visitor's translations.

pub mod cache;
pub mod enrich;
pub mod error;
pub mod pages;
pub mod service;

pub use cache::TtlCache;
pub use error::CatalogError;
pub use service::{CatalogConfig, CatalogService};
