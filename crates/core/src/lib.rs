//! Domain types and pure helpers for MovieHunt.
//!
//! Nothing in this crate performs I/O, so it can be shared by the repository
//! layer, the catalog service and the HTTP handlers alike.

pub mod asset_cache;
pub mod carousel;
pub mod error;
pub mod filter;
pub mod locale;
pub mod pagination;
pub mod slug;
pub mod types;
