//! Client for The Movie Database (TMDB) REST API.
//!
//! Used to prefill new reviews (title, year, runtime, poster) and to enrich
//! film pages with trailers and cast lists.

pub mod client;
pub mod media;
pub mod types;

pub use client::{TmdbClient, TmdbConfig, TmdbError};
pub use media::{image_url, pick_trailer, youtube_url, ImageSize};
