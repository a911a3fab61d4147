//! Extractors and middleware shared by the routes.
//!
//! - [`auth::AuthUser`] -- Extracts the signed-in user from a Supabase Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires an admin (role claim or allow-listed email).
//! - [`assets::cache_headers`] -- `Cache-Control` for files served from `STATIC_DIR`.

pub mod assets;
pub mod auth;
pub mod rbac;
