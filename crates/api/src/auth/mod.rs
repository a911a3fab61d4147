//! Authentication support.
//!
//! - [`supabase`] -- Supabase access token verification and the admin check.

pub mod supabase;
