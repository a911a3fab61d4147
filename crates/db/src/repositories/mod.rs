//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod film_repo;
pub mod genre_repo;
pub mod staff_pick_repo;
pub mod staff_repo;
pub mod translation_repo;

pub use film_repo::FilmRepo;
pub use genre_repo::GenreRepo;
pub use staff_pick_repo::StaffPickRepo;
pub use staff_repo::StaffRepo;
pub use translation_repo::TranslationRepo;
