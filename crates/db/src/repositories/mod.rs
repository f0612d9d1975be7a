//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod comic_repo;
pub mod hero_repo;
pub mod job_repo;
pub mod villain_repo;

pub use comic_repo::ComicRepo;
pub use hero_repo::HeroRepo;
pub use job_repo::JobRepo;
pub use villain_repo::VillainRepo;
