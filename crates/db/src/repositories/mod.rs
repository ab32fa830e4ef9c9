//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod catalog_repo;
pub mod template_repo;
pub mod version_repo;

pub use catalog_repo::CatalogRepo;
pub use template_repo::TemplateRepo;
pub use version_repo::VersionRepo;
