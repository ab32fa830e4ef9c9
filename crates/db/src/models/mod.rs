//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` struct matching the database row
//! - A `Deserialize` create DTO used by the synchronization engine and tests
//! - A conversion into the corresponding `catalog_core` domain type

pub mod catalog;
pub mod template;
pub mod version;
