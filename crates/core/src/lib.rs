//! Catalog template resolution: identifier parsing, version lookup, resource
//! assembly and refresh orchestration, independent of storage and transport.

pub mod catalog_index;
pub mod compat;
pub mod error;
pub mod identifier;
pub mod refresh;
pub mod representation;
pub mod resource;
pub mod service;
pub mod store;
pub mod template;
pub mod types;
pub mod version;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
