//! Service layer: business rules for devices, scenes and tests on top of `models`.
//! - Each resource has a repository trait with SeaORM and in-memory implementations.
//! - Parent references are checked here before every write; the store does not enforce them.

pub mod errors;
pub mod device;
pub mod scene;
pub mod test;
pub mod repo;
#[cfg(test)]
pub mod test_support;

pub use errors::ServiceError;
