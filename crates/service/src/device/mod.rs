//! Devices: the root of the hierarchy. Deleting one removes its scenes.

pub mod repository;
pub mod service;

pub use service::{DeleteAllOutcome, DeviceService};
