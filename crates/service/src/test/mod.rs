//! Tests belong to scenes and carry an on/off state.


pub use service::{BulkFailure, BulkItem, BulkOutcome, TestService, Toggled};
