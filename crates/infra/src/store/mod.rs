//! Group-isolated in-process storage.

pub mod group_store;

pub use group_store::{GroupStore, InMemoryGroupStore, StoreError};
