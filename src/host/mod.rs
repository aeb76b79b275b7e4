/// Host platform module
///
/// The content-management host owns all persistence: the app-wide
/// installation parameters and each field's stored value. This module
/// provides the SQLite-backed realization of that store (store.rs).

pub mod store;

pub use store::{HostStore, StoreError};
