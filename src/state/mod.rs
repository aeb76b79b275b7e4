/// State management module
///
/// This module handles all component state, including:
/// - Shared data structures and wire types (data.rs)
/// - Configuration screen state and validation flags (config.rs)
/// - Picker dialog lifecycle and message protocol (dialog.rs)
/// - Field editor asset list and merge policy (field.rs)

pub mod config;
pub mod data;
pub mod dialog;
pub mod field;
