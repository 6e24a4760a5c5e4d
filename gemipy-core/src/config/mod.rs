//! Configuration management
//!
//! Handles loading, validation and updates of the chat options stored in
//! the configuration document.

pub mod loader;
pub mod schema;
pub mod validate;

pub use loader::ConfigManager;
pub use schema::*;
