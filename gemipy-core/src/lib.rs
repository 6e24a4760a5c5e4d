//! Core types for gemipy
//!
//! This crate owns everything with state: the persisted JSON documents,
//! the chat configuration and the conversation history. The CLI and the
//! query dispatcher only call into it.

pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod store;
pub mod utils;

pub use config::{ChatConfig, ConfigKey, ConfigManager, ConfigValue, LoggingConfig};
pub use error::{Error, Result};
pub use session::{ArchivedConversation, ChatMessage, HistoryDocument, Role, SessionManager};
pub use store::{JsonStore, StorePaths};
