//! Session management for conversation history
//!
//! The active conversation and the archive of past conversations live in
//! one JSON document that is rewritten after every change.

pub mod manager;
pub mod store;

pub use manager::{SessionManager, CONTEXT_HEADER, CONTEXT_TURNS, MAX_ACTIVE_MESSAGES};
pub use store::{ArchivedConversation, ChatMessage, HistoryDocument, Role};
