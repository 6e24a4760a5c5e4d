//! Session data structures

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::now_iso8601;

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Label used when the turn is replayed inside a prompt
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "Usuario",
            Role::Assistant => "Asistente",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Assistant => f.write_str("assistant"),
        }
    }
}

/// A chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role
    #[serde(rename = "rol")]
    pub role: Role,
    /// Message content
    #[serde(rename = "contenido")]
    pub content: String,
    /// ISO-8601 creation time
    pub timestamp: String,
}

impl ChatMessage {
    /// Create a new chat message stamped with the current time
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: now_iso8601(),
        }
    }

    /// Render as a `Label: content` prompt line
    pub fn to_context_line(&self) -> String {
        format!("{}: {}", self.role.label(), self.content)
    }
}

/// A conversation moved out of the active buffer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchivedConversation {
    /// Position-based id, only unique among retained entries
    pub id: u64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "mensajes")]
    pub messages: Vec<ChatMessage>,
    /// ISO-8601 archive time
    #[serde(rename = "fecha")]
    pub created_at: String,
}

/// The persisted history document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryDocument {
    /// Archived conversations, oldest first
    #[serde(rename = "conversaciones", default)]
    pub conversations: Vec<ArchivedConversation>,
    /// The conversation in progress
    #[serde(rename = "actual", default)]
    pub active: Vec<ChatMessage>,
}
