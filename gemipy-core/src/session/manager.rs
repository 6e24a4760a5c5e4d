//! Session manager for the active conversation and the archive

use super::store::{ArchivedConversation, ChatMessage, HistoryDocument, Role};
use crate::store::JsonStore;
use crate::utils::now_iso8601;
use tracing::{debug, info, warn};

/// Cap on the active conversation; older messages are evicted first
pub const MAX_ACTIVE_MESSAGES: usize = 20;

/// Number of trailing turns replayed into each prompt
pub const CONTEXT_TURNS: usize = 3;

/// Header placed before the replayed turns
pub const CONTEXT_HEADER: &str = "\nContexto previo:\n";

/// Manages the active conversation and archived conversations
#[derive(Debug)]
pub struct SessionManager {
    store: JsonStore,
    history: HistoryDocument,
}

impl SessionManager {
    /// Load the history document, starting empty if it is missing or corrupt
    pub fn load(store: JsonStore) -> Self {
        let history = store.load_or_default::<HistoryDocument>();
        debug!(
            "Loaded history: {} archived, {} active",
            history.conversations.len(),
            history.active.len()
        );
        Self { store, history }
    }

    /// Messages of the conversation in progress
    pub fn active(&self) -> &[ChatMessage] {
        &self.history.active
    }

    /// Archived conversations, oldest first
    pub fn conversations(&self) -> &[ArchivedConversation] {
        &self.history.conversations
    }

    /// The whole history document
    pub fn document(&self) -> &HistoryDocument {
        &self.history
    }

    /// Append a message to the active conversation and persist
    pub fn append(&mut self, role: Role, content: impl Into<String>) {
        let active = &mut self.history.active;
        active.push(ChatMessage::new(role, content));
        if active.len() > MAX_ACTIVE_MESSAGES {
            let excess = active.len() - MAX_ACTIVE_MESSAGES;
            active.drain(..excess);
        }
        self.persist();
    }

    /// Move the active conversation into the archive.
    ///
    /// Does nothing and returns `None` when the active conversation is empty.
    /// Ids are `archive length + 1`, so they repeat once old entries are
    /// evicted.
    pub fn archive(&mut self, title: &str, max_history: usize) -> Option<ArchivedConversation> {
        if self.history.active.is_empty() {
            return None;
        }

        let id = self.history.conversations.len() as u64 + 1;
        let title = if title.trim().is_empty() {
            format!("Conversation {}", id)
        } else {
            title.to_string()
        };
        let entry = ArchivedConversation {
            id,
            title,
            messages: std::mem::take(&mut self.history.active),
            created_at: now_iso8601(),
        };

        let conversations = &mut self.history.conversations;
        conversations.push(entry.clone());
        if conversations.len() > max_history {
            let excess = conversations.len() - max_history;
            conversations.drain(..excess);
        }

        info!("Archived conversation {} ({})", entry.id, entry.title);
        self.persist();
        Some(entry)
    }

    /// Prompt prefix built from the last few turns.
    ///
    /// Empty when context is disabled or there is nothing to replay.
    pub fn build_context(&self, use_context: bool) -> String {
        if !use_context || self.history.active.is_empty() {
            return String::new();
        }

        let start = self.history.active.len().saturating_sub(CONTEXT_TURNS);
        let mut context = String::from(CONTEXT_HEADER);
        for msg in &self.history.active[start..] {
            context.push_str(&msg.to_context_line());
            context.push('\n');
        }
        context
    }

    /// Replace the active conversation with a copy of an archived one
    pub fn load_conversation(&mut self, raw_id: &str) -> crate::Result<&[ChatMessage]> {
        let id: u64 = raw_id
            .trim()
            .parse()
            .map_err(|_| crate::Error::InvalidConversationId(raw_id.to_string()))?;

        let messages = self
            .history
            .conversations
            .iter()
            .find(|conv| conv.id == id)
            .map(|conv| conv.messages.clone())
            .ok_or(crate::Error::ConversationNotFound(id))?;

        self.history.active = messages;
        info!("Loaded conversation {}", id);
        self.persist();
        Ok(&self.history.active)
    }

    /// Write the history document
    pub fn save(&self) -> crate::Result<()> {
        self.store.save(&self.history)
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            warn!("Failed to persist history: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use tempfile::TempDir;

    fn manager_in(temp_dir: &TempDir) -> SessionManager {
        SessionManager::load(JsonStore::new(temp_dir.path().join("historial.json")))
    }

    #[test]
    fn test_session_manager_creation() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_in(&temp_dir);
        assert!(manager.active().is_empty());
        assert!(manager.conversations().is_empty());
    }

    #[test]
    fn test_append_caps_active_conversation() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = manager_in(&temp_dir);
        for i in 0..25 {
            manager.append(Role::User, format!("Message {}", i));
            assert!(manager.active().len() <= MAX_ACTIVE_MESSAGES);
        }

        assert_eq!(manager.active().len(), MAX_ACTIVE_MESSAGES);
        assert_eq!(manager.active()[0].content, "Message 5");
        assert_eq!(manager.active()[19].content, "Message 24");
    }

    #[test]
    fn test_archive_empty_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = manager_in(&temp_dir);
        assert!(manager.archive("", 10).is_none());
        assert!(manager.conversations().is_empty());
    }

    #[test]
    fn test_archive_default_title_and_clears_active() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = manager_in(&temp_dir);
        manager.append(Role::User, "one");
        let first = manager.archive("", 10).unwrap();
        manager.append(Role::User, "two");
        let second = manager.archive("   ", 10).unwrap();

        assert_eq!(first.title, "Conversation 1");
        assert_eq!(second.title, "Conversation 2");
        assert_eq!(second.id, 2);
        assert!(manager.active().is_empty());
    }

    #[test]
    fn test_archive_retention_evicts_oldest() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = manager_in(&temp_dir);
        for i in 0..5 {
            manager.append(Role::User, format!("turn {}", i));
            manager.archive(&format!("conv {}", i), 3);
            assert!(manager.conversations().len() <= 3);
        }

        let titles: Vec<&str> = manager
            .conversations()
            .iter()
            .map(|c| c.title.as_str())
            .collect();
        assert_eq!(titles, vec!["conv 2", "conv 3", "conv 4"]);
    }

    #[test]
    fn test_archive_ids_repeat_after_eviction() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = manager_in(&temp_dir);
        for i in 0..3 {
            manager.append(Role::User, format!("turn {}", i));
            manager.archive("", 2);
        }

        let ids: Vec<u64> = manager.conversations().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 3]);

        // Two retained entries, so the next id is 3 again.
        manager.append(Role::User, "turn 3");
        let entry = manager.archive("", 2).unwrap();
        assert_eq!(entry.id, 3);
        let ids: Vec<u64> = manager.conversations().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 3]);
    }

    #[test]
    fn test_build_context_disabled() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = manager_in(&temp_dir);
        manager.append(Role::User, "hola");
        assert_eq!(manager.build_context(false), "");
    }

    #[test]
    fn test_build_context_empty_active() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_in(&temp_dir);
        assert_eq!(manager.build_context(true), "");
    }

    #[test]
    fn test_build_context_last_three_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = manager_in(&temp_dir);
        manager.append(Role::User, "m1");
        manager.append(Role::Assistant, "m2");
        manager.append(Role::User, "m3");
        manager.append(Role::Assistant, "m4");
        manager.append(Role::User, "m5");

        assert_eq!(
            manager.build_context(true),
            "\nContexto previo:\nUsuario: m3\nAsistente: m4\nUsuario: m5\n"
        );
    }

    #[test]
    fn test_load_conversation_replaces_active_with_copy() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = manager_in(&temp_dir);
        manager.append(Role::User, "archived question");
        manager.archive("first", 10);
        manager.append(Role::User, "current");

        let loaded = manager.load_conversation("1").unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].content, "archived question");

        manager.append(Role::Assistant, "answer");
        assert_eq!(manager.conversations()[0].messages.len(), 1);
    }

    #[test]
    fn test_load_conversation_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = manager_in(&temp_dir);
        manager.append(Role::User, "keep me");
        manager.archive("", 10);
        manager.append(Role::User, "still here");

        let err = manager.load_conversation("7").unwrap_err();
        assert!(matches!(err, Error::ConversationNotFound(7)));
        assert_eq!(manager.active().len(), 1);
        assert_eq!(manager.active()[0].content, "still here");
    }

    #[test]
    fn test_load_conversation_invalid_id() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = manager_in(&temp_dir);
        manager.append(Role::User, "still here");

        let err = manager.load_conversation("abc").unwrap_err();
        assert!(matches!(err, Error::InvalidConversationId(_)));
        assert_eq!(manager.active().len(), 1);
    }

    #[test]
    fn test_save_and_reload_history() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = manager_in(&temp_dir);
        manager.append(Role::User, "Test message");
        manager.append(Role::Assistant, "Reply");
        manager.archive("saved", 10);
        manager.append(Role::User, "pending");

        let reloaded = manager_in(&temp_dir);
        assert_eq!(reloaded.document(), manager.document());
    }

    #[test]
    fn test_unwritable_store_keeps_memory_state() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        let mut manager = SessionManager::load(JsonStore::new(blocker.join("historial.json")));
        manager.append(Role::User, "hola");
        assert_eq!(manager.active().len(), 1);
        assert!(manager.save().is_err());
    }
}
