use gemipy_core::{ConfigManager, JsonStore, Role, SessionManager, StorePaths};
use tempfile::TempDir;

fn open(paths: &StorePaths) -> (SessionManager, ConfigManager) {
    (
        SessionManager::load(JsonStore::new(&paths.history)),
        ConfigManager::load(JsonStore::new(&paths.config)),
    )
}

#[test]
fn test_greeting_is_archived_with_title() {
    let temp_dir = TempDir::new().unwrap();
    let paths = StorePaths::in_dir(temp_dir.path());
    let (mut session, config) = open(&paths);

    session.append(Role::User, "hola");
    session.append(Role::Assistant, "hola!");
    let entry = session
        .archive("greet", config.config().max_history)
        .expect("non-empty conversation is archived");

    assert_eq!(entry.id, 1);
    assert_eq!(entry.title, "greet");
    assert_eq!(entry.messages.len(), 2);
    assert_eq!(entry.messages[0].role, Role::User);
    assert_eq!(entry.messages[0].content, "hola");
    assert_eq!(entry.messages[1].role, Role::Assistant);
    assert_eq!(entry.messages[1].content, "hola!");
    assert!(session.active().is_empty());
    assert_eq!(session.conversations().len(), 1);
}

#[test]
fn test_state_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let paths = StorePaths::in_dir(temp_dir.path());

    let before = {
        let (mut session, mut config) = open(&paths);
        config.set("max_historial", "2").unwrap();
        config.set("usar_contexto", "false").unwrap();
        for i in 0..3 {
            session.append(Role::User, format!("question {}", i));
            session.append(Role::Assistant, format!("answer {}", i));
            session.archive("", config.config().max_history);
        }
        session.append(Role::User, "unfinished");
        session.document().clone()
    };

    let (session, config) = open(&paths);
    assert_eq!(session.document(), &before);
    assert_eq!(session.conversations().len(), 2);
    assert_eq!(config.config().max_history, 2);
    assert!(!config.config().use_context);
    assert_eq!(session.build_context(config.config().use_context), "");
}

#[test]
fn test_corrupt_history_starts_empty() {
    let temp_dir = TempDir::new().unwrap();
    let paths = StorePaths::in_dir(temp_dir.path());
    std::fs::write(&paths.history, "{\"conversaciones\": [").unwrap();

    let (mut session, _config) = open(&paths);
    assert!(session.active().is_empty());
    assert!(session.conversations().is_empty());

    session.append(Role::User, "fresh start");
    let (reloaded, _) = open(&paths);
    assert_eq!(reloaded.active().len(), 1);
}
