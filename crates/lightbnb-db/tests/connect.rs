//! Opening the store from a `StoreConfig`.

use lightbnb_db::{Database, StoreConfig};
use lightbnb_types::NewUser;

fn guest() -> NewUser {
    NewUser {
        name: "Eve".into(),
        email: "eve@example.com".into(),
        password: "hash".into(),
    }
}

#[test]
fn in_memory_config_opens_a_private_store() {
    let first = Database::connect(&StoreConfig::in_memory()).unwrap();
    let created = first.create_user(&guest()).unwrap();
    assert_eq!(first.get_user_by_id(created.id).unwrap(), Some(created));

    // Each in-memory connection starts empty.
    let second = Database::connect(&StoreConfig::in_memory()).unwrap();
    assert!(second.get_user_by_email("eve@example.com").unwrap().is_none());
}

#[test]
fn file_config_persists_across_reopen_and_ignores_network_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lightbnb.db");
    let config = StoreConfig {
        host: Some("localhost".into()),
        user: Some("vagrant".into()),
        password: Some("123".into()),
        database: path.to_string_lossy().into_owned(),
        port: Some(5432),
    };
    assert_eq!(config.ignored_settings(), vec!["host", "user", "password", "port"]);

    let created = {
        let db = Database::connect(&config).unwrap();
        db.create_user(&guest()).unwrap()
    };
    assert!(path.exists());

    // Schema bootstrap is idempotent on an existing file.
    let reopened = Database::connect(&config).unwrap();
    assert_eq!(
        reopened.get_user_by_email("eve@example.com").unwrap(),
        Some(created)
    );
}
