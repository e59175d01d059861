//! Storage backend tests (tokio runtime, temporary directories).

use newsagent_core::ports::StoragePort;
use newsagent_platform::storage::{open_storage, FileStorage, MemoryStorage};
use newsagent_types::config::{StorageBackendType, StorageConfig};

// ─── MemoryStorage Tests ─────────────────────────────────

#[tokio::test]
async fn memory_storage_backend_name() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.backend_name(), "memory");
}

#[tokio::test]
async fn memory_storage_set_get_overwrite() {
    let storage = MemoryStorage::new();
    assert!(storage.get("key").await.unwrap().is_none());
    storage.set("key", b"v1").await.unwrap();
    storage.set("key", b"v2").await.unwrap();
    assert_eq!(storage.get("key").await.unwrap(), Some(b"v2".to_vec()));
    assert!(storage.exists("key").await.unwrap());
}

#[tokio::test]
async fn memory_storage_delete_and_list() {
    let storage = MemoryStorage::new();
    storage.set("agent/a", b"1").await.unwrap();
    storage.set("agent/b", b"2").await.unwrap();
    storage.set("other", b"3").await.unwrap();
    storage.delete("agent/a").await.unwrap();
    storage.delete("nonexistent").await.unwrap();

    let keys = storage.list_keys("agent/").await.unwrap();
    assert_eq!(keys, vec!["agent/b".to_string()]);
}

// ─── FileStorage Tests ───────────────────────────────────

#[tokio::test]
async fn file_storage_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::open(dir.path().join("conversations")).await.unwrap();
    assert_eq!(storage.backend_name(), "file");
    assert_eq!(storage.root(), dir.path().join("conversations").as_path());
    assert!(storage.list_keys("").await.unwrap().is_empty());

    assert!(storage.get("agent/1").await.unwrap().is_none());
    storage.set("agent/1", b"{\"items\":[]}").await.unwrap();
    assert_eq!(storage.get("agent/1").await.unwrap(), Some(b"{\"items\":[]}".to_vec()));

    storage.set("agent/1", b"{}").await.unwrap();
    assert_eq!(storage.get("agent/1").await.unwrap(), Some(b"{}".to_vec()));
}

#[tokio::test]
async fn file_storage_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let storage = FileStorage::open(dir.path()).await.unwrap();
        storage.set("agent/kept", b"state").await.unwrap();
    }
    let reopened = FileStorage::open(dir.path()).await.unwrap();
    assert_eq!(reopened.get("agent/kept").await.unwrap(), Some(b"state".to_vec()));
}

#[tokio::test]
async fn file_storage_list_and_delete() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::open(dir.path()).await.unwrap();
    storage.set("agent/a", b"1").await.unwrap();
    storage.set("agent/b", b"2").await.unwrap();
    storage.set("config", b"3").await.unwrap();

    let mut keys = storage.list_keys("agent/").await.unwrap();
    keys.sort();
    assert_eq!(keys, vec!["agent/a".to_string(), "agent/b".to_string()]);

    storage.delete("agent/a").await.unwrap();
    storage.delete("agent/a").await.unwrap();
    assert!(!storage.exists("agent/a").await.unwrap());
    assert_eq!(storage.list_keys("").await.unwrap().len(), 2);
}

// ─── open_storage Tests ──────────────────────────────────

#[tokio::test]
async fn open_storage_memory() {
    let config = StorageConfig {
        backend: StorageBackendType::Memory,
        path: String::new(),
    };
    let storage = open_storage(&config).await.unwrap();
    assert_eq!(storage.backend_name(), "memory");
}

#[tokio::test]
async fn open_storage_auto_prefers_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        backend: StorageBackendType::Auto,
        path: dir.path().join("store").to_string_lossy().into_owned(),
    };
    let storage = open_storage(&config).await.unwrap();
    assert_eq!(storage.backend_name(), "file");
}

#[tokio::test]
async fn open_storage_auto_falls_back_to_memory() {
    let dir = tempfile::tempdir().unwrap();
    // a regular file where the directory should be
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"x").unwrap();

    let auto = StorageConfig {
        backend: StorageBackendType::Auto,
        path: blocker.to_string_lossy().into_owned(),
    };
    assert_eq!(open_storage(&auto).await.unwrap().backend_name(), "memory");

    let strict = StorageConfig {
        backend: StorageBackendType::File,
        ..auto
    };
    assert!(open_storage(&strict).await.is_err());
}
