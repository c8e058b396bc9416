#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use mygpa_server::cache::ObjectCache;
use mygpa_server::cache::object_cache::moka::MokaCacheWrapper;
use mygpa_server::config::DatabaseConfig;
use mygpa_server::models::users::entities::User;
use mygpa_server::models::users::requests::CreateUserRequest;
use mygpa_server::object_store::{LocalObjectStore, ObjectStore};
use mygpa_server::storage::Storage;
use mygpa_server::storage::sea_orm_storage::SeaOrmStorage;

pub async fn memory_storage() -> Arc<dyn Storage> {
    let database = DatabaseConfig {
        url: ":memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    let storage = SeaOrmStorage::connect(&database)
        .await
        .expect("in-memory database should open");
    Arc::new(storage)
}

pub fn memory_cache() -> Arc<dyn ObjectCache> {
    Arc::new(MokaCacheWrapper::with_capacity(1_000, 300))
}

pub fn temp_root() -> PathBuf {
    std::env::temp_dir().join(format!("mygpa-test-{}", uuid::Uuid::new_v4()))
}

pub fn local_object_store(root: &PathBuf) -> Arc<dyn ObjectStore> {
    Arc::new(LocalObjectStore::new(root, "/api/v1/storage").expect("temp dir should be writable"))
}

pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.com", uuid::Uuid::new_v4().simple())
}

pub async fn create_user(storage: &Arc<dyn Storage>, name: &str) -> User {
    storage
        .create_user(CreateUserRequest {
            email: unique_email(name),
            password: "not-a-real-hash".to_string(),
            name: name.to_string(),
        })
        .await
        .expect("user should be created")
}
