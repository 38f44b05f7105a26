#![allow(dead_code)]

//! Test infrastructure for idsync-server API tests

use idsync_config::Config;
use idsync_core::{NewLocalUser, RemoteIdentity, RoleName};
use idsync_db::{AccountRepository, RoleAssignmentRepository, RoleRepository, UserRepository};
use idsync_directory::{DirectoryClient, DirectoryResult};
use idsync_server::{AppState, SyncServices};

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Directory that always returns the same listing
pub struct StubDirectory {
    pub identities: Vec<RemoteIdentity>,
}

#[async_trait]
impl DirectoryClient for StubDirectory {
    async fn fetch_all(&self) -> DirectoryResult<Vec<RemoteIdentity>> {
        Ok(self.identities.clone())
    }
}

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    idsync_db::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Three directory users: one admin, one with no metadata, one without email
pub fn directory_listing() -> Vec<RemoteIdentity> {
    let admin_metadata = json!({ "name": "Grace Hopper", "role": "Admin" });

    vec![
        RemoteIdentity::new("ext-grace", "Grace@Example.com").with_metadata(
            admin_metadata
                .as_object()
                .cloned()
                .expect("metadata is an object"),
        ),
        RemoteIdentity::new("ext-alan", "alan@example.com"),
        RemoteIdentity {
            external_id: Some("ext-ghost".to_string()),
            ..RemoteIdentity::default()
        },
    ]
}

/// Create AppState for testing
pub async fn create_test_app_state() -> AppState {
    let pool = create_test_pool().await;
    let directory = Arc::new(StubDirectory {
        identities: directory_listing(),
    });
    let sync = SyncServices::new(&pool, &Config::default(), directory);

    AppState {
        pool,
        sync,
        metrics: None,
    }
}

pub const ADMIN_EXTERNAL_ID: &str = "ext-admin";
pub const ADMIN_EMAIL: &str = "admin@example.com";

/// Insert a linked local user holding `role` in the default account
pub async fn seed_linked_user(pool: &SqlitePool, external_id: &str, email: &str, role: RoleName) {
    let mut new_user = NewLocalUser::new(email, "Seeded", "placeholder".to_string());
    new_user.external_id = Some(external_id.to_string());
    let user = UserRepository::new(pool.clone())
        .create(&new_user)
        .await
        .expect("Failed to create user");

    let role = RoleRepository::new(pool.clone())
        .find_by_name(role.as_str())
        .await
        .expect("Failed to read roles")
        .expect("role is seeded");
    let account = AccountRepository::new(pool.clone())
        .find_by_name("Default")
        .await
        .expect("Failed to read accounts")
        .expect("default account is seeded");

    RoleAssignmentRepository::new(pool.clone())
        .attach(user.id, role.id, account.id)
        .await
        .expect("Failed to attach role");
}

/// AppState with one linked Admin user already present
pub async fn create_admin_app_state() -> AppState {
    let state = create_test_app_state().await;
    seed_linked_user(&state.pool, ADMIN_EXTERNAL_ID, ADMIN_EMAIL, RoleName::Admin).await;
    state
}
