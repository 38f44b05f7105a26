use crate::{LocalUserStore, RoleAccountCatalog, SyncError, SyncLock, SyncResult};

use idsync_core::{
    Account, LocalUser, NewLocalUser, RemoteIdentity, Role, RoleAssignment, RoleName, SyncStatus,
    TuningParameters, normalize_email,
};
use idsync_directory::{DirectoryClient, DirectoryError, DirectoryResult};

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

// =========================================================================
// Store
// =========================================================================

#[derive(Default)]
struct StoreState {
    users: Vec<LocalUser>,
    assignments: Vec<RoleAssignment>,
}

/// In-memory store enforcing the same uniqueness rules as the database.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
    failing_emails: Mutex<HashSet<String>>,
    // email -> external id a concurrent writer inserts just before our create
    racers: Mutex<HashMap<String, Option<String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user directly, bypassing the engine.
    pub fn insert(&self, email: &str, external_id: Option<&str>) -> LocalUser {
        let user = local_user(email, external_id);
        self.state.lock().unwrap().users.push(user.clone());
        user
    }

    /// Make every write for `email` fail with a store error.
    pub fn fail_writes_for(&self, email: &str) {
        self.failing_emails
            .lock()
            .unwrap()
            .insert(normalize_email(email));
    }

    /// Simulate another writer creating `email` between our lookup and insert.
    pub fn race_create(&self, email: &str, external_id: Option<&str>) {
        self.racers
            .lock()
            .unwrap()
            .insert(normalize_email(email), external_id.map(String::from));
    }

    pub fn users(&self) -> Vec<LocalUser> {
        self.state.lock().unwrap().users.clone()
    }

    pub fn user_by_email(&self, email: &str) -> Option<LocalUser> {
        let email = normalize_email(email);
        self.users().into_iter().find(|u| u.email == email)
    }

    pub fn assignments_for(&self, user_id: Uuid) -> Vec<RoleAssignment> {
        self.state
            .lock()
            .unwrap()
            .assignments
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect()
    }

    fn check_failure(&self, email: &str) -> SyncResult<()> {
        if self.failing_emails.lock().unwrap().contains(email) {
            return Err(SyncError::store(format!("disk on fire while writing {}", email)));
        }
        Ok(())
    }
}

fn local_user(email: &str, external_id: Option<&str>) -> LocalUser {
    let now = Utc::now();
    LocalUser {
        id: Uuid::new_v4(),
        email: normalize_email(email),
        name: "Existing".to_string(),
        external_id: external_id.map(String::from),
        current_account_id: None,
        tuning: TuningParameters::default(),
        email_verified_at: None,
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl LocalUserStore for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> SyncResult<Option<LocalUser>> {
        Ok(self.user_by_email(email))
    }

    async fn find_by_external_id(&self, external_id: &str) -> SyncResult<Option<LocalUser>> {
        Ok(self
            .users()
            .into_iter()
            .find(|u| u.external_id.as_deref() == Some(external_id)))
    }

    async fn create(&self, new_user: &NewLocalUser) -> SyncResult<LocalUser> {
        let email = normalize_email(&new_user.email);
        self.check_failure(&email)?;

        if let Some(racer_external_id) = self.racers.lock().unwrap().remove(&email) {
            self.insert(&email, racer_external_id.as_deref());
        }

        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|u| u.email == email) {
            return Err(SyncError::DuplicateEmail {
                email,
                location: crate::tests::here(),
            });
        }
        if let Some(ref external_id) = new_user.external_id
            && state
                .users
                .iter()
                .any(|u| u.external_id.as_ref() == Some(external_id))
        {
            return Err(SyncError::DuplicateExternalId {
                external_id: external_id.clone(),
                location: crate::tests::here(),
            });
        }
        assert!(!new_user.password_placeholder.is_empty());

        let now = Utc::now();
        let user = LocalUser {
            id: Uuid::new_v4(),
            email,
            name: new_user.name.clone(),
            external_id: new_user.external_id.clone(),
            current_account_id: new_user.current_account_id,
            tuning: new_user.tuning,
            email_verified_at: new_user.email_verified_at,
            created_at: now,
            updated_at: now,
        };
        state.users.push(user.clone());

        Ok(user)
    }

    async fn update_external_id(
        &self,
        user: &LocalUser,
        external_id: &str,
    ) -> SyncResult<LocalUser> {
        self.check_failure(&user.email)?;

        let mut state = self.state.lock().unwrap();
        if state
            .users
            .iter()
            .any(|u| u.id != user.id && u.external_id.as_deref() == Some(external_id))
        {
            return Err(SyncError::DuplicateExternalId {
                external_id: external_id.to_string(),
                location: crate::tests::here(),
            });
        }

        let stored = state
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| SyncError::store("user vanished"))?;
        if stored.external_id.is_none() {
            stored.external_id = Some(external_id.to_string());
            stored.updated_at = Utc::now();
        }

        Ok(stored.clone())
    }

    async fn attach_role(
        &self,
        user: &LocalUser,
        role: &Role,
        account: &Account,
    ) -> SyncResult<bool> {
        self.check_failure(&user.email)?;

        let mut state = self.state.lock().unwrap();
        let exists = state.assignments.iter().any(|a| {
            a.user_id == user.id && a.role_id == role.id && a.account_id == account.id
        });
        if exists {
            return Ok(false);
        }

        state.assignments.push(RoleAssignment {
            user_id: user.id,
            role_id: role.id,
            account_id: account.id,
            created_at: Utc::now(),
        });
        Ok(true)
    }

    async fn role_assignments(&self, user: &LocalUser) -> SyncResult<Vec<RoleAssignment>> {
        Ok(self.assignments_for(user.id))
    }

    async fn sync_status(&self) -> SyncResult<SyncStatus> {
        let users = self.users();
        let linked = users.iter().filter(|u| u.is_linked()).count();
        Ok(SyncStatus::new(users.len() as i64, linked as i64))
    }
}

// =========================================================================
// Catalog
// =========================================================================

pub struct FakeCatalog {
    pub roles: Vec<Role>,
    pub accounts: Vec<Account>,
}

impl FakeCatalog {
    /// Every reference role plus the `Default` account.
    pub fn seeded() -> Self {
        Self {
            roles: RoleName::ALL
                .iter()
                .map(|name| Role {
                    id: Uuid::new_v4(),
                    name: name.as_str().to_string(),
                })
                .collect(),
            accounts: vec![Account {
                id: Uuid::new_v4(),
                name: "Default".to_string(),
                is_default: true,
            }],
        }
    }

    pub fn unseeded() -> Self {
        Self {
            roles: Vec::new(),
            accounts: Vec::new(),
        }
    }

    pub fn role(&self, name: RoleName) -> &Role {
        self.roles
            .iter()
            .find(|r| r.name == name.as_str())
            .unwrap()
    }

    pub fn default_account(&self) -> &Account {
        self.accounts.iter().find(|a| a.is_default).unwrap()
    }
}

#[async_trait]
impl RoleAccountCatalog for FakeCatalog {
    async fn resolve_role(&self, name: Option<&str>) -> SyncResult<Role> {
        let wanted = name.unwrap_or(RoleName::default().as_str());
        self.roles
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(wanted))
            .or_else(|| {
                self.roles
                    .iter()
                    .find(|r| r.name == RoleName::default().as_str())
            })
            .cloned()
            .ok_or_else(|| SyncError::catalog_not_seeded("role 'Normal User'"))
    }

    async fn resolve_account(&self, name: Option<&str>) -> SyncResult<Account> {
        name.and_then(|name| {
            self.accounts
                .iter()
                .find(|a| a.name.eq_ignore_ascii_case(name))
        })
        .or_else(|| self.accounts.iter().find(|a| a.is_default))
        .cloned()
        .ok_or_else(|| SyncError::catalog_not_seeded("account 'Default'"))
    }
}

// =========================================================================
// Directory
// =========================================================================

/// Directory returning a fixed listing, optionally after failing first.
#[derive(Default)]
pub struct FakeDirectory {
    identities: Vec<RemoteIdentity>,
    unavailable_calls: u32,
    reject_credentials: bool,
    delay: Option<Duration>,
    calls: AtomicU32,
}

impl FakeDirectory {
    pub fn listing(identities: Vec<RemoteIdentity>) -> Self {
        Self {
            identities,
            ..Self::default()
        }
    }

    /// Fail with `Unavailable` for the first `calls` fetches.
    pub fn unavailable_for(mut self, calls: u32) -> Self {
        self.unavailable_calls = calls;
        self
    }

    pub fn rejecting_credentials(mut self) -> Self {
        self.reject_credentials = true;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DirectoryClient for FakeDirectory {
    async fn fetch_all(&self) -> DirectoryResult<Vec<RemoteIdentity>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.reject_credentials {
            return Err(DirectoryError::auth("invalid api key"));
        }
        if call <= self.unavailable_calls {
            return Err(DirectoryError::unavailable("connection refused"));
        }

        Ok(self.identities.clone())
    }
}

// =========================================================================
// Lock
// =========================================================================

#[derive(Default)]
pub struct InMemoryLock {
    holders: Mutex<HashMap<String, String>>,
    renewals: AtomicUsize,
}

impl InMemoryLock {
    pub fn held_by(name: &str, owner: &str) -> Self {
        let lock = Self::default();
        lock.holders
            .lock()
            .unwrap()
            .insert(name.to_string(), owner.to_string());
        lock
    }

    /// Hand the lease to another owner, as an expired-lease takeover would.
    pub fn steal(&self, name: &str, owner: &str) {
        self.holders
            .lock()
            .unwrap()
            .insert(name.to_string(), owner.to_string());
    }

    pub fn renewals(&self) -> usize {
        self.renewals.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SyncLock for InMemoryLock {
    async fn try_acquire(&self, name: &str, owner: &str, _ttl: Duration) -> SyncResult<bool> {
        let mut holders = self.holders.lock().unwrap();
        if holders.contains_key(name) {
            return Ok(false);
        }
        holders.insert(name.to_string(), owner.to_string());
        Ok(true)
    }

    async fn renew(&self, name: &str, owner: &str, _ttl: Duration) -> SyncResult<bool> {
        self.renewals.fetch_add(1, Ordering::SeqCst);
        let holders = self.holders.lock().unwrap();
        Ok(holders.get(name).map(String::as_str) == Some(owner))
    }

    async fn release(&self, name: &str, owner: &str) -> SyncResult<()> {
        let mut holders = self.holders.lock().unwrap();
        if holders.get(name).map(String::as_str) == Some(owner) {
            holders.remove(name);
        }
        Ok(())
    }

    async fn holder(&self, name: &str) -> SyncResult<Option<String>> {
        Ok(self.holders.lock().unwrap().get(name).cloned())
    }
}
