pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::sqlite_pool::{MIGRATOR, create_pool};
pub use error::{DbError, Result};
pub use repositories::account_repository::AccountRepository;
pub use repositories::role_assignment_repository::RoleAssignmentRepository;
pub use repositories::role_repository::RoleRepository;
pub use repositories::sync_lock_repository::SyncLockRepository;
pub use repositories::user_repository::UserRepository;
