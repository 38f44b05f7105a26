pub mod account_repository;
pub mod role_assignment_repository;
pub mod role_repository;
pub mod sync_lock_repository;
pub mod user_repository;

mod row_mapping;
