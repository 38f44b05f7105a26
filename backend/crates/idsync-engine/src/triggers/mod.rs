pub mod batch_scheduler;
pub mod batch_sync;
pub mod identity_assertion;
pub mod lazy_sync;
