pub mod account;
pub mod local_user;
pub mod new_local_user;
pub mod remote_identity;
pub mod role;
pub mod role_assignment;
pub mod role_name;
pub mod sync_status;
pub mod tuning_parameters;
