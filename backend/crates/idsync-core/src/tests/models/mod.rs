mod remote_identity;
mod role_name;
mod sync_status;
mod tuning_parameters;
