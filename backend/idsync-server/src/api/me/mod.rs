#[allow(clippy::module_inception)]
pub mod me;
pub mod me_response;
pub mod user_dto;
