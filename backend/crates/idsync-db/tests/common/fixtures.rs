use idsync_core::NewLocalUser;

use uuid::Uuid;

/// A new-user field set with a random placeholder credential
pub fn new_user(email: &str, external_id: Option<&str>) -> NewLocalUser {
    let mut user = NewLocalUser::new(email, "Test User", format!("pw-{}", Uuid::new_v4()));
    user.external_id = external_id.map(String::from);
    user
}
