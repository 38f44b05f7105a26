//! Read access to the identity provider's user directory.

mod directory_client;
mod directory_user;
mod error;
mod http_client;

pub use directory_client::DirectoryClient;
pub use directory_user::DirectoryUser;
pub use error::{DirectoryError, Result as DirectoryResult};
pub use http_client::HttpDirectoryClient;
