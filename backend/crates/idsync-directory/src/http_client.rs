use crate::directory_user::UserListPage;
use crate::{DirectoryClient, DirectoryError, DirectoryResult};

use idsync_config::DirectoryConfig;
use idsync_core::RemoteIdentity;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, StatusCode};

// Upper bound on pages walked in one listing, in case the server ignores
// the paging parameters.
const MAX_PAGES: u32 = 10_000;

/// HTTP client for the identity provider's admin user listing
pub struct HttpDirectoryClient {
    pub base_url: String,
    pub users_path: String,
    api_key: Option<String>,
    per_page: u32,
    client: ReqwestClient,
}

impl HttpDirectoryClient {
    /// Create a client from directory configuration
    ///
    /// The configured timeout bounds every request, so a hung directory
    /// surfaces as [`DirectoryError::Unavailable`].
    pub fn new(config: &DirectoryConfig) -> DirectoryResult<Self> {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DirectoryError::unavailable(format!("Failed to build client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            users_path: config.users_path.clone(),
            api_key: config
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
            per_page: config.per_page.max(1),
            client,
        })
    }

    fn api_key(&self) -> DirectoryResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| DirectoryError::auth("directory.api_key is not configured"))
    }

    async fn fetch_page(&self, page: u32) -> DirectoryResult<Vec<crate::DirectoryUser>> {
        let api_key = self.api_key()?;
        let url = format!(
            "{}{}?page={}&per_page={}",
            self.base_url, self.users_path, page, self.per_page
        );

        let response = self
            .client
            .get(&url)
            .header("apikey", api_key)
            .header("Authorization", format!("Bearer {}", api_key))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(DirectoryError::auth(format!(
                "directory rejected credentials ({})",
                status
            )));
        }
        if !status.is_success() {
            return Err(DirectoryError::unavailable(format!(
                "directory returned {}",
                status
            )));
        }

        let body = response.text().await?;
        let page: UserListPage = serde_json::from_str(&body).map_err(|e| {
            DirectoryError::unavailable(format!("undecodable user listing: {}", e))
        })?;

        Ok(page.into_users())
    }
}

#[async_trait]
impl DirectoryClient for HttpDirectoryClient {
    async fn fetch_all(&self) -> DirectoryResult<Vec<RemoteIdentity>> {
        let mut identities = Vec::new();
        let mut previous_first_id: Option<String> = None;

        for page in 1..=MAX_PAGES {
            let users = self.fetch_page(page).await?;
            let count = users.len();

            let first_id = users.first().and_then(|u| u.id.clone());
            if page > 1 && first_id.is_some() && first_id == previous_first_id {
                log::warn!(
                    "Directory returned page {} identical to page {}, assuming no paging support",
                    page,
                    page - 1
                );
                break;
            }
            previous_first_id = first_id;

            identities.extend(users.into_iter().map(RemoteIdentity::from));

            if count < self.per_page as usize {
                break;
            }
        }

        log::debug!("Fetched {} remote identities", identities.len());

        Ok(identities)
    }
}
