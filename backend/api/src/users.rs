//! Backend user records and permissions.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::client::{segment, ApiClient};
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Set once permissions were fetched for this value.
    #[serde(skip)]
    permissions_fetched: bool,
}

impl User {
    pub fn new(user_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            roles: Vec::new(),
            permissions: None,
            updated_at: None,
            permissions_fetched: false,
        }
    }

    /// Exact-match permission check, e.g. `"beenamegenerator|*"`.
    ///
    /// An absent or empty permission list is fetched on first use and cached
    /// on this value; a failed fetch counts as no permission.
    pub async fn has_permission(&mut self, api: &ApiClient, permission: &str) -> bool {
        let needs_fetch = self.permissions.as_ref().map_or(true, Vec::is_empty);
        if needs_fetch && !self.permissions_fetched {
            self.permissions_fetched = true;
            match api.user_permissions(&self.user_id).await {
                Ok(permissions) => self.permissions = Some(permissions),
                Err(e) => {
                    warn!(user_id = %self.user_id, error = %e, "Failed to fetch user permissions");
                }
            }
        }
        self.permissions
            .as_deref()
            .is_some_and(|perms| perms.iter().any(|p| p == permission))
    }
}

/// Identity of a chat-platform account, sent when creating or refreshing
/// its backend user.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformUser {
    pub id: String,
    pub username: String,
}

impl ApiClient {
    pub async fn user(&self, user_id: &str) -> Result<User, ApiError> {
        let path = format!("/users/{}", segment(user_id));
        self.request(Method::GET, &path, &[], None::<&()>).await
    }

    pub async fn user_from_platform(&self, platform: &str, platform_id: &str) -> Result<User, ApiError> {
        let path = format!("/users/{}/{}", segment(platform), segment(platform_id));
        self.request(Method::GET, &path, &[], None::<&()>).await
    }

    pub async fn user_permissions(&self, user_id: &str) -> Result<Vec<String>, ApiError> {
        let path = format!("/users/{}/permissions", segment(user_id));
        self.request(Method::GET, &path, &[], None::<&()>).await
    }

    pub async fn update_user(&self, user: &User) -> Result<User, ApiError> {
        let path = format!("/users/{}", segment(&user.user_id));
        self.request(Method::PUT, &path, &[], Some(user)).await
    }

    /// Create or refresh the backend user linked to a platform account.
    pub async fn update_user_platform(
        &self,
        platform: &str,
        platform_id: &str,
        data: &PlatformUser,
    ) -> Result<User, ApiError> {
        let path = format!("/users/{}/{}", segment(platform), segment(platform_id));
        self.request(Method::PUT, &path, &[], Some(data)).await
    }

    /// Look up the backend user for a platform account, creating it on first
    /// sight.
    pub async fn resolve_platform_user(&self, platform: &str, account: &PlatformUser) -> Result<User, ApiError> {
        match self.user_from_platform(platform, &account.id).await {
            Ok(user) => Ok(user),
            Err(e) => {
                warn!(platform, platform_id = %account.id, error = %e, "User lookup failed, registering user");
                self.update_user_platform(platform, &account.id, account).await
            }
        }
    }
}
