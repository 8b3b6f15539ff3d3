//! Bee name generator: names and the suggestion queue.

use reqwest::Method;
use serde::Deserialize;

use crate::client::{segment, ApiClient};
use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BeeName {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BeeNameSuggestions {
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl ApiClient {
    pub async fn bee_name(&self) -> Result<BeeName, ApiError> {
        self.request(Method::GET, "/bee-name-generator/name", &[], None::<&()>).await
    }

    pub async fn upload_bee_name(&self, name: &str) -> Result<(), ApiError> {
        let path = format!("/bee-name-generator/name/{}", segment(name));
        self.request_empty(Method::POST, &path, None::<&()>).await
    }

    pub async fn delete_bee_name(&self, name: &str) -> Result<(), ApiError> {
        let path = format!("/bee-name-generator/name/{}", segment(name));
        self.request_empty(Method::DELETE, &path, None::<&()>).await
    }

    /// Fetch the next pending suggestion (a page of at most one).
    pub async fn bee_name_suggestions(&self) -> Result<BeeNameSuggestions, ApiError> {
        self.request(Method::GET, "/bee-name-generator/suggestions/1", &[], None::<&()>).await
    }

    pub async fn submit_bee_name_suggestion(&self, name: &str) -> Result<(), ApiError> {
        let path = format!("/bee-name-generator/suggestions/{}", segment(name));
        self.request_empty(Method::POST, &path, None::<&()>).await
    }

    pub async fn accept_bee_name_suggestion(&self, name: &str) -> Result<(), ApiError> {
        let path = format!("/bee-name-generator/suggestions/{}", segment(name));
        self.request_empty(Method::PUT, &path, None::<&()>).await
    }

    pub async fn reject_bee_name_suggestion(&self, name: &str) -> Result<(), ApiError> {
        let path = format!("/bee-name-generator/suggestions/{}", segment(name));
        self.request_empty(Method::DELETE, &path, None::<&()>).await
    }
}
