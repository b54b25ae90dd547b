use http::StatusCode;
use serde_json::Value;

use crate::config;
use crate::services::activities_service::ActivitiesListing;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("response from {url} is not JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("response from {url} has an unexpected shape: {source}")]
    Shape {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{url} answered {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: Value,
    },
}

/// A decoded response. The body is decoded whatever the status, so error
/// payloads from the server reach the caller intact.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

#[derive(Debug, Clone)]
pub struct ParticipantsApi {
    client: reqwest::Client,
    base_url: String,
}

impl ParticipantsApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(config::api_base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn unregister_url(&self, email: &str) -> String {
        format!(
            "{}/unregister?email={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(email)
        )
    }

    pub async fn unregister(&self, email: &str) -> Result<ApiResponse, ClientError> {
        let url = self.unregister_url(email);
        let resp = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        let body: Value = resp
            .json()
            .await
            .map_err(|source| ClientError::Decode { url, source })?;
        Ok(ApiResponse { status, body })
    }

    pub async fn activities(&self) -> Result<ActivitiesListing, ClientError> {
        let url = format!("{}/activities", self.base_url.trim_end_matches('/'));
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        let body: Value = resp.json().await.map_err(|source| ClientError::Decode {
            url: url.clone(),
            source,
        })?;
        if !status.is_success() {
            return Err(ClientError::Status { url, status, body });
        }
        serde_json::from_value(body).map_err(|source| ClientError::Shape { url, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unregister_url_percent_encodes_email() {
        let api = ParticipantsApi::new("http://localhost:8000/");
        assert_eq!(
            api.unregister_url("a@b.com"),
            "http://localhost:8000/unregister?email=a%40b.com"
        );
        assert_eq!(
            api.unregister_url("first last+tag@b.com"),
            "http://localhost:8000/unregister?email=first%20last%2Btag%40b.com"
        );
    }

    #[test]
    fn unregister_url_keeps_unreserved_characters() {
        let api = ParticipantsApi::new("http://localhost:8000");
        assert_eq!(
            api.unregister_url("user.name_x-y~z@b.com"),
            "http://localhost:8000/unregister?email=user.name_x-y~z%40b.com"
        );
    }
}
