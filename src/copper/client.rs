use std::time::Duration;

use reqwest::{header::CONTENT_TYPE, Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::copper::status;
use crate::models::{Activity, Lead, LeadSearchFilter, LeadStatus, ACTIVITY_TYPES};

const COPPER_BASE_URL: &str = "https://api.copper.com/developer_api/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum CopperError {
    #[error("request to Copper failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Copper returned {status} for {endpoint}: {body}")]
    Api {
        status: u16,
        endpoint: String,
        body: String,
    },

    #[error("failed to decode Copper response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unknown activity type id {0}")]
    UnknownActivityType(u64),

    #[error("no Copper status mapping for status code {0}")]
    UnmappedStatusCode(u8),

    #[error("Copper status catalog has no entry named {0:?}")]
    UnknownStatusName(&'static str),
}

pub type Result<T> = std::result::Result<T, CopperError>;

/// Authenticated client for the Copper developer API.
pub struct CopperClient {
    http: Client,
    token: String,
    user_email: String,
}

impl CopperClient {
    pub fn new(config: &Config) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            token: config.api_token.clone(),
            user_email: config.user_email.clone(),
        }
    }

    /// One signed round trip to the Copper API. Non-2xx responses and
    /// transport failures come back as errors, never as silent empty data.
    async fn request<B, T>(&self, method: Method, endpoint: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", COPPER_BASE_URL, endpoint);
        debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, &url)
            .header("X-PW-AccessToken", &self.token)
            .header("X-PW-Application", "developer_api")
            .header("X-PW-UserEmail", &self.user_email)
            .header(CONTENT_TYPE, "application/json");

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Copper API error {} on {}: {}", status, endpoint, body);
            return Err(CopperError::Api {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            error!("Undecodable Copper response from {}: {}", endpoint, e);
            CopperError::Decode(e)
        })
    }

    /// POST `leads/search`.
    pub async fn list_leads(&self, filter: &LeadSearchFilter) -> Result<Vec<Lead>> {
        self.request(Method::POST, "leads/search", Some(filter))
            .await
    }

    /// GET `activity_types` — Copper's live catalog, passed through untouched.
    /// Activity label resolution uses [`ACTIVITY_TYPES`] instead; see
    /// `models::activity_type_name`.
    pub async fn list_activity_types(&self) -> Result<Value> {
        self.request::<(), _>(Method::GET, "activity_types", None)
            .await
    }

    /// POST `leads/{id}/activities`, requesting every known activity type.
    pub async fn list_lead_activities(&self, lead_id: u64) -> Result<Vec<Activity>> {
        let endpoint = format!("leads/{}/activities", lead_id);
        let body = json!({ "activity_types": ACTIVITY_TYPES });

        self.request(Method::POST, &endpoint, Some(&body)).await
    }

    /// GET `lead_statuses` — the live id/name catalog.
    pub async fn list_lead_statuses(&self) -> Result<Vec<LeadStatus>> {
        self.request::<(), _>(Method::GET, "lead_statuses", None)
            .await
    }

    /// Resolves an application status code (0-6) against the live status
    /// catalog and issues the update. An unmapped code fails before any
    /// Copper call is made.
    pub async fn update_lead_status(&self, lead_id: u64, status_code: u8) -> Result<Value> {
        let target_name = status::target_status_name(status_code)
            .ok_or(CopperError::UnmappedStatusCode(status_code))?;

        let statuses = self.list_lead_statuses().await?;
        let status_id = status::resolve_status_id(target_name, &statuses)?;

        info!(
            "Updating lead {} to status {:?} (id {})",
            lead_id, target_name, status_id
        );

        let endpoint = format!("leads/{}", lead_id);
        let body = json!({ "status_id": status_id });

        self.request(Method::PUT, &endpoint, Some(&body)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> CopperClient {
        CopperClient::new(&Config {
            api_token: "test-token".to_string(),
            user_email: "test@example.com".to_string(),
            port: 0,
            lead_tracking_field_id: 1,
            marketing_source_field_id: 2,
            static_dir: "client/build".into(),
        })
    }

    #[tokio::test]
    async fn unmapped_status_code_fails_before_any_request() {
        let err = test_client().update_lead_status(1, 7).await.unwrap_err();
        assert!(matches!(err, CopperError::UnmappedStatusCode(7)));
    }

    #[tokio::test]
    async fn status_code_boundary_is_six() {
        let err = test_client()
            .update_lead_status(1, u8::MAX)
            .await
            .unwrap_err();
        assert!(matches!(err, CopperError::UnmappedStatusCode(u8::MAX)));
    }

    #[test]
    fn undecodable_body_is_a_decode_error() {
        let err = serde_json::from_str::<Vec<Lead>>("<html>rate limited</html>")
            .map_err(CopperError::from)
            .unwrap_err();

        assert!(matches!(err, CopperError::Decode(_)));
        assert!(err.to_string().starts_with("failed to decode Copper response"));
    }
}
