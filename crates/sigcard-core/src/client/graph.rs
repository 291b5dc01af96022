//! Contacts API client (Microsoft Graph `/me/contacts`).

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use super::{AccessToken, ContactsApi};
use crate::error::{Result, SigcardError};
use crate::models::config::GraphConfig;
use crate::models::contact::{ContactRecord, CreatedContact};

const USER_AGENT: &str = concat!("sigcard/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the contact-creation endpoint.
#[derive(Debug, Clone)]
pub struct GraphContactsClient {
    http: reqwest::Client,
    base_url: String,
}

impl GraphContactsClient {
    /// Create a client from configuration.
    pub fn new(config: &GraphConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn contacts_url(&self) -> String {
        format!("{}/me/contacts", self.base_url)
    }
}

#[async_trait]
impl ContactsApi for GraphContactsClient {
    async fn create_contact(
        &self,
        token: &AccessToken,
        contact: &ContactRecord,
    ) -> Result<CreatedContact> {
        let url = self.contacts_url();
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(token.secret())
            .json(contact)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SigcardError::RemoteCreate {
                status: status.as_u16(),
                body,
            });
        }

        let created: CreatedContact = response.json().await?;
        info!("created contact {} ({})", created.record.display_name, created.id);

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::contact::ExtractionResult;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GraphContactsClient {
        let config = GraphConfig {
            base_url: format!("{}/v1.0/", server.uri()),
            ..GraphConfig::default()
        };
        GraphContactsClient::new(&config).unwrap()
    }

    fn marie() -> ContactRecord {
        ContactRecord::from_fields(&ExtractionResult {
            full_name: "Marie Curie".to_string(),
            phone: "0612345678".to_string(),
            email: "marie@example.fr".to_string(),
        })
    }

    #[tokio::test]
    async fn test_create_contact_success() {
        let server = MockServer::start().await;
        let record = marie();

        let mut response = serde_json::to_value(&record).unwrap();
        response["id"] = serde_json::json!("AAMkAGI2");

        Mock::given(method("POST"))
            .and(path("/v1.0/me/contacts"))
            .and(header("authorization", "Bearer secret-token"))
            .and(body_json(&record))
            .respond_with(ResponseTemplate::new(201).set_body_json(response))
            .expect(1)
            .mount(&server)
            .await;

        let created = client_for(&server)
            .create_contact(&AccessToken::new("secret-token"), &record)
            .await
            .unwrap();

        assert_eq!(created.id, "AAMkAGI2");
        assert_eq!(created.record, record);
    }

    #[tokio::test]
    async fn test_create_contact_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1.0/me/contacts"))
            .respond_with(ResponseTemplate::new(403).set_body_string("ErrorAccessDenied"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .create_contact(&AccessToken::new("t"), &marie())
            .await
            .unwrap_err();

        match err {
            SigcardError::RemoteCreate { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "ErrorAccessDenied");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
