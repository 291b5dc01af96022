//! User-triggered actions: scanning a message and creating a contact.
//!
//! Each action runs to completion or fails as a whole. Failures are logged
//! here and turned into a single [`ActionStatus`] for display.

use tracing::{error, info};

use crate::client::{ContactsApi, MessageBodyProvider, SenderIdentityProvider, TokenProvider, TokenRequest};
use crate::error::{Result, SigcardError};
use crate::extract::{ScanReport, SignatureScanner};
use crate::models::config::GraphConfig;
use crate::models::contact::{ContactRecord, CreatedContact, ExtractionResult};

/// Status message shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionStatus {
    Success(String),
    Failure(String),
}

impl ActionStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Success(msg) | Self::Failure(msg) => msg,
        }
    }

    /// Status for a finished scan.
    pub fn from_scan(result: &Result<ScanReport>) -> Self {
        match result {
            Ok(report) if report.result.phone.is_empty() || report.result.full_name.is_empty() => {
                Self::Success("Scan complete, some fields were not found; fill them in before creating the contact.".to_string())
            }
            Ok(_) => Self::Success("Scan complete, review the fields before creating the contact.".to_string()),
            Err(e) => Self::failure("scan", e),
        }
    }

    /// Status for a finished contact creation.
    pub fn from_create(result: &Result<CreatedContact>) -> Self {
        match result {
            Ok(created) => Self::Success(format!("Contact created: {}", created.record.display_name)),
            Err(e) => Self::failure("create", e),
        }
    }

    fn failure(action: &str, e: &SigcardError) -> Self {
        error!("{} action failed: {}", action, e);
        Self::Failure(e.to_string())
    }
}

/// Fetch the selected message and extract contact fields from it.
pub async fn scan_message(
    body_provider: &dyn MessageBodyProvider,
    sender_provider: &dyn SenderIdentityProvider,
    scanner: &SignatureScanner,
) -> Result<ScanReport> {
    let html = body_provider.get_body().await.map_err(|e| match e {
        SigcardError::BodyRetrieval(_) => e,
        other => SigcardError::BodyRetrieval(other.to_string()),
    })?;

    let sender = sender_provider.sender();
    let report = scanner.scan(&html, &sender);

    info!(
        "scan finished: name={:?} phone={:?} degraded={}",
        report.result.full_name, report.result.phone, report.degraded
    );

    Ok(report)
}

/// Create a contact from the reviewed field values.
///
/// `fields` is the current state of the form, so user edits made after the
/// scan are what gets sent.
pub async fn create_contact(
    fields: &ExtractionResult,
    tokens: &dyn TokenProvider,
    api: &dyn ContactsApi,
    config: &GraphConfig,
) -> Result<CreatedContact> {
    let record = ContactRecord::from_fields(fields);
    let request = TokenRequest::from_config(config);

    let token = tokens.get_token(&request).await.map_err(|e| match e {
        SigcardError::TokenAcquisition { .. } => e,
        other => SigcardError::token(&request.scopes, other.to_string()),
    })?;

    api.create_contact(&token, &record).await
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::client::{AccessToken, StaticTokenProvider};
    use crate::models::contact::SenderIdentity;

    struct StaticBody(Option<&'static str>);

    #[async_trait]
    impl MessageBodyProvider for StaticBody {
        async fn get_body(&self) -> Result<String> {
            self.0
                .map(str::to_string)
                .ok_or_else(|| SigcardError::Io(std::io::Error::other("mailbox offline")))
        }
    }

    #[derive(Default)]
    struct RecordingApi {
        sent: Mutex<Vec<ContactRecord>>,
        fail_with: Option<u16>,
    }

    #[async_trait]
    impl ContactsApi for RecordingApi {
        async fn create_contact(
            &self,
            token: &AccessToken,
            contact: &ContactRecord,
        ) -> Result<CreatedContact> {
            assert_eq!(token.secret(), "tok");
            self.sent.lock().unwrap().push(contact.clone());

            match self.fail_with {
                Some(status) => Err(SigcardError::RemoteCreate {
                    status,
                    body: "quota exceeded".to_string(),
                }),
                None => Ok(CreatedContact {
                    id: "1".to_string(),
                    created_date_time: None,
                    record: contact.clone(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_scan_message() {
        let body = StaticBody(Some(
            "<p>Bonjour,</p><p>Mon numero: 06.12.34.56.78</p><p>--</p><p>Marie Curie</p>",
        ));
        let sender = SenderIdentity::new("x@y.com", "Mx");

        let result = scan_message(&body, &sender, &SignatureScanner::new()).await;
        let status = ActionStatus::from_scan(&result);
        let report = result.unwrap();

        assert_eq!(
            report.result,
            ExtractionResult {
                full_name: "Marie Curie".to_string(),
                phone: "0612345678".to_string(),
                email: "x@y.com".to_string(),
            }
        );
        assert!(status.is_success());
    }

    #[tokio::test]
    async fn test_scan_message_body_failure() {
        let sender = SenderIdentity::default();
        let result = scan_message(&StaticBody(None), &sender, &SignatureScanner::new()).await;

        assert!(matches!(result, Err(SigcardError::BodyRetrieval(_))));

        let status = ActionStatus::from_scan(&result);
        assert!(!status.is_success());
        assert!(status.message().contains("mailbox offline"));
    }

    #[tokio::test]
    async fn test_create_contact_uses_edited_fields() {
        let api = RecordingApi::default();
        let tokens = StaticTokenProvider::new(Some("tok".to_string()));

        let fields = ExtractionResult {
            full_name: "Directeur Commercial".to_string(),
            phone: "0612345678".to_string(),
            email: "x@y.com".to_string(),
        }
        .apply_edits(crate::models::contact::FieldEdits {
            full_name: Some("Jean Dupont".to_string()),
            ..Default::default()
        });

        let result = create_contact(&fields, &tokens, &api, &GraphConfig::default()).await;
        assert_eq!(
            ActionStatus::from_create(&result),
            ActionStatus::Success("Contact created: Jean Dupont".to_string())
        );

        let sent = api.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].given_name, "Jean");
        assert_eq!(sent[0].surname, "Dupont");
    }

    #[tokio::test]
    async fn test_create_contact_token_failure_skips_api() {
        let api = RecordingApi::default();
        let tokens = StaticTokenProvider::new(None);

        let result = create_contact(
            &ExtractionResult::default(),
            &tokens,
            &api,
            &GraphConfig::default(),
        )
        .await;

        assert!(matches!(result, Err(SigcardError::TokenAcquisition { .. })));
        assert!(api.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_contact_remote_failure() {
        let api = RecordingApi {
            fail_with: Some(429),
            ..Default::default()
        };
        let tokens = StaticTokenProvider::new(Some("tok".to_string()));

        let result = create_contact(
            &ExtractionResult::default(),
            &tokens,
            &api,
            &GraphConfig::default(),
        )
        .await;

        let status = ActionStatus::from_create(&result);
        assert!(!status.is_success());
        assert!(status.message().contains("429"));
        assert!(status.message().contains("quota exceeded"));
    }
}
