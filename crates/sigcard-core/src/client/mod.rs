//! Host and remote collaborators used by the scan and create actions.
//!
//! The mail host supplies the message body and sender, an identity provider
//! supplies access tokens, and the contacts API creates the record. None of
//! these retry: a failure ends the action that triggered it.

mod graph;
mod token;

pub use graph::GraphContactsClient;
pub use token::StaticTokenProvider;

use std::fmt;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::config::GraphConfig;
use crate::models::contact::{ContactRecord, CreatedContact, SenderIdentity};

/// Source of the raw markup body of the selected message.
#[async_trait]
pub trait MessageBodyProvider: Send + Sync {
    /// Fetch the message body as HTML.
    async fn get_body(&self) -> Result<String>;
}

/// Source of the selected message's sender.
pub trait SenderIdentityProvider: Send + Sync {
    fn sender(&self) -> SenderIdentity;
}

impl SenderIdentityProvider for SenderIdentity {
    fn sender(&self) -> SenderIdentity {
        self.clone()
    }
}

/// Parameters of a token request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRequest {
    /// Capabilities the token must grant.
    pub scopes: Vec<String>,
    /// Whether the provider may prompt the user to sign in.
    pub allow_interactive: bool,
}

impl TokenRequest {
    /// Token request for creating contacts.
    pub fn from_config(config: &GraphConfig) -> Self {
        Self {
            scopes: config.scopes.clone(),
            allow_interactive: config.allow_interactive,
        }
    }
}

/// Bearer token for the contacts API.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Identity provider issuing access tokens.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn get_token(&self, request: &TokenRequest) -> Result<AccessToken>;
}

/// Remote contact-creation API.
#[async_trait]
pub trait ContactsApi: Send + Sync {
    async fn create_contact(
        &self,
        token: &AccessToken,
        contact: &ContactRecord,
    ) -> Result<CreatedContact>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_debug_is_redacted() {
        let token = AccessToken::new("eyJ0eXAi.secret");
        assert_eq!(format!("{:?}", token), "AccessToken(***)");
        assert_eq!(token.secret(), "eyJ0eXAi.secret");
    }

    #[test]
    fn test_token_request_from_config() {
        let request = TokenRequest::from_config(&GraphConfig::default());
        assert_eq!(request.scopes, vec!["Contacts.ReadWrite".to_string()]);
        assert!(request.allow_interactive);
    }
}
