//! Token provider backed by a pre-acquired bearer token.

use async_trait::async_trait;
use tracing::debug;

use super::{AccessToken, TokenProvider, TokenRequest};
use crate::error::{Result, SigcardError};

/// Hands out a token obtained outside the application.
///
/// It cannot prompt, so a missing token fails even when the request allows
/// interactive sign-in.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenProvider {
    token: Option<AccessToken>,
}

impl StaticTokenProvider {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token
                .filter(|t| !t.trim().is_empty())
                .map(|t| AccessToken::new(t.trim())),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn get_token(&self, request: &TokenRequest) -> Result<AccessToken> {
        debug!("token requested for scopes {:?}", request.scopes);

        self.token.clone().ok_or_else(|| {
            let reason = if request.allow_interactive {
                "no access token configured and interactive sign-in is not available"
            } else {
                "no access token configured"
            };
            SigcardError::token(&request.scopes, reason)
        })
    }
}
