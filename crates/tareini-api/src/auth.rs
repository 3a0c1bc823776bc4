//! Authentication client for the Tareini backend.

use reqwest::Client;
use tracing::debug;

use crate::error::ApiError;
use crate::types::{Credentials, ErrorBody, TokenResponse};
use crate::ApiResult;

/// Client for the login and registration endpoints. Neither endpoint
/// requires a token; a successful call yields one.
pub struct AuthClient {
    client: Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// `POST /api/auth/log-in` with the credentials as a JSON body.
    pub async fn log_in(&self, credentials: &Credentials) -> ApiResult<TokenResponse> {
        self.authenticate("log-in", credentials).await
    }

    /// `POST /api/auth/sign-up`, same contract as login.
    pub async fn sign_up(&self, credentials: &Credentials) -> ApiResult<TokenResponse> {
        self.authenticate("sign-up", credentials).await
    }

    async fn authenticate(
        &self,
        endpoint: &str,
        credentials: &Credentials,
    ) -> ApiResult<TokenResponse> {
        let response = self
            .client
            .post(format!("{}/api/auth/{}", self.base_url, endpoint))
            .json(credentials)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            debug!(endpoint, status = %response.status(), "authentication rejected");
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| "Error de autenticación.".to_string());
            Err(ApiError::Rejected(message))
        }
    }
}
