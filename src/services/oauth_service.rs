use serde::Deserialize;

use crate::config;
use crate::error::ApiError;

/// Three-legged OAuth against the Google identity provider: exchange an
/// authorization code for an access token, then fetch the user's profile.
pub struct OAuthService {
    client: reqwest::Client,
}

#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    #[error("OAuth is not configured")]
    NotConfigured,
    #[error("Identity provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Identity provider rejected the authorization code")]
    ExchangeRejected,
    #[error("Identity provider returned an unusable profile: {0}")]
    InvalidProfile(String),
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Profile fields consumed from the userinfo endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleUserInfo {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
}

impl OAuthService {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Full code-to-profile flow used by the callback and link handlers.
    pub async fn authenticate(&self, code: &str) -> Result<GoogleUserInfo, OAuthError> {
        let access_token = self.exchange_code(code).await?;
        self.fetch_userinfo(&access_token).await
    }

    async fn exchange_code(&self, code: &str) -> Result<String, OAuthError> {
        let oauth = &config::config().oauth;
        if oauth.google_client_id.is_empty() || oauth.google_client_secret.is_empty() {
            return Err(OAuthError::NotConfigured);
        }

        let params = [
            ("code", code),
            ("client_id", oauth.google_client_id.as_str()),
            ("client_secret", oauth.google_client_secret.as_str()),
            ("redirect_uri", oauth.google_redirect_url.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .client
            .post(&oauth.token_endpoint)
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!("OAuth code exchange failed with status {}", response.status());
            return Err(OAuthError::ExchangeRejected);
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    async fn fetch_userinfo(&self, access_token: &str) -> Result<GoogleUserInfo, OAuthError> {
        let oauth = &config::config().oauth;

        let response = self
            .client
            .get(&oauth.userinfo_endpoint)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(OAuthError::InvalidProfile(format!(
                "userinfo returned {}",
                response.status()
            )));
        }

        let info: GoogleUserInfo = response.json().await?;
        if info.id.is_empty() {
            return Err(OAuthError::InvalidProfile("missing subject id".to_string()));
        }
        Ok(info)
    }
}

impl Default for OAuthService {
    fn default() -> Self {
        Self::new()
    }
}

impl From<OAuthError> for ApiError {
    fn from(err: OAuthError) -> Self {
        match err {
            OAuthError::NotConfigured => {
                ApiError::service_unavailable("Sign-in with Google is not available")
            }
            OAuthError::ExchangeRejected => {
                ApiError::bad_request("Authorization code was rejected")
            }
            OAuthError::Transport(e) => {
                tracing::error!("OAuth transport error: {}", e);
                ApiError::bad_gateway("Identity provider is unreachable")
            }
            OAuthError::InvalidProfile(msg) => {
                tracing::error!("OAuth profile error: {}", msg);
                ApiError::bad_gateway("Identity provider returned an invalid response")
            }
        }
    }
}
