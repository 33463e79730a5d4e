//! HTTP client for the `/api/auth/` endpoints.

use std::time::Duration;

use daybook_core::errors::FieldErrors;
use daybook_core::identity::User;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration form. `password2` is the confirmation field.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub password2: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Login and registration response.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub tokens: TokenPair,
}

/// Refresh response. Rotating backends also return a new refresh token.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    /// # Errors
    ///
    /// Returns [`AuthError::Other`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("daybook/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AuthError::Other(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_http(http, base_url))
    }

    #[must_use]
    pub fn with_http(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The shared connection pool.
    #[must_use]
    pub const fn http(&self) -> &reqwest::Client {
        &self.http
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// # Errors
    ///
    /// [`AuthError::InvalidCredentials`] when the backend refuses the pair,
    /// [`AuthError::Network`] when it cannot be reached.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, AuthError> {
        tracing::debug!(email = %request.email, "POST /api/auth/login/");
        let resp = self
            .http
            .post(self.url("/api/auth/login/"))
            .json(request)
            .send()
            .await
            .map_err(AuthError::from_transport)?;
        match check_response(resp).await {
            Ok(resp) => resp.json().await.map_err(AuthError::from_transport),
            Err(AuthError::Unauthorized) => Err(AuthError::InvalidCredentials(
                "email or password is incorrect".into(),
            )),
            Err(AuthError::Validation(errors)) => {
                Err(AuthError::InvalidCredentials(errors.summary()))
            }
            Err(other) => Err(other),
        }
    }

    /// # Errors
    ///
    /// [`AuthError::Validation`] with the backend's field errors when the
    /// form is rejected.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, AuthError> {
        tracing::debug!(email = %request.email, "POST /api/auth/register/");
        let resp = self
            .http
            .post(self.url("/api/auth/register/"))
            .json(request)
            .send()
            .await
            .map_err(AuthError::from_transport)?;
        check_response(resp)
            .await?
            .json()
            .await
            .map_err(AuthError::from_transport)
    }

    /// Fetch the profile the access token belongs to.
    ///
    /// # Errors
    ///
    /// [`AuthError::Unauthorized`] when the token is rejected.
    pub async fn profile(&self, access_token: &str) -> Result<User, AuthError> {
        tracing::debug!("GET /api/auth/user/");
        let resp = self
            .http
            .get(self.url("/api/auth/user/"))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(AuthError::from_transport)?;
        check_response(resp)
            .await?
            .json()
            .await
            .map_err(AuthError::from_transport)
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// # Errors
    ///
    /// [`AuthError::Unauthorized`] or [`AuthError::Validation`] when the
    /// refresh token is invalid or expired.
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse, AuthError> {
        tracing::debug!("POST /api/auth/token/refresh/");
        let resp = self
            .http
            .post(self.url("/api/auth/token/refresh/"))
            .json(&serde_json::json!({ "refresh": refresh_token }))
            .send()
            .await
            .map_err(AuthError::from_transport)?;
        check_response(resp)
            .await?
            .json()
            .await
            .map_err(AuthError::from_transport)
    }

    /// Ask the backend to blacklist the refresh token.
    ///
    /// # Errors
    ///
    /// Any transport or status failure. Callers treat this as best-effort.
    pub async fn logout(&self, access_token: &str, refresh_token: &str) -> Result<(), AuthError> {
        tracing::debug!("POST /api/auth/logout/");
        let resp = self
            .http
            .post(self.url("/api/auth/logout/"))
            .bearer_auth(access_token)
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .map_err(AuthError::from_transport)?;
        check_response(resp).await.map(|_| ())
    }
}

/// Classify an auth endpoint response.
///
/// - **401** → [`AuthError::Unauthorized`]
/// - **other 4xx** → [`AuthError::Validation`] with the parsed field errors
/// - **any other non-success** → [`AuthError::UnexpectedResponse`]
///
/// # Errors
///
/// As listed above.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, AuthError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(AuthError::Unauthorized);
    }
    let body = resp.text().await.unwrap_or_default();
    if status.is_client_error() && status != reqwest::StatusCode::NOT_FOUND {
        return Err(AuthError::Validation(FieldErrors::from_body(&body)));
    }
    Err(AuthError::UnexpectedResponse {
        status: status.as_u16(),
        message: FieldErrors::from_body(&body).summary(),
    })
}
