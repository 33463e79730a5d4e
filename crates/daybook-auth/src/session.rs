//! Session lifecycle.
//!
//! [`SessionManager`] is the only writer of the session. Every mutation
//! takes `&mut self`, so there is exactly one writer at a time and no
//! locking is needed.
//!
//! Retry policy: a rejected access token triggers exactly one refresh and,
//! if that succeeds, exactly one repeat of the original request. Nothing is
//! retried more than once and nothing backs off.

use chrono::{DateTime, Utc};
use daybook_core::enums::SessionState;
use daybook_core::errors::CoreError;
use daybook_core::identity::User;

use crate::claims;
use crate::client::{
    AuthClient, AuthResponse, ChangePasswordRequest, LoginRequest, RegisterRequest, TokenPair,
    check_response,
};
use crate::error::AuthError;
use crate::token_store::{StoredSession, TokenStore};

/// Seconds before expiry at which an access token counts as expiring.
pub const EXPIRY_BUFFER_SECS: i64 = 60;

pub struct SessionManager {
    client: AuthClient,
    store: Box<dyn TokenStore>,
    state: SessionState,
    /// Held while authenticating, authenticated or refreshing.
    tokens: Option<TokenPair>,
    user: Option<User>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("base_url", &self.client.base_url())
            .field("store", &self.store.source())
            .field("state", &self.state)
            .field("user", &self.user.as_ref().map(|user| &user.email))
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Starts anonymous. Call [`Self::bootstrap`] to resume a stored session.
    #[must_use]
    pub fn new(client: AuthClient, store: Box<dyn TokenStore>) -> Self {
        Self {
            client,
            store,
            state: SessionState::Anonymous,
            tokens: None,
            user: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state == SessionState::Authenticated
    }

    /// The bearer token, present exactly when the session is authenticated.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        if self.is_authenticated() {
            self.tokens.as_ref().map(|tokens| tokens.access.as_str())
        } else {
            None
        }
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub const fn client(&self) -> &AuthClient {
        &self.client
    }

    #[must_use]
    pub fn store_source(&self) -> &'static str {
        self.store.source()
    }

    /// When the current access token expires, if it can be read.
    #[must_use]
    pub fn access_expires_at(&self) -> Option<DateTime<Utc>> {
        self.access_token()
            .and_then(|token| claims::decode_expiry(token).ok())
    }

    /// The access token is within [`EXPIRY_BUFFER_SECS`] of expiring.
    #[must_use]
    pub fn access_expiring(&self) -> bool {
        self.access_token()
            .is_some_and(|token| claims::is_near_expiry(token, EXPIRY_BUFFER_SECS))
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Exchange credentials for a token pair.
    ///
    /// On failure the previous state, tokens and user are kept.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidCredentials`], [`AuthError::Network`], or
    /// [`AuthError::TokenStore`] if the new session cannot be persisted.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&User, AuthError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let prior = self.begin_authenticating()?;
        let result = self.client.login(&request).await;
        self.finish_authenticating(prior, result)
    }

    /// Create an account and sign in with it.
    ///
    /// # Errors
    ///
    /// [`AuthError::Validation`] with the backend's field errors,
    /// [`AuthError::Network`], or [`AuthError::TokenStore`].
    pub async fn register(&mut self, request: &RegisterRequest) -> Result<&User, AuthError> {
        let prior = self.begin_authenticating()?;
        let result = self.client.register(request).await;
        self.finish_authenticating(prior, result)
    }

    /// Resume the persisted session, if any.
    ///
    /// With both tokens stored, the profile is fetched. A rejected access
    /// token gets one refresh and one more profile fetch; if either fails
    /// for any reason the stored tokens are discarded and the session is
    /// anonymous. When the first profile fetch cannot reach the backend the
    /// stored tokens are kept for the next run and the error is returned.
    ///
    /// # Errors
    ///
    /// [`AuthError::Network`] (or another non-rejection failure) when the
    /// session could not be verified or the refresh failed without a
    /// rejection.
    pub async fn bootstrap(&mut self) -> Result<SessionState, AuthError> {
        if self.state != SessionState::Anonymous {
            return Ok(self.state);
        }
        let stored = match self.store.load() {
            Ok(Some(stored)) if stored.is_complete() => stored,
            Ok(_) => return Ok(self.state),
            Err(error) => {
                tracing::warn!(%error, "could not read stored session; starting anonymous");
                return Ok(self.state);
            }
        };

        self.transition(SessionState::Authenticating)?;
        self.user = stored.user;
        self.tokens = Some(TokenPair {
            access: stored.access_token,
            refresh: stored.refresh_token,
        });

        match self.fetch_profile().await {
            Ok(()) => return self.authenticated(),
            Err(AuthError::Unauthorized) => {
                tracing::debug!("stored access token rejected; refreshing once");
            }
            Err(error) => return Err(self.abandon(error)),
        }

        self.transition(SessionState::Refreshing)?;
        let outcome = match self.refresh_tokens().await {
            Ok(()) => self.fetch_profile().await,
            Err(error) => Err(error),
        };
        match outcome {
            Ok(()) => self.authenticated(),
            Err(error) if error.is_rejection() => {
                tracing::info!(%error, "stored session is no longer valid");
                self.discard();
                Ok(self.state)
            }
            Err(error) => {
                tracing::warn!(%error, "refresh failed; discarding stored session");
                self.discard();
                Err(error)
            }
        }
    }

    /// Best-effort backend invalidation, then unconditional local sign-out.
    ///
    /// Tokens are cleared from memory and storage even when the backend call
    /// fails.
    ///
    /// # Errors
    ///
    /// [`AuthError::TokenStore`] only when local storage cannot be cleared.
    pub async fn logout(&mut self) -> Result<(), AuthError> {
        let tokens = self.tokens.take().or_else(|| {
            self.store
                .load()
                .ok()
                .flatten()
                .filter(StoredSession::is_complete)
                .map(|stored| TokenPair {
                    access: stored.access_token,
                    refresh: stored.refresh_token,
                })
        });
        if let Some(tokens) = tokens
            && let Err(error) = self.client.logout(&tokens.access, &tokens.refresh).await
        {
            tracing::warn!(%error, "backend logout failed; clearing local session anyway");
        }

        self.user = None;
        self.state = SessionState::Anonymous;
        self.store.clear()
    }

    /// Send a request with the bearer token.
    ///
    /// `build` is called once per attempt. On 401 the session is refreshed
    /// once and the request re-sent once; if the refresh fails in any way or
    /// the second attempt is also 401, the session is logged out.
    ///
    /// # Errors
    ///
    /// - [`AuthError::NotAuthenticated`] without a session.
    /// - [`AuthError::SessionExpired`] when the refresh-once policy failed.
    /// - [`AuthError::Network`] when a request could not be sent.
    pub async fn send_authorized<F>(&mut self, build: F) -> Result<reqwest::Response, AuthError>
    where
        F: Fn(&reqwest::Client) -> reqwest::RequestBuilder,
    {
        let access = self
            .access_token()
            .ok_or(AuthError::NotAuthenticated)?
            .to_string();
        let resp = build(self.client.http())
            .bearer_auth(&access)
            .send()
            .await
            .map_err(AuthError::from_transport)?;
        if resp.status() != reqwest::StatusCode::UNAUTHORIZED {
            return Ok(resp);
        }

        tracing::debug!("access token rejected; refreshing once");
        self.transition(SessionState::Refreshing)?;
        if let Err(error) = self.refresh_tokens().await {
            tracing::debug!(%error, "refresh failed");
            self.expire().await;
            return Err(AuthError::SessionExpired);
        }
        self.transition(SessionState::Authenticated)?;

        let access = self
            .access_token()
            .ok_or(AuthError::NotAuthenticated)?
            .to_string();
        let resp = build(self.client.http())
            .bearer_auth(&access)
            .send()
            .await
            .map_err(AuthError::from_transport)?;
        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            self.expire().await;
            return Err(AuthError::SessionExpired);
        }
        Ok(resp)
    }

    /// # Errors
    ///
    /// [`AuthError::Validation`] when the old password is wrong or the new
    /// one is refused, plus the [`Self::send_authorized`] errors.
    pub async fn change_password(&mut self, old: &str, new: &str) -> Result<(), AuthError> {
        let body = ChangePasswordRequest {
            old_password: old.to_string(),
            new_password: new.to_string(),
        };
        let url = self.client.url("/api/auth/change-password/");
        let resp = self
            .send_authorized(|http| http.post(&url).json(&body))
            .await?;
        check_response(resp).await.map(|_| ())
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn transition(&mut self, next: SessionState) -> Result<(), AuthError> {
        if !self.state.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                from: self.state.to_string(),
                to: next.to_string(),
            }
            .into());
        }
        tracing::trace!(from = %self.state, to = %next, "session transition");
        self.state = next;
        Ok(())
    }

    /// Enter `authenticating` from anonymous. An authenticated session stays
    /// as it is until the new credentials are accepted.
    fn begin_authenticating(&mut self) -> Result<SessionState, AuthError> {
        let prior = self.state;
        if prior == SessionState::Anonymous {
            self.transition(SessionState::Authenticating)?;
        }
        Ok(prior)
    }

    fn finish_authenticating(
        &mut self,
        prior: SessionState,
        result: Result<AuthResponse, AuthError>,
    ) -> Result<&User, AuthError> {
        let response = match result {
            Ok(response) => response,
            Err(error) => {
                self.state = prior;
                return Err(error);
            }
        };

        let stored = StoredSession {
            access_token: response.tokens.access.clone(),
            refresh_token: response.tokens.refresh.clone(),
            user: Some(response.user.clone()),
        };
        if let Err(error) = self.store.save(&stored) {
            self.state = prior;
            return Err(error);
        }

        self.tokens = Some(response.tokens);
        self.state = SessionState::Authenticated;
        tracing::info!(email = %response.user.email, "signed in");
        Ok(self.user.insert(response.user))
    }

    async fn fetch_profile(&mut self) -> Result<(), AuthError> {
        let access = self
            .tokens
            .as_ref()
            .map(|tokens| tokens.access.clone())
            .ok_or(AuthError::NotAuthenticated)?;
        let user = self.client.profile(&access).await?;
        self.user = Some(user);
        Ok(())
    }

    /// Swap in a new access token (and a rotated refresh token, if the
    /// backend sent one) and persist them.
    async fn refresh_tokens(&mut self) -> Result<(), AuthError> {
        let refresh = self
            .tokens
            .as_ref()
            .map(|tokens| tokens.refresh.clone())
            .ok_or(AuthError::NotAuthenticated)?;
        let renewed = self.client.refresh(&refresh).await?;
        self.tokens = Some(TokenPair {
            access: renewed.access,
            refresh: renewed.refresh.unwrap_or(refresh),
        });
        self.persist();
        Ok(())
    }

    fn authenticated(&mut self) -> Result<SessionState, AuthError> {
        self.transition(SessionState::Authenticated)?;
        self.persist();
        Ok(self.state)
    }

    fn persist(&self) {
        let Some(tokens) = &self.tokens else {
            return;
        };
        let stored = StoredSession {
            access_token: tokens.access.clone(),
            refresh_token: tokens.refresh.clone(),
            user: self.user.clone(),
        };
        if let Err(error) = self.store.save(&stored) {
            tracing::warn!(%error, "failed to persist session");
        }
    }

    /// Drop the in-memory session but keep what is stored.
    fn abandon(&mut self, error: AuthError) -> AuthError {
        tracing::warn!(%error, "could not verify stored session");
        self.tokens = None;
        self.user = None;
        self.state = SessionState::Anonymous;
        error
    }

    /// Drop the session everywhere.
    fn discard(&mut self) {
        self.tokens = None;
        self.user = None;
        self.state = SessionState::Anonymous;
        if let Err(error) = self.store.clear() {
            tracing::warn!(%error, "failed to clear stored session");
        }
    }

    async fn expire(&mut self) {
        tracing::info!("session expired; signing out");
        if let Err(error) = self.logout().await {
            tracing::warn!(%error, "failed to clear stored session");
        }
    }
}
