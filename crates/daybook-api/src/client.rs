//! The authorized resource client.
//!
//! [`DaybookClient`] owns the [`SessionManager`] and routes every call
//! through [`SessionManager::send_authorized`], so each resource method gets
//! the refresh-once policy for free. Resource methods live in the
//! [`crate::diary`], [`crate::tracker`] and [`crate::reflection`] modules as
//! further `impl DaybookClient` blocks.

use daybook_auth::SessionManager;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{check_response, read_json};

#[derive(Debug)]
pub struct DaybookClient {
    session: SessionManager,
}

impl DaybookClient {
    #[must_use]
    pub const fn new(session: SessionManager) -> Self {
        Self { session }
    }

    #[must_use]
    pub const fn session(&self) -> &SessionManager {
        &self.session
    }

    pub const fn session_mut(&mut self) -> &mut SessionManager {
        &mut self.session
    }

    #[must_use]
    pub fn into_session(self) -> SessionManager {
        self.session
    }

    // -----------------------------------------------------------------------
    // Request helpers
    // -----------------------------------------------------------------------

    pub(crate) async fn get_json<T: DeserializeOwned>(&mut self, path: &str) -> Result<T, ApiError> {
        let url = self.session.client().url(path);
        tracing::debug!(%url, "GET");
        let resp = self.session.send_authorized(|http| http.get(&url)).await?;
        read_json(resp).await
    }

    /// `GET` where a 404 means "nothing there" rather than an error.
    pub(crate) async fn get_optional<T: DeserializeOwned>(
        &mut self,
        path: &str,
    ) -> Result<Option<T>, ApiError> {
        match self.get_json(path).await {
            Ok(value) => Ok(Some(value)),
            Err(ApiError::NotFound(message)) => {
                tracing::debug!(path, %message, "nothing found");
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    pub(crate) async fn send_json<B, T>(
        &mut self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.session.client().url(path);
        tracing::debug!(%url, %method, "sending");
        let resp = self
            .session
            .send_authorized(|http| http.request(method.clone(), &url).json(body))
            .await?;
        read_json(resp).await
    }

    pub(crate) async fn post_json<B, T>(&mut self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::POST, path, body).await
    }

    pub(crate) async fn put_json<B, T>(&mut self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PUT, path, body).await
    }

    pub(crate) async fn patch_json<B, T>(&mut self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PATCH, path, body).await
    }

    /// `POST` with no body.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&mut self, path: &str) -> Result<T, ApiError> {
        let url = self.session.client().url(path);
        tracing::debug!(%url, "POST");
        let resp = self.session.send_authorized(|http| http.post(&url)).await?;
        read_json(resp).await
    }

    pub(crate) async fn delete(&mut self, path: &str) -> Result<(), ApiError> {
        let url = self.session.client().url(path);
        tracing::debug!(%url, "DELETE");
        let resp = self.session.send_authorized(|http| http.delete(&url)).await?;
        check_response(resp).await.map(|_| ())
    }
}
