use anyhow::Context;
use chrono::{FixedOffset, NaiveDate, Utc};
use daybook_api::DaybookClient;
use daybook_auth::{AuthClient, AuthError, SessionManager};
use daybook_config::DaybookConfig;

use crate::bootstrap;
use crate::progress::Progress;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: DaybookConfig,
    pub client: DaybookClient,
    pub time_zone: FixedOffset,
    /// Why a stored session could not be resumed, when it could not.
    resume_error: Option<String>,
}

impl AppContext {
    /// Build the session and try to resume the stored one.
    ///
    /// A stored session that cannot be checked (backend unreachable) is kept
    /// on disk; commands that need it report why.
    pub async fn init(config: DaybookConfig) -> anyhow::Result<Self> {
        let auth = AuthClient::new(config.api.origin(), config.api.timeout())
            .context("failed to build the HTTP client")?;
        let store = bootstrap::token_store(&config)?;
        let mut session = SessionManager::new(auth, store);

        let progress = Progress::spinner("resuming session");
        let resume_error = match session.bootstrap().await {
            Ok(state) => {
                tracing::debug!(%state, store = session.store_source(), "session bootstrapped");
                None
            }
            Err(error) => {
                tracing::warn!(%error, "could not resume the stored session");
                Some(error.to_string())
            }
        };
        progress.finish_clear();

        let time_zone = bootstrap::time_zone(&config);
        Ok(Self {
            config,
            client: DaybookClient::new(session),
            time_zone,
            resume_error,
        })
    }

    /// The client, provided the session is authenticated.
    pub fn require_session(&mut self) -> anyhow::Result<&mut DaybookClient> {
        if self.client.session().is_authenticated() {
            return Ok(&mut self.client);
        }
        match &self.resume_error {
            Some(reason) => anyhow::bail!("could not resume the stored session: {reason}"),
            None => Err(AuthError::NotAuthenticated.into()),
        }
    }

    pub fn session_mut(&mut self) -> &mut SessionManager {
        self.client.session_mut()
    }

    /// Today in the configured time zone.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.time_zone).date_naive()
    }
}
