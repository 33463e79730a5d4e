//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

/// Default window for reflection statistics, in days.
const fn default_dashboard_days() -> u32 {
    30
}

/// Where the session tokens are persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialStoreKind {
    /// `~/.daybook/credentials.json`, readable by the owner only.
    #[default]
    File,
    /// The OS keychain.
    Keyring,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default result limit for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Default number of days covered by reflection statistics.
    #[serde(default = "default_dashboard_days")]
    pub dashboard_days: u32,

    #[serde(default)]
    pub credential_store: CredentialStoreKind,

    /// Fixed UTC offset used for calendar days. Unset means the system's
    /// local time zone.
    #[serde(default)]
    pub time_zone_offset_minutes: Option<i32>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            dashboard_days: default_dashboard_days(),
            credential_store: CredentialStoreKind::default(),
            time_zone_offset_minutes: None,
        }
    }
}
