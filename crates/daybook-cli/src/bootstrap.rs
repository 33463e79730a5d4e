use anyhow::Context;
use chrono::{FixedOffset, Local, Offset};
use daybook_auth::{FileStore, KeyringStore, TokenStore};
use daybook_config::{CredentialStoreKind, DaybookConfig};

/// Load `.env`, then the layered configuration.
pub fn load_config() -> anyhow::Result<DaybookConfig> {
    DaybookConfig::load_with_dotenv().context("failed to load daybook configuration")
}

/// The token store selected by `general.credential_store`.
pub fn token_store(config: &DaybookConfig) -> anyhow::Result<Box<dyn TokenStore>> {
    let file = FileStore::default_location().context("cannot locate the credentials file")?;
    Ok(match config.general.credential_store {
        CredentialStoreKind::File => Box::new(file),
        CredentialStoreKind::Keyring => Box::new(KeyringStore::new(file)),
    })
}

/// The offset calendar days are computed in: the configured one, or the
/// system's current offset.
pub fn time_zone(config: &DaybookConfig) -> FixedOffset {
    config
        .general
        .time_zone_offset_minutes
        .and_then(|minutes| FixedOffset::east_opt(minutes.saturating_mul(60)))
        .unwrap_or_else(|| Local::now().offset().fix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_offset_wins() {
        let mut config = DaybookConfig::default();
        config.general.time_zone_offset_minutes = Some(-300);
        assert_eq!(time_zone(&config).local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn out_of_range_offset_falls_back_to_local() {
        let mut config = DaybookConfig::default();
        config.general.time_zone_offset_minutes = Some(100_000);
        assert_eq!(time_zone(&config), Local::now().offset().fix());
    }
}
