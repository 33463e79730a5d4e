//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use daybook_config::{ConfigError, CredentialStoreKind, DaybookConfig};

fn from_file(path: &str) -> Result<DaybookConfig, ConfigError> {
    DaybookConfig::from_figment(
        &Figment::from(Serialized::defaults(DaybookConfig::default())).merge(Toml::file(path)),
    )
}

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "https://daybook.example.com"
timeout_secs = 10

[quotes]
url = "https://quotes.example.com/today"

[images]
access_key = "unsplash-key"
categories = ["ocean", "art"]

[general]
default_limit = 50
dashboard_days = 7
credential_store = "keyring"
time_zone_offset_minutes = -300
"#,
        )?;

        let config = from_file("config.toml").expect("config loads");
        assert_eq!(config.api.base_url, "https://daybook.example.com");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.quotes.url, "https://quotes.example.com/today");
        assert!(config.images.is_configured());
        assert_eq!(config.images.url, "https://api.unsplash.com/photos/random");
        assert_eq!(config.images.categories, vec!["ocean", "art"]);
        assert_eq!(config.general.default_limit, 50);
        assert_eq!(config.general.dashboard_days, 7);
        assert_eq!(config.general.credential_store, CredentialStoreKind::Keyring);
        assert_eq!(config.general.time_zone_offset_minutes, Some(-300));
        Ok(())
    });
}

#[test]
fn partial_sections_keep_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "http://127.0.0.1:9000"
"#,
        )?;

        let config = from_file("config.toml").expect("config loads");
        assert_eq!(config.api.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.images.categories.len(), 11);
        assert_eq!(config.general.credential_store, CredentialStoreKind::File);
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_default_chain() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(jail.directory().join(".daybook")).expect("mkdir");
        jail.create_file(
            ".daybook/config.toml",
            r#"
[general]
default_limit = 5
"#,
        )?;

        let config = DaybookConfig::load().expect("config loads");
        assert_eq!(config.general.default_limit, 5);
        Ok(())
    });
}

#[test]
fn invalid_base_url_is_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "daybook.example.com"
"#,
        )?;

        let err = from_file("config.toml").expect_err("should reject");
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}
