use daybook_config::DaybookConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &DaybookConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &DaybookConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    if !config.images.is_configured() && has_single_underscore_key(&env_keys, "DAYBOOK_IMAGES") {
        warnings.push(
            "images.access_key is empty while DAYBOOK_IMAGES_* env vars exist. Use double underscores (example: DAYBOOK_IMAGES__ACCESS_KEY)."
                .to_string(),
        );
    }

    if has_single_underscore_key(&env_keys, "DAYBOOK_API") {
        warnings.push(
            "DAYBOOK_API_* env vars are ignored. Use double underscores (example: DAYBOOK_API__BASE_URL)."
                .to_string(),
        );
    }

    warnings
}

/// `DAYBOOK_API_BASE_URL` instead of `DAYBOOK_API__BASE_URL`.
fn has_single_underscore_key(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| {
        key.strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('_') && !rest.starts_with("__"))
    })
}
