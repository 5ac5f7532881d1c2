use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context};

use crate::form::CoercionPolicy;

pub const DEFAULT_SETTINGS_FILE: &str = "client.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub server_url: String,
    pub coercion_policy: CoercionPolicy,
    /// Transport-level timeout; the controller itself never times out.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            coercion_policy: CoercionPolicy::Reject,
            request_timeout_secs: None,
        }
    }
}

/// Defaults, then the settings file, then environment overrides.
///
/// An explicit `path` must exist; the default `client.toml` is optional.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<ClientSettings> {
    load_settings_with_env(path, |key| std::env::var(key).ok())
}

/// [`load_settings`] with environment lookups answered by `lookup`.
pub fn load_settings_with_env(
    path: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    let (file, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_SETTINGS_FILE), false),
    };
    match fs::read_to_string(&file) {
        Ok(raw) => apply_file_overrides(&mut settings, &raw)
            .with_context(|| format!("invalid settings file '{}'", file.display()))?,
        Err(err) if required => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", file.display()))
        }
        Err(_) => {}
    }

    apply_env_overrides(&mut settings, lookup)?;
    tracing::debug!(?settings, "client settings resolved");
    Ok(settings)
}

pub fn apply_file_overrides(settings: &mut ClientSettings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: HashMap<String, toml::Value> =
        toml::from_str(raw).context("settings file is not a flat TOML table")?;

    if let Some(v) = file_cfg.get("server_url") {
        settings.server_url = scalar_string("server_url", v)?;
    }
    if let Some(v) = file_cfg.get("coercion_policy") {
        settings.coercion_policy = parse_policy(&scalar_string("coercion_policy", v)?)?;
    }
    if let Some(v) = file_cfg.get("request_timeout_secs") {
        settings.request_timeout_secs = Some(parse_timeout(&scalar_string(
            "request_timeout_secs",
            v,
        )?)?);
    }
    Ok(())
}

/// Unprefixed names first, `APP__` names win when both are set.
pub fn apply_env_overrides(
    settings: &mut ClientSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = lookup("CTC_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = lookup("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = lookup("CTC_COERCION_POLICY") {
        settings.coercion_policy = parse_policy(&v)?;
    }
    if let Some(v) = lookup("APP__COERCION_POLICY") {
        settings.coercion_policy = parse_policy(&v)?;
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        settings.request_timeout_secs = Some(parse_timeout(&v)?);
    }
    Ok(())
}

fn scalar_string(key: &str, value: &toml::Value) -> anyhow::Result<String> {
    match value {
        toml::Value::String(s) => Ok(s.clone()),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Float(f) => Ok(f.to_string()),
        toml::Value::Boolean(b) => Ok(b.to_string()),
        other => Err(anyhow!("'{key}' must be a scalar, found {}", other.type_str())),
    }
}

fn parse_policy(raw: &str) -> anyhow::Result<CoercionPolicy> {
    raw.parse::<CoercionPolicy>().map_err(|err| anyhow!(err))
}

fn parse_timeout(raw: &str) -> anyhow::Result<u64> {
    raw.trim()
        .parse::<u64>()
        .with_context(|| format!("request timeout '{raw}' is not a whole number of seconds"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
