use std::{collections::HashMap, fs, io, path::Path, time::Duration};

use anyhow::{bail, Context};
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub request_timeout_secs: Option<u64>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:3001/api".into(),
            request_timeout_secs: None,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// Defaults, then the config file, then the environment.
///
/// An explicit `path` must exist; the default `dashboard.toml` is optional.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    match fs::read_to_string(file) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("invalid config file '{}'", file.display()))?,
        Err(err) if path.is_none() && err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read '{}'", file.display()))
        }
    }

    apply_env(&mut settings, |key| std::env::var(key).ok())?;
    validate(&settings)?;
    Ok(settings)
}

pub(crate) fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg = toml::from_str::<HashMap<String, toml::Value>>(raw)?;
    if let Some(v) = file_cfg.get("api_base_url") {
        settings.api_base_url = string_value("api_base_url", v)?;
    }
    if let Some(v) = file_cfg.get("request_timeout_secs") {
        settings.request_timeout_secs = Some(match v {
            toml::Value::Integer(secs) => u64::try_from(*secs).with_context(|| {
                format!("request timeout must be whole seconds, got '{secs}'")
            })?,
            other => parse_timeout(&string_value("request_timeout_secs", other)?)?,
        });
    }
    if let Some(v) = file_cfg.get("log_filter") {
        settings.log_filter = string_value("log_filter", v)?;
    }
    Ok(())
}

fn string_value(key: &str, value: &toml::Value) -> anyhow::Result<String> {
    match value {
        toml::Value::String(s) => Ok(s.clone()),
        other => bail!("'{key}' must be a string, got {}", other.type_str()),
    }
}

pub(crate) fn apply_env(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = lookup("DASHBOARD_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = lookup("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        settings.request_timeout_secs = Some(parse_timeout(&v)?);
    }

    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
    Ok(())
}

pub(crate) fn validate(settings: &Settings) -> anyhow::Result<()> {
    let url = Url::parse(settings.api_base_url.trim())
        .with_context(|| format!("invalid api base url '{}'", settings.api_base_url))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("api base url must be http or https, got '{}'", url.scheme());
    }
    Ok(())
}

fn parse_timeout(raw: &str) -> anyhow::Result<u64> {
    raw.trim()
        .parse::<u64>()
        .with_context(|| format!("request timeout must be whole seconds, got '{raw}'"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
