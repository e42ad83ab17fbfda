use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context};
use serde::Deserialize;
use tracing::warn;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "browser.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub page_size: u32,
    pub stop_at_empty_page: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: catalog_client::DEFAULT_API_BASE_URL.into(),
            page_size: browser_core::controller::DEFAULT_PAGE_SIZE,
            stop_at_empty_page: false,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.page_size == 0 {
            return Err(anyhow!("page_size must be greater than zero"));
        }
        let url = Url::parse(&self.api_base_url)
            .with_context(|| format!("api_base_url '{}' is not a url", self.api_base_url))?;
        if url.cannot_be_a_base() {
            return Err(anyhow!(
                "api_base_url '{}' must be a hierarchical url",
                self.api_base_url
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    page_size: Option<u32>,
    stop_at_empty_page: Option<bool>,
}

/// Defaults, then the TOML file, then environment. An explicit `config_path` must exist;
/// the default file is optional.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (path, required) = match config_path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    match fs::read_to_string(&path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("invalid config file '{}'", path.display()))?,
        Err(err) if !required && err.kind() == ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

pub fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = v;
    }
    if let Some(v) = file_cfg.page_size {
        settings.page_size = v;
    }
    if let Some(v) = file_cfg.stop_at_empty_page {
        settings.stop_at_empty_page = v;
    }
    Ok(())
}

pub fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("CATALOG_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = lookup("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = lookup("APP__PAGE_SIZE") {
        match v.parse::<u32>() {
            Ok(parsed) => settings.page_size = parsed,
            Err(err) => warn!(value = %v, "ignoring APP__PAGE_SIZE: {err}"),
        }
    }

    if let Some(v) = lookup("APP__STOP_AT_EMPTY_PAGE") {
        match v.parse::<bool>() {
            Ok(parsed) => settings.stop_at_empty_page = parsed,
            Err(err) => warn!(value = %v, "ignoring APP__STOP_AT_EMPTY_PAGE: {err}"),
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
