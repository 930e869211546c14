// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_NAME: &str = "promptdeck";

const CONFIG_VERSION: i64 = 1;
const DEFAULT_TIMEOUT: &str = "5s";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub store: Store,
    #[serde(default)]
    pub ui: Ui,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            store: Store::default(),
            ui: Ui::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Store {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ui {
    pub demo_banner: Option<bool>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("PROMPTDECK_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set PROMPTDECK_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and place values under [store] and [ui]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(base_url) = &self.store.base_url {
            if base_url.trim().is_empty() {
                bail!("store.base_url in {} must not be empty", path.display());
            }
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                bail!(
                    "store.base_url in {} must be an http(s) URL, got {base_url:?}",
                    path.display()
                );
            }
        }

        if let Some(timeout) = &self.store.timeout {
            let parsed = parse_duration(timeout)?;
            if parsed <= Duration::ZERO {
                bail!(
                    "store.timeout in {} must be positive, got {}",
                    path.display(),
                    timeout
                );
            }
        }

        Ok(())
    }

    /// Config value wins; the environment is the fallback.
    pub fn store_base_url(&self) -> Option<String> {
        self.store
            .base_url
            .clone()
            .or_else(|| env::var("PROMPTDECK_STORE_URL").ok())
            .map(|url| url.trim_end_matches('/').to_owned())
    }

    pub fn store_api_key(&self) -> Option<String> {
        self.store
            .api_key
            .clone()
            .or_else(|| env::var("PROMPTDECK_STORE_KEY").ok())
    }

    pub fn store_timeout(&self) -> Result<Duration> {
        parse_duration(self.store.timeout.as_deref().unwrap_or(DEFAULT_TIMEOUT))
    }

    pub fn demo_banner(&self) -> bool {
        self.ui.demo_banner.unwrap_or(false)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# promptdeck config\n# Place this file at: {}\n\nversion = 1\n\n[store]\n# PostgREST-style endpoint of the hosted record store.\nbase_url = \"https://your-project.example.co/rest/v1\"\napi_key = \"your-anon-key\"\ntimeout = \"{}\"\n\n[ui]\ndemo_banner = false\n",
            path.display(),
            DEFAULT_TIMEOUT,
        )
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(mins * 60));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 5s)")
}
