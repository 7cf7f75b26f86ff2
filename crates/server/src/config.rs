use std::time::Duration;

use anyhow::{Context, bail};

/// Process configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub tmdb_api_access_token: String,
    pub tvdb_api_key: String,
    /// When set, every request must carry `?auth=<password>`.
    pub addon_password: Option<String>,
    pub base_url: String,
    pub cache_ttl: Duration,
    pub bind_addr: String,
}

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_CACHE_TTL_SECS: u64 = 10800;
const DEFAULT_BIND: &str = "0.0.0.0:8080";

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &str| get(key).with_context(|| format!("{key} must be set"));

        let cache_ttl = match get("CACHE_TTL") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("CACHE_TTL must be a number of seconds, got {raw:?}"))?,
            None => DEFAULT_CACHE_TTL_SECS,
        };

        let base_url = get("BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            bail!("BASE_URL must be an http(s) URL, got {base_url:?}");
        }

        Ok(Self {
            tmdb_api_access_token: required("TMDB_API_ACCESS_TOKEN")?,
            tvdb_api_key: required("TVDB_API_KEY")?,
            addon_password: get("ADDON_PASSWORD"),
            base_url: base_url.trim_end_matches('/').to_string(),
            cache_ttl: Duration::from_secs(cache_ttl),
            bind_addr: get("METASEARCH_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string()),
        })
    }

    /// URL clients install the addon from.
    pub fn manifest_url(&self) -> String {
        match &self.addon_password {
            Some(password) => format!(
                "{}/manifest.json?auth={}",
                self.base_url,
                urlencoding::encode(password)
            ),
            None => format!("{}/manifest.json", self.base_url),
        }
    }
}
