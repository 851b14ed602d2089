use secrecy::Secret;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize, Clone)]
pub struct OutageApiSettings {
    pub host: Url,
    pub api_key: Secret<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BanSettings {
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WidgetSettings {
    #[serde(default = "default_limit_latest")]
    pub limit_latest: usize,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            limit_latest: default_limit_latest(),
        }
    }
}

fn default_limit_latest() -> usize {
    20
}

/// Widget configuration, provided by the hosting environment at startup
/// and immutable afterwards.
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub outage_api: OutageApiSettings,
    pub ban: BanSettings,
    #[serde(default)]
    pub widget: WidgetSettings,
}

impl Settings {
    pub fn parse() -> anyhow::Result<Settings> {
        shared_kernel::configuration::config()
    }
}
