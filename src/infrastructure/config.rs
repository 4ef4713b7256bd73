use anyhow::{bail, Context};
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "http://localhost:3000/plannerstats";
const DEFAULT_BIND: &str = "0.0.0.0:8080";
const DEFAULT_BIN_MINUTES: u32 = 5;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub views: ViewSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub key: String,
    /// Per-request timeout. Unset keeps the HTTP client's default.
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ViewSettings {
    #[serde(default = "default_bin_minutes")]
    pub default_bin_minutes: u32,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            default_bin_minutes: default_bin_minutes(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

fn default_bin_minutes() -> u32 {
    DEFAULT_BIN_MINUTES
}

/// Load `config/fleet.{toml,yaml,json}` (optional) overlaid with `FLEET__*`
/// environment variables, e.g. `FLEET__API__KEY`.
pub fn load_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/fleet").required(false))
        .add_source(config::Environment::with_prefix("FLEET").separator("__"))
        .build()
        .context("Failed to read configuration")?;

    validate(settings.try_deserialize()?)
}

fn validate(config: AppConfig) -> anyhow::Result<AppConfig> {
    if config.api.key.trim().is_empty() {
        bail!("api.key is not set (use config/fleet.toml or FLEET__API__KEY)");
    }
    if config.api.base_url.trim().is_empty() {
        bail!("api.base_url must not be empty");
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{Config, File, FileFormat};

    fn parse(toml: &str) -> anyhow::Result<AppConfig> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        validate(settings.try_deserialize()?)
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config = parse("[api]\nkey = \"secret\"\n").unwrap();

        assert_eq!(config.api.base_url, "http://localhost:3000/plannerstats");
        assert_eq!(config.api.timeout_secs, None);
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.views.default_bin_minutes, 5);
    }

    #[test]
    fn test_explicit_values() {
        let config = parse(
            r#"
            [api]
            base_url = "https://stats.example.net/plannerstats"
            key = "abc"
            timeout_secs = 15

            [server]
            bind = "127.0.0.1:9000"

            [views]
            default_bin_minutes = 15
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://stats.example.net/plannerstats");
        assert_eq!(config.api.timeout_secs, Some(15));
        assert_eq!(config.server.bind, "127.0.0.1:9000");
        assert_eq!(config.views.default_bin_minutes, 15);
    }

    #[test]
    fn test_missing_api_key_is_rejected() {
        assert!(parse("[api]\nkey = \"  \"\n").is_err());
        assert!(parse("[api]\nbase_url = \"http://x\"\n").is_err());
    }
}
