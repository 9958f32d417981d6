use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub lists: ListConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Backend port, used when `base_url` is not set
    pub port: u16,
    /// Path prefix of every REST route
    pub prefix: String,
    /// Absolute origin of the API; overrides host + port
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ListConfig {
    pub default_page_size: u32,
    pub page_size_options: Vec<u32>,
    pub search_debounce_ms: u32,
    /// Number of page buttons around the current page
    pub page_window: u32,
    /// `limit` sent by unpaginated dropdown reads
    pub dropdown_limit: u32,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
port = 3000
prefix = "/api"

[lists]
default_page_size = 10
page_size_options = [10, 25, 50, 100]
search_debounce_ms = 600
page_window = 5
dropdown_limit = 1000
"#;

/// localStorage key holding an optional TOML override
pub const CONFIG_STORAGE_KEY: &str = "portal_config";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Parse and sanity-check a TOML document
pub fn parse_config(contents: &str) -> Result<AppConfig, ConfigError> {
    let mut config: AppConfig = toml::from_str(contents)?;
    if config.lists.default_page_size == 0 {
        return Err(ConfigError::Invalid("default_page_size must be positive".into()));
    }
    config.lists.page_size_options.retain(|size| *size > 0);
    if !config.lists.page_size_options.contains(&config.lists.default_page_size) {
        config.lists.page_size_options.push(config.lists.default_page_size);
    }
    config.lists.page_size_options.sort_unstable();
    config.lists.page_size_options.dedup();
    Ok(config)
}

/// Load configuration
///
/// Search order:
/// 1. TOML stored under `portal_config` in localStorage
/// 2. Falls back to embedded default config
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let stored = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(CONFIG_STORAGE_KEY).ok().flatten());

    if let Some(contents) = stored {
        match parse_config(&contents) {
            Ok(config) => {
                log::info!("Loading config from localStorage '{}'", CONFIG_STORAGE_KEY);
                return Ok(config);
            }
            Err(e) => log::warn!("Ignoring stored config: {}", e),
        }
    }

    log::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

impl Default for AppConfig {
    fn default() -> Self {
        // The embedded document is covered by test_default_config_loads.
        parse_config(DEFAULT_CONFIG).unwrap_or_else(|_| AppConfig {
            api: ApiConfig {
                port: 3000,
                prefix: "/api".into(),
                base_url: None,
            },
            lists: ListConfig {
                default_page_size: 10,
                page_size_options: vec![10, 25, 50, 100],
                search_debounce_ms: 600,
                page_window: 5,
                dropdown_limit: 1000,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.api.port, 3000);
        assert_eq!(config.api.prefix, "/api");
        assert_eq!(config.api.base_url, None);
        assert_eq!(config.lists.default_page_size, 10);
        assert_eq!(config.lists.search_debounce_ms, 600);
        assert_eq!(config.lists.page_size_options, vec![10, 25, 50, 100]);
        assert_eq!(AppConfig::default(), config);
    }

    #[test]
    fn test_default_page_size_is_always_an_option() {
        let doc = DEFAULT_CONFIG.replace("default_page_size = 10", "default_page_size = 20");
        let config = parse_config(&doc).unwrap();
        assert_eq!(config.lists.page_size_options, vec![10, 20, 25, 50, 100]);
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let doc = DEFAULT_CONFIG.replace("default_page_size = 10", "default_page_size = 0");
        assert!(matches!(parse_config(&doc), Err(ConfigError::Invalid(_))));
        assert!(matches!(parse_config("[api]"), Err(ConfigError::Parse(_))));
    }
}
