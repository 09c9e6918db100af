use std::{
    collections::HashMap,
    fmt,
    net::{IpAddr, Ipv4Addr, SocketAddr},
};

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use is_terminal::IsTerminal;
use serde::Deserialize;

use crate::geo::TestRecord;

const PREFIX: &str = "IPGEO";
const FILE: &str = "ipgeo";

#[derive(Debug)]
pub enum LogStyle {
    Auto,
    Always,
    Never,
}

impl Default for LogStyle {
    fn default() -> Self {
        Self::Auto
    }
}

impl LogStyle {
    pub fn is_color(&self) -> bool {
        match self {
            LogStyle::Auto => std::io::stdout().is_terminal(),
            LogStyle::Always => true,
            LogStyle::Never => false,
        }
    }
}

impl<'de> Deserialize<'de> for LogStyle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?.to_lowercase();
        match s.as_str() {
            "auto" => Ok(LogStyle::Auto),
            "always" => Ok(LogStyle::Always),
            "never" => Ok(LogStyle::Never),
            _ => Err(serde::de::Error::unknown_variant(
                &s,
                &["auto", "always", "never"],
            )),
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Log {
    pub level: String,
    pub style: LogStyle,
}

impl Default for Log {
    fn default() -> Self {
        Log {
            level: Self::level(),
            style: LogStyle::default(),
        }
    }
}

impl Log {
    fn level() -> String {
        String::from("ipgeo=info")
    }
}

/// Everything a [`Locator`](crate::Locator) reads while serving a lookup.
#[derive(Deserialize, Clone)]
#[serde(default)]
pub struct LookupConfig {
    /// One of `test`, `freegeoip`, `ipstack`, `ipinfo`. Checked on every lookup.
    pub provider: Option<String>,
    pub cache: bool,
    pub cache_ttl_secs: u64,
    pub cache_capacity: u64,
    /// freegeoip base url.
    pub url: String,
    /// ipstack access key or ipinfo token.
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub test_results: HashMap<String, TestRecord>,
    pub default_test_result: Option<TestRecord>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            provider: None,
            cache: false,
            cache_ttl_secs: 3600,
            cache_capacity: 10_000,
            url: Self::url(),
            api_key: None,
            timeout_secs: 10,
            test_results: HashMap::new(),
            default_test_result: None,
        }
    }
}

impl LookupConfig {
    pub fn url() -> String {
        String::from("https://freegeoip.app")
    }

    pub fn with_provider(provider: impl Into<String>) -> Self {
        Self {
            provider: Some(provider.into()),
            ..Self::default()
        }
    }

    pub fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }
}

impl fmt::Debug for LookupConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookupConfig")
            .field("provider", &self.provider)
            .field("cache", &self.cache)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .field("cache_capacity", &self.cache_capacity)
            .field("url", &self.url)
            .field("api_key_set", &self.api_key.is_some())
            .field("timeout_secs", &self.timeout_secs)
            .field("test_results", &self.test_results.len())
            .field("default_test_result", &self.default_test_result.is_some())
            .finish()
    }
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Config {
    pub log: Log,
    pub addr: SocketAddr,
    pub debug: bool,
    /// Use the first `X-Forwarded-For` entry as the caller address.
    pub trust_forwarded_for: bool,
    pub lookup: LookupConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log: Log::default(),
            addr: Self::addr(),
            debug: false,
            trust_forwarded_for: false,
            lookup: LookupConfig::default(),
        }
    }
}

impl Config {
    fn addr() -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 3040)
    }
}

pub fn load_config() -> Result<Config, ConfigError> {
    ConfigLoader::builder()
        .add_source(File::with_name(FILE).required(false))
        .add_source(
            Environment::with_prefix(PREFIX)
                .separator("__")
                .prefix_separator("_")
                .try_parsing(true),
        )
        .build()
        .and_then(|cfg| cfg.try_deserialize::<Config>())
}

pub fn init_config() -> Config {
    match load_config() {
        Ok(config) => {
            println!("{:#?}", config);
            config
        }
        Err(err) => {
            panic!("{:?}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.log.level, "ipgeo=info");
        assert!(config.lookup.provider.is_none());
        assert!(!config.lookup.cache);
        assert_eq!(config.lookup.url, "https://freegeoip.app");
        assert_eq!(config.lookup.api_key(), "");
    }

    #[test]
    fn api_key_is_not_printed() {
        let config = LookupConfig {
            api_key: Some("secret-token".into()),
            ..LookupConfig::with_provider("ipinfo")
        };
        let printed = format!("{:?}", config);
        assert!(!printed.contains("secret-token"));
        assert!(printed.contains("api_key_set: true"));
    }

    #[test]
    fn deserializes_nested_lookup_section() {
        let config = ConfigLoader::builder()
            .add_source(config::File::from_str(
                r#"
                debug = true

                [lookup]
                provider = "test"
                cache = true

                [lookup.test_results."8.8.8.8"]
                ip = "8.8.8.8"
                city = "Mountain View"

                [lookup.default_test_result]
                ip = "0.0.0.0"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .and_then(|cfg| cfg.try_deserialize::<Config>())
            .unwrap();

        assert!(config.debug);
        assert_eq!(config.lookup.provider.as_deref(), Some("test"));
        assert!(config.lookup.cache);
        let record = &config.lookup.test_results["8.8.8.8"];
        assert_eq!(record["city"], "Mountain View");
        assert_eq!(
            config.lookup.default_test_result.as_ref().unwrap()["ip"],
            "0.0.0.0"
        );
    }
}
