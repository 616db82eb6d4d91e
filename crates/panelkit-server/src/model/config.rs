//! Configuration management for the Panelkit server
//!
//! Values are layered, later sources winning:
//! 1. built-in defaults (applied by the accessors below)
//! 2. `conf/application.yml` or the file named by `--config`
//! 3. `PANELKIT_*` environment variables, `__` separating nested keys
//! 4. command line flags

use std::time::Duration;

use clap::Parser;
use config::{Config, ConfigError, Environment};
use panelkit_persistence::StorageMode;
use panelkit_registry::UnitExtension;

use crate::startup::{LogRotation, LoggingConfig};

pub const DEFAULT_CONFIG_FILE: &str = "conf/application.yml";
pub const DEFAULT_SERVER_PORT: u16 = 8080;
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_PROXY_BASE_PATH: &str = "/proxy";
pub const DEFAULT_PROXY_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_TOKEN_HEADER: &str = "x-api-token";
pub const DEFAULT_PAGE_CACHE_CAPACITY: u64 = 1024;
pub const DEFAULT_PAGE_CACHE_TTL_SECS: u64 = 300;

/// Command line arguments for the server
#[derive(Debug, Default, Parser)]
#[command(name = "panelkit-server", version, about = "No-code admin panel configuration server")]
pub struct Cli {
    /// Configuration file
    #[arg(short = 'c', long = "config", env = "PANELKIT_CONFIG")]
    pub config: Option<String>,
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,
    /// Storage backend: memory or file
    #[arg(short = 's', long = "storage")]
    pub storage: Option<String>,
    #[arg(long = "data-dir")]
    pub data_dir: Option<String>,
    /// Base URL the reverse proxy forwards to
    #[arg(long = "external-api-base", env = "EXTERNAL_API_BASE")]
    pub external_api_base: Option<String>,
}

/// Application configuration loaded from config files and environment
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    pub config: Config,
}

impl Configuration {
    /// Load configuration using the process arguments
    pub fn new() -> anyhow::Result<Self> {
        Self::from_cli(Cli::parse())
    }

    pub fn from_cli(args: Cli) -> anyhow::Result<Self> {
        let file = args
            .config
            .clone()
            .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());

        let mut builder = Config::builder()
            .add_source(config::File::with_name(&file).required(args.config.is_some()))
            .add_source(
                Environment::with_prefix("PANELKIT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        if let Some(v) = args.port {
            builder = builder.set_override("server.port", v)?;
        }
        if let Some(v) = args.storage {
            builder = builder.set_override("storage.mode", v)?;
        }
        if let Some(v) = args.data_dir {
            builder = builder.set_override("storage.data_dir", v)?;
        }
        if let Some(v) = args.external_api_base {
            builder = builder.set_override("proxy.external_api_base", v)?;
        }

        Ok(Configuration {
            config: builder.build()?,
        })
    }

    pub fn from_config(config: Config) -> Self {
        Configuration { config }
    }

    // ========================================================================
    // Server Configuration
    // ========================================================================

    pub fn server_address(&self) -> String {
        self.config
            .get_string("server.address")
            .unwrap_or("0.0.0.0".to_string())
    }

    pub fn server_port(&self) -> u16 {
        self.config
            .get_int("server.port")
            .ok()
            .and_then(|p| u16::try_from(p).ok())
            .unwrap_or(DEFAULT_SERVER_PORT)
    }

    /// Prefix for every route; empty or `/admin` style
    pub fn server_context_path(&self) -> String {
        let path = self
            .config
            .get_string("server.context_path")
            .unwrap_or_default();
        normalize_path(&path)
    }

    // ========================================================================
    // Storage Configuration
    // ========================================================================

    pub fn storage_mode(&self) -> anyhow::Result<StorageMode> {
        match self.config.get_string("storage.mode") {
            Ok(mode) => mode.parse().map_err(anyhow::Error::msg),
            Err(ConfigError::NotFound(_)) => Ok(StorageMode::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn data_dir(&self) -> String {
        self.config
            .get_string("storage.data_dir")
            .unwrap_or(DEFAULT_DATA_DIR.to_string())
    }

    // ========================================================================
    // Proxy Configuration
    // ========================================================================

    pub fn external_api_base(&self) -> Option<String> {
        self.config
            .get_string("proxy.external_api_base")
            .ok()
            .map(|base| base.trim_end_matches('/').to_string())
            .filter(|base| !base.is_empty())
    }

    pub fn proxy_base_path(&self) -> String {
        let path = self
            .config
            .get_string("proxy.base_path")
            .unwrap_or(DEFAULT_PROXY_BASE_PATH.to_string());
        match normalize_path(&path) {
            p if p.is_empty() => DEFAULT_PROXY_BASE_PATH.to_string(),
            p => p,
        }
    }

    pub fn proxy_timeout(&self) -> Duration {
        let ms = self
            .config
            .get_int("proxy.timeout_ms")
            .ok()
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(DEFAULT_PROXY_TIMEOUT_MS);
        Duration::from_millis(ms)
    }

    /// Request header carrying the upstream bearer token
    pub fn proxy_token_header(&self) -> String {
        self.config
            .get_string("proxy.token_header")
            .map(|h| h.to_lowercase())
            .unwrap_or(DEFAULT_TOKEN_HEADER.to_string())
    }

    // ========================================================================
    // Cache Configuration
    // ========================================================================

    pub fn page_cache_capacity(&self) -> u64 {
        self.config
            .get_int("cache.page_capacity")
            .ok()
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(DEFAULT_PAGE_CACHE_CAPACITY)
    }

    pub fn page_cache_ttl(&self) -> Duration {
        let secs = self
            .config
            .get_int("cache.page_ttl_secs")
            .ok()
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(DEFAULT_PAGE_CACHE_TTL_SECS);
        Duration::from_secs(secs)
    }

    // ========================================================================
    // Registry Configuration
    // ========================================================================

    /// Consumer units declared under `registry.extensions`
    pub fn registry_extensions(&self) -> anyhow::Result<Vec<UnitExtension>> {
        match self.config.get::<Vec<UnitExtension>>("registry.extensions") {
            Ok(extensions) => Ok(extensions),
            Err(ConfigError::NotFound(_)) => Ok(Vec::new()),
            Err(e) => Err(anyhow::anyhow!("invalid registry.extensions: {}", e)),
        }
    }

    // ========================================================================
    // Logging Configuration
    // ========================================================================

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig::from_config(
            self.config.get_string("logging.dir").ok(),
            self.config.get_bool("logging.console").unwrap_or(true),
            self.config.get_bool("logging.file").unwrap_or(true),
            self.config
                .get_string("logging.level")
                .unwrap_or("info".to_string()),
        )
        .with_rotation(
            self.config
                .get_string("logging.rotation")
                .ok()
                .and_then(|r| r.parse().ok())
                .unwrap_or(LogRotation::Daily),
        )
        .with_env_overrides()
    }
}

/// `admin/` becomes `/admin`, `/` becomes empty
fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn configuration(yaml: &str) -> Configuration {
        let config = Config::builder()
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()
            .unwrap();
        Configuration::from_config(config)
    }

    #[test]
    fn test_defaults() {
        let cfg = Configuration::default();
        assert_eq!(cfg.server_address(), "0.0.0.0");
        assert_eq!(cfg.server_port(), DEFAULT_SERVER_PORT);
        assert_eq!(cfg.server_context_path(), "");
        assert_eq!(cfg.storage_mode().unwrap(), StorageMode::Memory);
        assert_eq!(cfg.data_dir(), DEFAULT_DATA_DIR);
        assert!(cfg.external_api_base().is_none());
        assert_eq!(cfg.proxy_base_path(), "/proxy");
        assert_eq!(cfg.proxy_timeout(), Duration::from_secs(30));
        assert_eq!(cfg.proxy_token_header(), "x-api-token");
        assert_eq!(cfg.page_cache_capacity(), 1024);
        assert_eq!(cfg.page_cache_ttl(), Duration::from_secs(300));
        assert!(cfg.registry_extensions().unwrap().is_empty());
    }

    #[test]
    fn test_values_from_yaml() {
        let cfg = configuration(
            r#"
server:
  port: 9000
  context_path: "admin/"
storage:
  mode: file
  data_dir: /var/lib/panelkit
proxy:
  external_api_base: "https://api.example.com/v1/"
  base_path: "/api/external"
  token_header: X-Upstream-Token
"#,
        );
        assert_eq!(cfg.server_port(), 9000);
        assert_eq!(cfg.server_context_path(), "/admin");
        assert_eq!(cfg.storage_mode().unwrap(), StorageMode::File);
        assert_eq!(cfg.data_dir(), "/var/lib/panelkit");
        assert_eq!(
            cfg.external_api_base().as_deref(),
            Some("https://api.example.com/v1")
        );
        assert_eq!(cfg.proxy_base_path(), "/api/external");
        assert_eq!(cfg.proxy_token_header(), "x-upstream-token");
    }

    #[test]
    fn test_invalid_storage_mode() {
        let cfg = configuration("storage:\n  mode: rocks\n");
        assert!(cfg.storage_mode().is_err());
    }

    #[test]
    fn test_registry_extensions() {
        let cfg = configuration(
            r#"
registry:
  extensions:
    - kind: column
      slug: price
      component: number
      label: Price
      defaults:
        prefix: "$"
    - kind: block
      slug: list-header
      component: show-header
      override: true
"#,
        );
        let extensions = cfg.registry_extensions().unwrap();
        assert_eq!(extensions.len(), 2);
        assert_eq!(extensions[0].slug, "price");
        assert_eq!(extensions[0].component, "number");
        assert_eq!(extensions[0].defaults.get("prefix"), Some(&serde_json::json!("$")));
        assert!(!extensions[0].override_existing);
        assert!(extensions[1].override_existing);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli {
            config: None,
            port: Some(7070),
            storage: Some("file".to_string()),
            data_dir: Some("/tmp/panelkit".to_string()),
            external_api_base: Some("http://upstream".to_string()),
        };
        let cfg = Configuration::from_cli(cli).unwrap();
        assert_eq!(cfg.server_port(), 7070);
        assert_eq!(cfg.storage_mode().unwrap(), StorageMode::File);
        assert_eq!(cfg.data_dir(), "/tmp/panelkit");
        assert_eq!(cfg.external_api_base().as_deref(), Some("http://upstream"));
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/"), "");
        assert_eq!(normalize_path("admin"), "/admin");
        assert_eq!(normalize_path("/a/b/"), "/a/b");
    }
}
