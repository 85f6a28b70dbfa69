use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: None }
    }
}

/// Connection settings for the product-code table.
///
/// An empty `url` means the relational store is not configured; the server
/// still starts and the product-code endpoints report the store as unavailable.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8080 }
fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Build from environment variables only (`SERVER_HOST`, `SERVER_PORT`,
    /// `TOKIO_WORKER_THREADS`, `DATABASE_URL`).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Set but unparsable numeric variables are errors, not silently defaulted.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = AppConfig::default();
        if let Some(host) = lookup("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            cfg.server.port = port
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow!("SERVER_PORT={port:?} is not a valid port: {e}"))?;
        }
        if let Some(threads) = lookup("TOKIO_WORKER_THREADS") {
            let n = threads
                .trim()
                .parse::<usize>()
                .map_err(|e| anyhow!("TOKIO_WORKER_THREADS={threads:?} is not a number: {e}"))?;
            cfg.server.worker_threads = Some(n);
        }
        Ok(cfg)
    }

    /// Prefer `config.toml`, fall back to the environment only when the file
    /// does not exist, then normalize and validate.
    pub fn load_and_validate() -> Result<Self> {
        Self::load_and_validate_from(&config_path())
    }

    pub fn load_and_validate_from(path: &str) -> Result<Self> {
        let mut cfg = match std::fs::read_to_string(path) {
            Ok(content) => parse(&content).with_context(|| format!("invalid config file {path}"))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::from_env()?,
            Err(e) => return Err(anyhow!("cannot read config file {path}: {e}")),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if self.worker_threads == Some(0) {
            self.worker_threads = None;
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
        self.url = self.url.trim().to_string();
    }

    pub fn is_configured(&self) -> bool {
        !self.url.is_empty()
    }

    /// Pool settings are checked even when no URL is set; the URL itself is optional.
    pub fn validate(&self) -> Result<()> {
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_toml_with_defaults() {
        let cfg = parse(
            r#"
            [server]
            port = 9000

            [database]
            url = "postgres://u:p@localhost:5432/codes"
            max_connections = 4
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.database.max_connections, 4);
        assert_eq!(cfg.database.min_connections, 1);
        assert!(cfg.database.is_configured());
    }

    #[test]
    fn empty_file_is_valid_and_unconfigured() {
        let mut cfg = parse("").unwrap();
        cfg.server.normalize().unwrap();
        cfg.database.validate().unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert!(!DatabaseConfig::default().is_configured());
    }

    #[test]
    fn rejects_bad_pool_settings() {
        let db = DatabaseConfig { min_connections: 0, ..Default::default() };
        assert!(db.validate().is_err());

        let db = DatabaseConfig { min_connections: 5, max_connections: 2, ..Default::default() };
        assert!(db.validate().is_err());

        let db = DatabaseConfig { acquire_timeout_secs: 0, ..Default::default() };
        assert!(db.validate().is_err());
    }

    #[test]
    fn rejects_port_zero_and_fills_blank_host() {
        let mut s = ServerConfig { host: "  ".into(), port: 0, worker_threads: Some(0) };
        assert!(s.normalize().is_err());

        s.port = 8081;
        s.normalize().unwrap();
        assert_eq!(s.host, "127.0.0.1");
        assert_eq!(s.worker_threads, None);
    }

    fn tmp_config(content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("configs_{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn malformed_file_is_an_error_not_a_fallback() {
        let path = tmp_config("[server]\nport = \"not a number\"\n");
        let res = AppConfig::load_and_validate_from(path.to_str().unwrap());
        let _ = std::fs::remove_file(&path);
        let err = res.unwrap_err();
        assert!(format!("{err:#}").contains("invalid config file"), "{err:#}");
    }

    #[test]
    fn existing_file_is_used() {
        let path = tmp_config("[server]\nport = 9100\n");
        let cfg = AppConfig::load_and_validate_from(path.to_str().unwrap()).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(cfg.server.port, 9100);
    }

    #[test]
    fn missing_file_is_not_a_read_error() {
        let path = std::env::temp_dir().join(format!("configs_missing_{}.toml", uuid::Uuid::new_v4()));
        let res = AppConfig::load_and_validate_from(path.to_str().unwrap());
        if let Err(e) = res {
            assert!(!format!("{e:#}").contains("config file"), "{e:#}");
        }
    }

    fn port_var(port: &'static str) -> impl Fn(&str) -> Option<String> {
        move |k| (k == "SERVER_PORT").then(|| port.to_string())
    }

    #[test]
    fn env_lookup_rejects_unparsable_numbers() {
        assert_eq!(AppConfig::from_lookup(port_var("9200")).unwrap().server.port, 9200);
        assert!(AppConfig::from_lookup(port_var("eighty")).is_err());
        assert!(AppConfig::from_lookup(port_var("70000")).is_err());

        let threads = |k: &str| (k == "TOKIO_WORKER_THREADS").then(|| "many".to_string());
        assert!(AppConfig::from_lookup(threads).is_err());

        let cfg = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.worker_threads, None);
    }
}
