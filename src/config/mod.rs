// Configuration module entry point
// Loads settings from config.toml + environment and holds the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

use crate::logger::LogLevel;

// Re-export public types
pub use state::AppState;
pub use types::{
    ApiConfig, Config, HealthConfig, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig,
};

/// Prefix for environment overrides, e.g. `REQRES_SERVER__PORT=9000`
const ENV_PREFIX: &str = "REQRES";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("api.base_path", "/api")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "reqres-stub/0.1")?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_default("health.enabled", true)?
            .set_default("health.liveness_path", "/healthz")?
            .set_default("health.readiness_path", "/readyz")?
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate().map_err(config::ConfigError::Message)?;
        Ok(cfg)
    }

    /// Reject values that would only fail later at request time
    pub fn validate(&self) -> Result<(), String> {
        if self.server.workers == Some(0) {
            return Err("server.workers must be at least 1".to_string());
        }
        if !self.api.base_path.starts_with('/') {
            return Err(format!(
                "api.base_path must start with '/': {}",
                self.api.base_path
            ));
        }
        self.logging
            .level
            .parse::<LogLevel>()
            .map_err(|e| format!("logging.level: {e}"))?;
        if self.logging.access_log_format.trim().is_empty() {
            return Err("logging.access_log_format must not be empty".to_string());
        }
        for (name, path) in [
            ("health.liveness_path", &self.health.liveness_path),
            ("health.readiness_path", &self.health.readiness_path),
        ] {
            if !path.starts_with('/') {
                return Err(format!("{name} must start with '/': {path}"));
            }
        }
        if self.performance.read_timeout == 0 && self.performance.write_timeout == 0 {
            return Err("performance.read_timeout or write_timeout must be positive".to_string());
        }
        if self.http.max_body_size == 0 {
            return Err("http.max_body_size must be positive".to_string());
        }
        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to render config: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_temp_config(name: &str, contents: &str) -> String {
        let path = std::env::temp_dir().join(format!(
            "reqres-stub-{name}-{}.toml",
            std::process::id()
        ));
        fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("definitely-missing-reqres-config").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.get_socket_addr().unwrap().port(), 8000);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = write_temp_config(
            "override",
            r#"
[server]
port = 9100
workers = 2

[api]
base_path = "/v2/"

[performance]
max_connections = 64
"#,
        );
        let cfg = Config::load_from(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.server.workers, Some(2));
        assert_eq!(cfg.api.base(), "/v2");
        assert_eq!(cfg.performance.max_connections, Some(64));
        // untouched sections keep their defaults
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.http.max_body_size, 1_048_576);
    }

    #[test]
    fn test_invalid_base_path_rejected() {
        let path = write_temp_config("bad-base", "[api]\nbase_path = \"api\"\n");
        let result = Config::load_from(&path);
        fs::remove_file(&path).ok();

        let err = result.unwrap_err().to_string();
        assert!(err.contains("api.base_path"), "unexpected error: {err}");
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut cfg = Config::default();
        cfg.logging.level = "verbose".to_string();
        assert!(cfg.validate().unwrap_err().contains("logging.level"));
    }

    #[test]
    fn test_invalid_host() {
        let mut cfg = Config::default();
        cfg.server.host = "not a host".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }

    #[test]
    fn test_root_base_path() {
        let api = ApiConfig {
            base_path: "/".to_string(),
        };
        assert_eq!(api.base(), "");
    }

    #[test]
    fn test_to_toml_round_trips() {
        let cfg = Config::default();
        let rendered = cfg.to_toml().unwrap();
        assert!(rendered.contains("[server]"));
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, cfg);
    }
}
