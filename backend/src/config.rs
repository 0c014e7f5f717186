use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
    pub favicon_path: PathBuf,
    /// Refuse to start when the model cannot be loaded.
    pub require_model: bool,
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
    pub workers: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            model_path: PathBuf::from("credit_card_fraud.onnx"),
            favicon_path: PathBuf::from("static/favicon.png"),
            require_model: false,
            allowed_origins: Vec::new(),
            workers: None,
        }
    }
}

impl ServerConfig {
    pub const CONFIG_ENV: &'static str = "FRAUD_API_CONFIG";
    pub const DEFAULT_CONFIG_FILE: &'static str = "config/server.yaml";

    /// Defaults, then the YAML file (if any), then environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var(Self::CONFIG_ENV) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => {
                let default_file = Path::new(Self::DEFAULT_CONFIG_FILE);
                if default_file.is_file() {
                    Self::from_file(default_file)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key: "PORT", value: port })?;
        }
        if let Some(path) = lookup("MODEL_PATH") {
            self.model_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("FAVICON_PATH") {
            self.favicon_path = PathBuf::from(path);
        }
        if let Some(flag) = lookup("REQUIRE_MODEL") {
            self.require_model = parse_flag("REQUIRE_MODEL", flag)?;
        }
        if let Some(origins) = lookup("ALLOWED_ORIGINS") {
            self.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(workers) = lookup("WORKERS") {
            match workers.trim().parse::<usize>() {
                Ok(count) if count > 0 => self.workers = Some(count),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "WORKERS",
                        value: workers,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_flag(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_match_the_demo_client_address() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address(), "127.0.0.1:8000");
        assert!(!config.require_model);
    }

    #[test]
    fn yaml_fills_only_what_it_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("server.yaml");
        std::fs::write(
            &path,
            "port: 9000\nmodel_path: models/fraud.onnx\nallowed_origins:\n  - http://localhost:8080\n",
        )
        .unwrap();

        let config = ServerConfig::from_file(&path).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.model_path, PathBuf::from("models/fraud.onnx"));
        assert_eq!(config.allowed_origins, vec!["http://localhost:8080".to_string()]);
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn broken_yaml_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("server.yaml");
        std::fs::write(&path, "port: [not a port").unwrap();

        let err = ServerConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("server.yaml"));
    }

    #[test]
    fn environment_overrides_the_file() {
        let vars = env_of(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8081"),
            ("MODEL_PATH", "/srv/model.onnx"),
            ("REQUIRE_MODEL", "yes"),
            ("ALLOWED_ORIGINS", "http://a.test, ,http://b.test"),
            ("WORKERS", "2"),
        ]);
        let mut config = ServerConfig::default();
        config.apply_overrides(|key| vars.get(key).cloned()).unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:8081");
        assert_eq!(config.model_path, PathBuf::from("/srv/model.onnx"));
        assert!(config.require_model);
        assert_eq!(config.allowed_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.workers, Some(2));
    }

    #[test]
    fn bad_values_are_rejected() {
        for (key, value) in [("PORT", "eighty"), ("REQUIRE_MODEL", "maybe"), ("WORKERS", "0")] {
            let vars = env_of(&[(key, value)]);
            let err = ServerConfig::default()
                .apply_overrides(|k| vars.get(k).cloned())
                .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { .. }), "{key}");
        }
    }
}
