//! Service Configuration

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Listen address settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Artifact file locations
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactSettings {
    pub scaler_path: String,
    pub model_path: String,
}

/// Service settings, from `config/default.toml` (optional) with
/// `CHURN__`-prefixed environment overrides, e.g. `CHURN__SERVER__PORT=9090`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub artifacts: ArtifactSettings,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("artifacts.scaler_path", "artifacts/scaler.json")?
            .set_default("artifacts.model_path", "artifacts/model.json")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(Environment::with_prefix("CHURN").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::load().unwrap();
        assert_eq!(settings.server.port, 8080);
        assert!(settings.artifacts.scaler_path.ends_with("scaler.json"));
        assert_eq!(settings.bind_addr(), "0.0.0.0:8080");
    }
}
