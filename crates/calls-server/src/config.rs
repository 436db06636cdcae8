//! Server configuration, read once at startup.

use std::path::Path;

use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;

/// Where the configuration file lives.
pub const CONFIG_PATH: &str = "/etc/call-manager/configuration.yml";

/// Runtime server configuration, deserialised from YAML.
///
/// ```yaml
/// port: 8080
/// connectionString: /var/lib/call-manager/calls.db
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  /// Port the HTTP listener binds on all interfaces.
  pub port:              u16,
  /// Database connection string handed to the store.
  #[serde(
    rename = "connectionString",
    alias = "connectionstring",
    alias = "connection_string"
  )]
  pub connection_string: String,
}

impl ServerConfig {
  /// Read the YAML file at `path`. The file must exist.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    Config::builder()
      .add_source(File::from(path.as_ref()).format(FileFormat::Yaml))
      .build()?
      .try_deserialize()
  }

  /// Parse configuration from an in-memory YAML document.
  pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
    Config::builder()
      .add_source(File::from_str(yaml, FileFormat::Yaml))
      .build()?
      .try_deserialize()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_camel_case_keys() {
    let cfg = ServerConfig::from_yaml_str(
      "port: 8080\nconnectionString: sqlite:///var/lib/calls.db\n",
    )
    .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.connection_string, "sqlite:///var/lib/calls.db");
  }

  #[test]
  fn accepts_snake_case_connection_string() {
    let cfg =
      ServerConfig::from_yaml_str("port: 9000\nconnection_string: calls.db\n")
        .unwrap();
    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.connection_string, "calls.db");
  }

  #[test]
  fn missing_connection_string_is_an_error() {
    assert!(ServerConfig::from_yaml_str("port: 8080\n").is_err());
  }

  #[test]
  fn missing_file_is_an_error() {
    assert!(ServerConfig::load("/nonexistent/call-manager.yml").is_err());
  }
}
