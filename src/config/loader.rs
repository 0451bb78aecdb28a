//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::{working_dir, BeaconConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load a TOML file. Relative TLS paths are anchored at the working directory.
///
/// The result is not validated yet so command line overrides can still be
/// applied; call [`finalize`] once they are.
pub fn load_config(path: &Path) -> Result<BeaconConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let mut config = parse_config(&content)?;
    config.tls.resolve_against(&working_dir());
    Ok(config)
}

/// Parse a configuration document. Missing tables and fields take defaults.
pub fn parse_config(content: &str) -> Result<BeaconConfig, ConfigError> {
    toml::from_str(content).map_err(ConfigError::Parse)
}

/// Run semantic validation and hand back the config if it passes.
pub fn finalize(config: BeaconConfig) -> Result<BeaconConfig, ConfigError> {
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
