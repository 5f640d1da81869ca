//! Storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::environment::Environment;
use super::error::ValidationError;

/// Where accounts and profiles are kept
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Root directory of the file backend
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Lost when the process exits
    Memory,
    #[default]
    File,
}

impl StorageConfig {
    pub fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        match self.backend {
            StorageBackend::File if self.data_dir.as_os_str().is_empty() => {
                Err(ValidationError::EmptyDataDir)
            }
            StorageBackend::Memory if environment.is_production() => {
                Err(ValidationError::EphemeralStorageInProduction)
            }
            _ => Ok(()),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_file_backend_under_data() {
        let config = StorageConfig::default();
        assert_eq!(config.backend, StorageBackend::File);
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert!(config.validate(Environment::Development).is_ok());
    }

    #[test]
    fn file_backend_needs_a_directory() {
        let config = StorageConfig {
            data_dir: PathBuf::new(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(Environment::Development),
            Err(ValidationError::EmptyDataDir)
        );
    }

    #[test]
    fn memory_backend_rejected_in_production() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            ..Default::default()
        };
        assert!(config.validate(Environment::Development).is_ok());
        assert_eq!(
            config.validate(Environment::Production),
            Err(ValidationError::EphemeralStorageInProduction)
        );
    }
}
