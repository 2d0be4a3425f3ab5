use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::storage::{CorruptRecordPolicy, DEFAULT_RECORD_KEY};
use crate::validation::GIB;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Collection record storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// SQLite key/value database file
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
    /// Key holding the collection record
    #[serde(default = "default_record_key")]
    pub record_key: String,
    /// What to do when the stored record cannot be read
    #[serde(default)]
    pub on_corrupt: CorruptRecordPolicy,
    /// Write the sample catalog when no record exists yet
    #[serde(default = "default_seed_defaults")]
    pub seed_defaults: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            record_key: default_record_key(),
            on_corrupt: CorruptRecordPolicy::default(),
            seed_defaults: default_seed_defaults(),
        }
    }
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("koleksi.db")
}

fn default_record_key() -> String {
    DEFAULT_RECORD_KEY.to_string()
}

fn default_seed_defaults() -> bool {
    true
}

/// Upload validation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ValidationConfig {
    /// Size cap applied to every category (default: 1 GiB)
    #[serde(default = "default_max_size_bytes")]
    pub max_size_bytes: u64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_size_bytes: default_max_size_bytes(),
        }
    }
}

fn default_max_size_bytes() -> u64 {
    GIB
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.storage.path.to_str().unwrap(), "koleksi.db");
        assert_eq!(config.storage.record_key, "collections");
        assert_eq!(config.storage.on_corrupt, CorruptRecordPolicy::Fail);
        assert!(config.storage.seed_defaults);
        assert_eq!(config.validation.max_size_bytes, 1024 * 1024 * 1024);
    }

    #[test]
    fn test_deserialize_custom_storage() {
        let toml = r#"
[storage]
path = "/data/koleksi.sqlite"
record_key = "koleksi"
on_corrupt = "reseed"
seed_defaults = false
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.storage.path.to_str().unwrap(),
            "/data/koleksi.sqlite"
        );
        assert_eq!(config.storage.record_key, "koleksi");
        assert_eq!(config.storage.on_corrupt, CorruptRecordPolicy::Reseed);
        assert!(!config.storage.seed_defaults);
    }

    #[test]
    fn test_deserialize_custom_max_size() {
        let toml = r#"
[validation]
max_size_bytes = 52428800
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.validation.max_size_bytes, 50 * 1024 * 1024);
        assert_eq!(config.storage.record_key, "collections");
    }

    #[test]
    fn test_deserialize_unknown_policy_fails() {
        let toml = r#"
[storage]
on_corrupt = "ignore"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }
}
