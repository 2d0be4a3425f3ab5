use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Storage record key is not blank
/// - Upload size cap is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.storage.record_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "storage.record_key cannot be empty".to_string(),
        ));
    }

    if config.validation.max_size_bytes == 0 {
        return Err(ConfigError::ValidationError(
            "validation.max_size_bytes cannot be 0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{StorageConfig, ValidationConfig};

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_blank_record_key_fails() {
        let config = Config {
            storage: StorageConfig {
                record_key: "  ".to_string(),
                ..StorageConfig::default()
            },
            validation: ValidationConfig::default(),
        };
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_zero_max_size_fails() {
        let config = Config {
            storage: StorageConfig::default(),
            validation: ValidationConfig { max_size_bytes: 0 },
        };
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
