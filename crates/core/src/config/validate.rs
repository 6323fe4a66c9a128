use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Ledger contract address and RPC endpoint are set
/// - Storage bucket and endpoint are set
/// - Updater paths are sane (private != public, extension shape)
/// - Sweep interval and worker pool size are nonzero
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.ledger.contract_address.is_empty() {
        return Err(ConfigError::ValidationError(
            "ledger.contract_address cannot be empty".to_string(),
        ));
    }
    if config.ledger.rpc_endpoint.is_empty() {
        return Err(ConfigError::ValidationError(
            "ledger.rpc_endpoint cannot be empty".to_string(),
        ));
    }

    if config.storage.bucket_name.is_empty() {
        return Err(ConfigError::ValidationError(
            "storage.bucket_name cannot be empty".to_string(),
        ));
    }
    if config.storage.endpoint.is_empty() {
        return Err(ConfigError::ValidationError(
            "storage.endpoint cannot be empty".to_string(),
        ));
    }

    for updater in &config.updaters {
        let (private_path, public_path) = updater.paths();
        if private_path == public_path {
            return Err(ConfigError::ValidationError(format!(
                "updater {}: private_path and public_path must differ",
                updater.asset_class()
            )));
        }
        if let super::UpdaterConfig::BasicFile { extension, .. } = updater {
            if !extension.is_empty() && !extension.starts_with('.') {
                return Err(ConfigError::ValidationError(format!(
                    "updater {}: extension must start with '.'",
                    updater.asset_class()
                )));
            }
        }
    }

    if config.sweep.enabled && config.sweep.interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "sweep.interval_secs cannot be 0".to_string(),
        ));
    }

    if config.orchestrator.max_concurrent_updates == 0 {
        return Err(ConfigError::ValidationError(
            "orchestrator.max_concurrent_updates cannot be 0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_config_from_str, UpdaterConfig};

    fn valid_config() -> Config {
        load_config_from_str(
            r#"
[ledger]
contract_address = "0xabc"
rpc_endpoint = "https://rpc.example.com"

[storage]
access_key = "ak"
secret_key = "sk"
endpoint = "https://s3.example.com"
bucket_name = "collection"

[[updaters]]
kind = "basic_file"
asset_class = "Asset/png"
private_path = "private/assets/png"
public_path = "public/assets/png"
extension = ".png"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_validate_empty_bucket_fails() {
        let mut config = valid_config();
        config.storage.bucket_name.clear();
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_same_paths_fails() {
        let mut config = valid_config();
        if let UpdaterConfig::BasicFile {
            private_path,
            public_path,
            ..
        } = &mut config.updaters[0]
        {
            *private_path = "assets".to_string();
            *public_path = "assets".to_string();
        }
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_extension_without_dot_fails() {
        let mut config = valid_config();
        if let UpdaterConfig::BasicFile { extension, .. } = &mut config.updaters[0] {
            *extension = "png".to_string();
        }
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_sweep_interval_fails() {
        let mut config = valid_config();
        config.sweep.interval_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_worker_pool_fails() {
        let mut config = valid_config();
        config.orchestrator.max_concurrent_updates = 0;
        assert!(validate_config(&config).is_err());
    }
}
