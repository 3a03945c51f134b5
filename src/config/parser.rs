use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use product_poster::config::load_config;
///
/// let config = load_config(Path::new("poster.toml")).unwrap();
/// println!("Canvas: {}x{}", config.canvas.width, config.canvas.height);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from a TOML string
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so a generated poster can be traced back to the exact
/// configuration that produced it.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ImageFitMode;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r##"
[canvas]
width = 1200
height = 1600

[brand]
name = "Maple Goods"
website = "maple.example"

[layout]
image-fit = "cover"
qr-size = 180

[colors]
accent = "#0055aa"

[fetch]
relay-base = "https://relay.example/api/fetch"
timeout-secs = 15
"##;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.canvas.width, 1200);
        assert_eq!(config.canvas.height, 1600);
        assert_eq!(config.brand.name, "Maple Goods");
        assert_eq!(config.layout.image_fit, ImageFitMode::Cover);
        assert_eq!(config.layout.qr_size, 180);
        assert_eq!(config.colors.accent, "#0055aa");
        assert_eq!(
            config.fetch.relay_base.as_deref(),
            Some("https://relay.example/api/fetch")
        );
        assert_eq!(config.fetch.timeout_secs, 15);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.canvas.width, 1080);
        assert_eq!(config.canvas.height, 1440);
        assert_eq!(config.layout.padding, 60);
        assert_eq!(config.layout.image_fit, ImageFitMode::Contain);
        assert_eq!(config.fetch.timeout_secs, 10);
        assert!(config.fetch.relay_base.is_none());
        assert!(!config.fetch.allow_insecure);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/poster.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[canvas]
width = 0
height = 1440
"#;
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_compute_config_hash() {
        let file = create_temp_config("[canvas]\nwidth = 1080\n");

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("[brand]\nname = \"One\"\n");
        let file2 = create_temp_config("[brand]\nname = \"Two\"\n");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }
}
