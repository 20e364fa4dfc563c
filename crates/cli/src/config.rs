//! Configuration file loading and environment variable handling.
//!
//! Precedence: CLI args > Environment vars > Config file > Defaults

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Default config file content for `--config-init`.
pub const DEFAULT_CONFIG: &str = r#"# Datumorbit configuration
# See: dorb --help for all options

# Date backend: "chrono" or "time"
driver = "chrono"

# Disable colored output
no_color = false
"#;

/// Configuration loaded from file and environment.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub driver: Option<String>,
    pub no_color: Option<bool>,
}

impl Config {
    /// Get the config file path.
    ///
    /// - Linux/macOS: `~/.config/dorb/config.toml`
    /// - Windows: `%APPDATA%\dorb\config.toml`
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dorb").join("config.toml"))
    }

    /// Load config from file. Returns default if file doesn't exist.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };

        let Ok(contents) = fs::read_to_string(&path) else {
            return Self::default();
        };

        toml::from_str(&contents).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Get driver with precedence: env > config > default.
    pub fn driver(&self) -> String {
        std::env::var("DORB_DRIVER")
            .ok()
            .or_else(|| self.driver.clone())
            .unwrap_or_else(|| "chrono".to_string())
    }

    /// Get no_color with precedence: env > config > default.
    ///
    /// Respects the `NO_COLOR` standard (https://no-color.org/).
    pub fn no_color(&self) -> bool {
        // NO_COLOR is a standard - presence means disable color
        if std::env::var("NO_COLOR").is_ok() {
            return true;
        }
        if std::env::var("DORB_NO_COLOR").is_ok() {
            return true;
        }
        self.no_color.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.driver.as_deref(), Some("chrono"));
        assert_eq!(config.no_color, Some(false));
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.driver.is_none());
        assert!(config.no_color.is_none());
    }
}
