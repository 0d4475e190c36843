//! Configuration File Loading
//!
//! Finds and parses the application configuration from an ordered list of
//! search locations, in TOML or JSON. Absence is not an error at the
//! default options: the caller gets the built-in defaults and the session
//! proceeds.

use super::{AppConfig, ConfigError};
use crate::error::{Error, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file loader
pub struct ConfigLoader {
    /// Search paths for configuration files (path stems, extension added
    /// per format)
    search_paths: Vec<PathBuf>,
    /// Supported configuration file formats, in trial order
    supported_formats: Vec<ConfigFormat>,
    /// Current configuration file path (if loaded)
    current_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
}

#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Whether to fall back to the default config if none exists
    pub create_default: bool,
    /// Whether to validate configuration after loading
    pub validate: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            create_default: true,
            validate: true,
        }
    }
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            search_paths: Self::get_search_paths(),
            supported_formats: vec![ConfigFormat::Toml, ConfigFormat::Json],
            current_path: None,
        }
    }

    /// Load configuration from the default search paths
    pub fn load() -> Result<AppConfig> {
        Self::new().load_with_options(LoadOptions::default())
    }

    /// Load configuration with custom options
    pub fn load_with_options(&mut self, options: LoadOptions) -> Result<AppConfig> {
        if let Some((path, config)) = self.find_and_load_config()? {
            debug!("Configuration loaded from '{}'", path.display());
            self.current_path = Some(path);

            if options.validate {
                self.validate_config(&config)?;
            }
            return Ok(config);
        }

        // No configuration found anywhere
        if options.create_default {
            debug!("No configuration file found, using defaults");
            Ok(AppConfig::default())
        } else {
            Err(Error::ConfigNotFound)
        }
    }

    /// Load configuration from an explicit file path
    ///
    /// The format comes from the file extension (`.json` is JSON, anything
    /// else parses as TOML). Unlike the search-path load, a problem here is
    /// always an error: the caller named this exact file.
    pub fn load_file(&mut self, path: &Path) -> Result<AppConfig> {
        if !path.exists() {
            return Err(Error::ConfigLoadFailed {
                path: path.to_path_buf(),
                reason: "file does not exist".to_string(),
            });
        }

        let format = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        };

        let config = self.load_config_file(path, format)?;
        self.validate_config(&config)?;
        self.current_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Find and load configuration from search paths
    fn find_and_load_config(&self) -> Result<Option<(PathBuf, AppConfig)>> {
        for path in &self.search_paths {
            for format in &self.supported_formats {
                let config_path = self.get_config_path_for_format(path, *format);

                if config_path.exists() {
                    match self.load_config_file(&config_path, *format) {
                        Ok(config) => return Ok(Some((config_path, config))),
                        Err(e) => {
                            // keep searching, later locations may be fine
                            warn!("Failed to load config from {}: {}", config_path.display(), e);
                            continue;
                        }
                    }
                }
            }
        }

        Ok(None)
    }

    /// Load a specific configuration file
    fn load_config_file(&self, path: &Path, format: ConfigFormat) -> Result<AppConfig> {
        let content = fs::read_to_string(path)?;

        match format {
            ConfigFormat::Toml => toml::from_str(&content).map_err(|e| Error::ConfigParseFailed {
                format: "TOML".to_string(),
                reason: e.to_string(),
            }),
            ConfigFormat::Json => {
                serde_json::from_str(&content).map_err(|e| Error::ConfigParseFailed {
                    format: "JSON".to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Get configuration file path for a specific format
    fn get_config_path_for_format(&self, base_path: &Path, format: ConfigFormat) -> PathBuf {
        let extension = match format {
            ConfigFormat::Toml => "toml",
            ConfigFormat::Json => "json",
        };

        base_path.with_extension(extension)
    }

    /// Get default search paths for configuration files
    ///
    /// Entries are path stems; the loader tries each with every supported
    /// extension, in order.
    fn get_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // Explicit directory override
        if let Ok(dir) = env::var("INCANT_CONFIG_DIR") {
            paths.push(PathBuf::from(dir).join("config"));
        }

        // User config directory
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("incant").join("config"));
        }

        // XDG config home fallback (for platforms that might set it)
        if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg_config).join("incant").join("config"));
        }

        // Home directory fallback
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".incant").join("config"));
        }

        // Current working directory
        if let Ok(cwd) = env::current_dir() {
            paths.push(cwd.join(".incant"));
        }

        paths
    }

    /// Validate configuration values
    fn validate_config(&self, config: &AppConfig) -> Result<()> {
        config.validate().map_err(|e| {
            let field = match e {
                ConfigError::InvalidThreshold(_) => "resolver.fuzzy_threshold",
                ConfigError::InvalidHistorySize(_) => "history.max_entries",
            };
            Error::ConfigValidationFailed {
                field: field.to_string(),
                reason: e.to_string(),
            }
        })
    }

    /// Get the current configuration file path
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    /// List all search paths
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Add a custom search path
    pub fn add_search_path(&mut self, path: PathBuf) {
        self.search_paths.push(path);
    }

    /// Clear all search paths and add a single path
    pub fn set_search_path(&mut self, path: PathBuf) {
        self.search_paths = vec![path];
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
