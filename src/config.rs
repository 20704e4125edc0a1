//! Configuration file support for ferro-gwas.
//!
//! # Example Configuration
//!
//! ```toml
//! [input]
//! dedup_lines = true
//!
//! [resolver]
//! api_url = "https://myvariant.info/v1"
//! batch_size = 1000
//! timeout_seconds = 60
//! keep_unresolved = false
//! ```
//!
//! # Config File Locations
//!
//! Configuration is searched in this order (first found wins):
//! 1. `.ferro-gwas.toml` in current directory
//! 2. `~/.config/ferro/gwas.toml`
//!
//! CLI flags take precedence over config file settings.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::GwasError;
use crate::resolve::{DEFAULT_API_URL, DEFAULT_BATCH_SIZE};

/// Largest batch the resolver service accepts.
pub const MAX_BATCH_SIZE: usize = 1000;

/// Parsed configuration from a `.ferro-gwas.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GwasConfig {
    /// Catalog input settings
    pub input: InputConfig,
    /// Identifier resolver settings
    pub resolver: ResolverConfig,
}

/// `[input]` section.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    /// Drop exact duplicate data lines before parsing (default: true)
    pub dedup_lines: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { dedup_lines: true }
    }
}

/// `[resolver]` section.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Variant service base URL
    pub api_url: String,
    /// Ids per resolver call (default: 1000)
    pub batch_size: usize,
    /// Request timeout in seconds (default: 60)
    pub timeout_seconds: u64,
    /// Keep groups whose rsID has no canonical id, keyed by the rsID (default: false)
    pub keep_unresolved: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            timeout_seconds: 60,
            keep_unresolved: false,
        }
    }
}

impl GwasConfig {
    /// Load configuration from the default locations, falling back to defaults.
    ///
    /// Files that exist but fail to parse are logged and skipped.
    pub fn load() -> Self {
        let mut candidates = vec![PathBuf::from(".ferro-gwas.toml")];
        if let Some(home) = dirs_home() {
            candidates.push(home.join(".config").join("ferro").join("gwas.toml"));
        }

        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::from_file(&path) {
                Ok(config) => {
                    debug!("Loaded configuration from {}", path.display());
                    return config;
                }
                Err(e) => warn!("Ignoring config file {}: {}", path.display(), e),
            }
        }

        Self::default()
    }

    /// Load from an explicit path when given, otherwise search the default locations.
    pub fn load_from(path: Option<&Path>) -> Result<Self, GwasError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::load()),
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GwasError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| GwasError::Config {
            msg: format!("Failed to read {}: {}", path.display(), e),
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML content.
    pub fn parse(content: &str) -> Result<Self, GwasError> {
        let config: GwasConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GwasError> {
        let path = path.as_ref();
        fs::write(path, self.to_toml()?).map_err(|e| GwasError::Config {
            msg: format!("Failed to write {}: {}", path.display(), e),
        })
    }

    /// Serialize to pretty TOML.
    pub fn to_toml(&self) -> Result<String, GwasError> {
        toml::to_string_pretty(self).map_err(|e| GwasError::Config { msg: e.to_string() })
    }

    /// Sample configuration with every option at its default.
    pub fn sample() -> String {
        format!(
            r#"# ferro-gwas configuration

[input]
# Drop exact duplicate data lines before parsing
dedup_lines = true

[resolver]
# Variant service base URL
api_url = "{}"
# Ids per resolver call (1-{})
batch_size = {}
# Request timeout in seconds
timeout_seconds = 60
# Keep unresolved rsIDs as document ids
keep_unresolved = false
"#,
            DEFAULT_API_URL, MAX_BATCH_SIZE, DEFAULT_BATCH_SIZE
        )
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), GwasError> {
        let invalid = |msg: String| Err(GwasError::Config { msg });

        if self.resolver.batch_size == 0 || self.resolver.batch_size > MAX_BATCH_SIZE {
            return invalid(format!(
                "resolver.batch_size must be between 1 and {}, got {}",
                MAX_BATCH_SIZE, self.resolver.batch_size
            ));
        }
        if self.resolver.timeout_seconds == 0 {
            return invalid("resolver.timeout_seconds must be greater than 0".to_string());
        }
        if !(self.resolver.api_url.starts_with("http://")
            || self.resolver.api_url.starts_with("https://"))
        {
            return invalid(format!(
                "resolver.api_url must be an http(s) URL, got {:?}",
                self.resolver.api_url
            ));
        }
        Ok(())
    }
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
