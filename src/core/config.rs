//! Alias configuration management.
//!
//! Handles reading and writing the alias table in `<config-dir>/config.toml`.
//! An alias names a storage endpoint; targets like `s3/bucket/key` are
//! addressed relative to it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ConfigError, Result};

/// Name of the config file inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Directory under the home directory used when `--config-dir` is absent.
pub const DEFAULT_CONFIG_DIR: &str = ".skiff";

/// The alias table stored in `config.toml`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Configuration format version.
    pub version: String,
    /// Map of alias names to endpoint entries.
    #[serde(default)]
    pub aliases: BTreeMap<String, AliasEntry>,
}

/// A configured storage endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasEntry {
    /// Endpoint URL. `file://` roots are served by the built-in filesystem
    /// backend; remote schemes belong to a pluggable client.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
    /// Signature API variant, e.g. "s3v4".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<String>,
    /// Bucket lookup style for the endpoint.
    #[serde(default)]
    pub lookup: Lookup,
}

/// Bucket lookup style requested for an endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lookup {
    Dns,
    Path,
    #[default]
    Auto,
}

impl Lookup {
    /// Parse a lookup style, case-insensitively. Anything unrecognized
    /// falls back to `Auto`.
    pub fn from_flag(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "dns" => Lookup::Dns,
            "path" => Lookup::Path,
            _ => Lookup::Auto,
        }
    }
}

impl AliasEntry {
    /// Filesystem root for `file://` endpoints, `None` for remote schemes.
    pub fn file_root(&self) -> Option<PathBuf> {
        self.url.strip_prefix("file://").map(PathBuf::from)
    }
}

impl Config {
    /// Create a new empty configuration with the current version.
    pub fn new() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            aliases: BTreeMap::new(),
        }
    }

    /// Resolve the config directory: the explicit override, or `~/.skiff`.
    pub fn dir(override_dir: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = override_dir {
            return Ok(dir.to_path_buf());
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(DEFAULT_CONFIG_DIR))
    }

    /// Load the alias table from `dir`, treating a missing file as empty.
    ///
    /// Commands must work with no configuration present at all: an
    /// unconfigured target is simply a filesystem path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` when the file exists but is malformed.
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            return Ok(Self::new());
        }
        let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;

        debug!(aliases = config.aliases.len(), "config loaded");
        Ok(config)
    }

    /// Save the alias table to `dir`, creating the directory if needed.
    ///
    /// The file may carry credentials, so permissions are restricted to the
    /// owner on Unix.
    pub fn save(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir).map_err(ConfigError::WriteFile)?;
        let path = dir.join(CONFIG_FILE);
        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(&path, contents).map_err(ConfigError::WriteFile)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))
                .map_err(ConfigError::WriteFile)?;
        }

        debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Look up a configured alias by name.
    pub fn alias(&self, name: &str) -> Option<&AliasEntry> {
        self.aliases.get(name)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(url: &str) -> AliasEntry {
        AliasEntry {
            url: url.to_string(),
            access_key: None,
            secret_key: None,
            api: None,
            lookup: Lookup::Auto,
        }
    }

    #[test]
    fn test_missing_file_is_empty_config() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_or_default(tmp.path()).unwrap();
        assert!(config.aliases.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let tmp = TempDir::new().unwrap();

        let mut config = Config::new();
        config
            .aliases
            .insert("play".to_string(), entry("file:///var/play"));
        config.save(tmp.path()).unwrap();

        let loaded = Config::load_or_default(tmp.path()).unwrap();
        assert_eq!(loaded.aliases.len(), 1);
        assert_eq!(loaded.alias("play").unwrap().url, "file:///var/play");
        assert!(loaded.alias("missing").is_none());
    }

    #[test]
    fn test_malformed_config_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "version = [broken").unwrap();
        assert!(Config::load_or_default(tmp.path()).is_err());
    }

    #[test]
    fn test_lookup_from_flag() {
        assert_eq!(Lookup::from_flag("dns"), Lookup::Dns);
        assert_eq!(Lookup::from_flag("PATH"), Lookup::Path);
        assert_eq!(Lookup::from_flag("auto"), Lookup::Auto);
        assert_eq!(Lookup::from_flag("anything"), Lookup::Auto);
    }

    #[test]
    fn test_file_root() {
        assert_eq!(
            entry("file:///srv/data").file_root(),
            Some(PathBuf::from("/srv/data"))
        );
        assert_eq!(entry("https://s3.amazonaws.com").file_root(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_restricts_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        Config::new().save(tmp.path()).unwrap();

        let mode = std::fs::metadata(tmp.path().join(CONFIG_FILE))
            .unwrap()
            .permissions()
            .mode()
            & 0o777;
        assert_eq!(mode, 0o600);
    }
}
