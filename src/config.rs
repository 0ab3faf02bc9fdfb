//! Site configuration module.
//!
//! Handles loading and validating `config.toml` from the content root.
//! Configuration is sparse: stock defaults cover everything, and a user
//! file only needs the keys it wants to override. Unknown keys are
//! rejected to catch typos early.
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! ignore = [".git", ".gitignore", ".DS_Store", "LICENSE", "config.toml"]
//! assets_dir = "images"     # Category that gets no generated index page
//! styles_dir = "css"        # Stylesheet directory copied into the output
//!
//! [archive]
//! alias = "blog"            # Internal root directory name inside the archive
//!
//! [remote]
//! host = ""                 # ssh destination, e.g. "deploy@example.org"
//! staging_dir = "/tmp"      # Where the archive is uploaded first
//! web_root = "/var/www"     # Directory holding the live site
//! live_dir = "blog"         # Live site directory name under web_root
//! ```
//!
//! The input and output directories are CLI flags, not config keys: they
//! vary per invocation, while everything here is a property of the site.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Entry names skipped entirely during the tree walk, at any depth.
    pub ignore: Vec<String>,
    /// Category directory that gets no generated index page.
    pub assets_dir: String,
    /// Stylesheet directory (sibling of the content root) copied to
    /// `<output>/css`.
    pub styles_dir: String,
    /// Archive packaging settings.
    pub archive: ArchiveConfig,
    /// Remote deployment settings.
    pub remote: RemoteConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            ignore: default_ignore(),
            assets_dir: "images".to_string(),
            styles_dir: "css".to_string(),
            archive: ArchiveConfig::default(),
            remote: RemoteConfig::default(),
        }
    }
}

fn default_ignore() -> Vec<String> {
    [".git", ".gitignore", ".DS_Store", "LICENSE", "config.toml"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Archive packaging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArchiveConfig {
    /// Name the output tree takes inside the archive.
    pub alias: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            alias: "blog".to_string(),
        }
    }
}

/// Remote deployment settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemoteConfig {
    /// ssh destination, e.g. `deploy@example.org`. Empty means
    /// deployment is unconfigured.
    pub host: String,
    /// Remote directory the archive is uploaded to before the swap.
    pub staging_dir: String,
    /// Remote directory holding the live site.
    pub web_root: String,
    /// Live site directory name under `web_root`.
    pub live_dir: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            staging_dir: "/tmp".to_string(),
            web_root: "/var/www".to_string(),
            live_dir: "blog".to_string(),
        }
    }
}

impl SiteConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("archive.alias", &self.archive.alias),
            ("remote.live_dir", &self.remote.live_dir),
        ] {
            if value.is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
            if value.contains('/') {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a single directory name, got '{value}'"
                )));
            }
        }
        if self.ignore.iter().any(String::is_empty) {
            return Err(ConfigError::Validation(
                "ignore entries must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Additional checks for commands that talk to the remote host.
    pub fn validate_for_deploy(&self) -> Result<(), ConfigError> {
        if self.remote.host.is_empty() {
            return Err(ConfigError::Validation(
                "remote.host must be set to deploy (see gen-config)".into(),
            ));
        }
        if !self.remote.web_root.starts_with('/') {
            return Err(ConfigError::Validation(
                "remote.web_root must be an absolute path".into(),
            ));
        }
        Ok(())
    }
}

/// Load config from `config.toml` in the given directory.
///
/// Missing file means stock defaults; a present file only overrides the
/// keys it sets. Unknown keys are rejected, and the result is validated.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = root.join("config.toml");
    let config = if config_path.exists() {
        let content = fs::read_to_string(&config_path)?;
        toml::from_str(&content)?
    } else {
        SiteConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# mdblog Configuration
# ====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.
#
# Place this file in the content root; it is never copied to the output.

# Entry names skipped entirely during the walk, at any depth.
ignore = [".git", ".gitignore", ".DS_Store", "LICENSE", "config.toml"]

# Category directory that gets no generated index page. Its files are
# still copied through to the output.
assets_dir = "images"

# Stylesheet directory, resolved next to the content root and copied to
# <output>/css. Skipped if it does not exist.
styles_dir = "css"

# ---------------------------------------------------------------------------
# Packaging
# ---------------------------------------------------------------------------
[archive]
# Name the output tree takes inside site.tar.gz. The remote side unpacks
# to this name regardless of what the local output directory is called.
alias = "blog"

# ---------------------------------------------------------------------------
# Deployment (backup-swap over ssh; requires passwordless sudo remotely)
# ---------------------------------------------------------------------------
[remote]
# ssh destination. Empty disables the deploy/publish commands.
host = ""

# Where the archive is uploaded before the swap.
staging_dir = "/tmp"

# Directory holding the live site.
web_root = "/var/www"

# Live site directory name under web_root. The previous version is kept
# as <live_dir>.bak until the next deploy.
live_dir = "blog"
"##
}
