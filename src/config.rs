use crate::error::{GitSemverError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "gitsemver.toml";

/// File name looked up in the user configuration directory
pub const USER_CONFIG_FILE: &str = ".gitsemver.toml";

/// Represents the complete configuration for git-semver.
///
/// Every field has a default, so an empty file (or no file at all) yields
/// the standard conventional-commit behavior.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub bump: BumpConfig,

    #[serde(default)]
    pub commits: CommitRulesConfig,
}

/// Returns the default remote that releases are pushed to.
fn default_remote() -> String {
    "origin".to_string()
}

fn default_true() -> bool {
    true
}

/// Defaults for the `bump` command.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BumpConfig {
    #[serde(default)]
    pub v_prefix: bool,

    /// `filename:key` descriptors rewritten on every bump
    #[serde(default)]
    pub version_files: Vec<String>,

    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_true")]
    pub push: bool,
}

impl Default for BumpConfig {
    fn default() -> Self {
        BumpConfig {
            v_prefix: false,
            version_files: Vec::new(),
            remote: default_remote(),
            push: true,
        }
    }
}

/// Returns the default commit types that trigger a minor bump.
fn default_minor_types() -> Vec<String> {
    vec!["feat".to_string()]
}

/// Returns the default commit types that trigger a patch bump.
fn default_patch_types() -> Vec<String> {
    vec!["fix".to_string()]
}

/// Returns the default list of breaking change indicators.
fn default_breaking_change_indicators() -> Vec<String> {
    vec!["BREAKING CHANGE".to_string(), "BREAKING-CHANGE".to_string()]
}

/// Rules mapping conventional commits to increments.
///
/// Type names are compared case-insensitively. Breaking change indicators
/// are matched at the start of any line of the message, followed by `:`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CommitRulesConfig {
    #[serde(default = "default_minor_types")]
    pub minor_types: Vec<String>,

    #[serde(default = "default_patch_types")]
    pub patch_types: Vec<String>,

    #[serde(default = "default_breaking_change_indicators")]
    pub breaking_change_indicators: Vec<String>,
}

impl Default for CommitRulesConfig {
    fn default() -> Self {
        CommitRulesConfig {
            minor_types: default_minor_types(),
            patch_types: default_patch_types(),
            breaking_change_indicators: default_breaking_change_indicators(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter (must exist)
/// 2. `gitsemver.toml` in current directory
/// 3. `.gitsemver.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(PathBuf::from(path)),
        None => discover_config_file(),
    };

    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration");
            read_config_file(&path)
        }
        None => {
            tracing::debug!("no configuration file found, using defaults");
            Ok(Config::default())
        }
    }
}

fn discover_config_file() -> Option<PathBuf> {
    let local = Path::new(".").join(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .filter(|path| path.exists())
}

fn read_config_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path).map_err(|e| {
        GitSemverError::config(format!("cannot read {}: {}", path.display(), e))
    })?;

    toml::from_str(&contents)
        .map_err(|e| GitSemverError::config(format!("cannot parse {}: {}", path.display(), e)))
}
