//! Site aliases
//!
//! Named targets (`@prod`, `@staging`) a session can be pointed at. Records
//! live in a TOML file:
//!
//! ```toml
//! [[site]]
//! name = "prodserver"
//! aliases = ["prod", "production"]
//! root = "/var/www/site"
//! uri = "https://example.com"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::history::is_file_name_token;

/// Alias lookup errors
#[derive(Debug, Error)]
pub enum AliasError {
    /// No record matches the alias
    #[error("Unknown site alias: {0}")]
    Unknown(String),

    /// Alias file could not be read
    #[error("Cannot read alias file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Alias file is malformed
    #[error("Invalid alias file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Canonical name cannot be used in a file name
    #[error("Invalid site name `{0}`: must be non-empty and free of path separators")]
    InvalidName(String),
}

/// A site alias record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteAlias {
    /// Canonical name
    pub name: String,
    /// Alternate names
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Site root on the target host
    #[serde(default)]
    pub root: Option<PathBuf>,
    /// Site URI
    #[serde(default)]
    pub uri: Option<String>,
}

impl SiteAlias {
    fn matches(
        &self,
        name: &str,
    ) -> bool {
        self.name == name || self.aliases.iter().any(|alias| alias == name)
    }
}

/// Resolves an alias string to its record
pub trait AliasResolver {
    /// Look up `alias`; a leading `@` is ignored.
    fn resolve(
        &self,
        alias: &str,
    ) -> Result<SiteAlias, AliasError>;
}

/// Alias records loaded from a file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteAliasManager {
    #[serde(default, rename = "site")]
    sites: Vec<SiteAlias>,
}

impl SiteAliasManager {
    /// Create from records
    pub fn new(sites: Vec<SiteAlias>) -> Self {
        Self { sites }
    }

    /// Load alias records from a TOML file
    pub fn load(path: &Path) -> Result<Self, AliasError> {
        let content = fs::read_to_string(path).map_err(|source| AliasError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse alias records from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, AliasError> {
        let manager: SiteAliasManager = toml::from_str(content)?;
        if let Some(site) = manager.sites.iter().find(|s| !is_file_name_token(&s.name)) {
            return Err(AliasError::InvalidName(site.name.clone()));
        }
        Ok(manager)
    }

    pub fn sites(&self) -> &[SiteAlias] {
        &self.sites
    }
}

impl AliasResolver for SiteAliasManager {
    fn resolve(
        &self,
        alias: &str,
    ) -> Result<SiteAlias, AliasError> {
        let name = alias.strip_prefix('@').unwrap_or(alias);
        self.sites
            .iter()
            .find(|site| site.matches(name))
            .cloned()
            .ok_or_else(|| AliasError::Unknown(alias.to_string()))
    }
}
