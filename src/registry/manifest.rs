//! Host manifest
//!
//! Describes a host application and its command registry in TOML:
//!
//! ```toml
//! [host]
//! name = "sitectl"
//! binary = "sitectl"
//! version = "9"
//!
//! [[commands]]
//! name = "cache:rebuild"
//! aliases = ["cr", "rebuild"]
//! description = "Rebuild all caches"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Command, CommandRegistry};
use crate::history::is_file_name_token;

/// Errors raised while loading a host manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Manifest file could not be read
    #[error("Cannot read host manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Manifest is not valid TOML or misses required fields
    #[error("Invalid host manifest: {0}")]
    Parse(#[from] toml::de::Error),

    /// Two commands share a canonical name
    #[error("Duplicate command in host manifest: {0}")]
    DuplicateCommand(String),

    /// Version token cannot be used in a file name
    #[error("Invalid host version `{0}`: must be non-empty and free of path separators")]
    InvalidVersion(String),
}

/// Identity of the host application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostInfo {
    /// Display name
    pub name: String,
    /// Executable used to run commands; defaults to `name`
    #[serde(default)]
    pub binary: Option<String>,
    /// Host version token
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    "0".to_string()
}

impl HostInfo {
    /// Executable used to run commands
    pub fn binary(&self) -> &str {
        self.binary.as_deref().unwrap_or(&self.name)
    }
}

/// A parsed host manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostManifest {
    /// Host identity
    pub host: HostInfo,
    /// Registered commands
    #[serde(default)]
    pub commands: Vec<Command>,
}

impl HostManifest {
    /// Load a manifest from disk
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse a manifest from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ManifestError> {
        let manifest: HostManifest = toml::from_str(content)?;
        if !is_file_name_token(&manifest.host.version) {
            return Err(ManifestError::InvalidVersion(manifest.host.version));
        }
        let mut seen = std::collections::HashSet::new();
        for command in &manifest.commands {
            if !seen.insert(command.name.as_str()) {
                return Err(ManifestError::DuplicateCommand(command.name.clone()));
            }
        }
        Ok(manifest)
    }

    /// Build the host's command registry
    pub fn registry(&self) -> CommandRegistry {
        self.commands.iter().cloned().collect()
    }
}
