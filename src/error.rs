//! Crate-level error types

use std::path::PathBuf;
use thiserror::Error;

use crate::alias::AliasError;
use crate::registry::manifest::ManifestError;
use crate::shell::TableError;
use crate::util::config::ConfigError;

/// Errors that can occur while bootstrapping or running the shell.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The active site alias could not be resolved
    #[error(transparent)]
    Alias(#[from] AliasError),

    /// The host manifest could not be loaded
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// User configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An exposed command could not be registered with the REPL
    #[error(transparent)]
    Table(#[from] TableError),

    /// The line editor failed
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    /// A host command could not be spawned
    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Root directory given on the command line does not exist
    #[error("Root directory not found: {0}")]
    RootNotFound(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for shell operations
pub type ShellResult<T> = Result<T, ShellError>;
