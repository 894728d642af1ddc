//! cmdshell
//!
//! An interactive shell over a host CLI application. Every command the host
//! registers becomes callable from a line editor, minus the ones that would
//! collide with the shell's own words, and each session keeps its history in
//! a file chosen from the session context (site root, alias, version or
//! working directory).
//!
//! # Example
//!
//! ```no_run
//! use cmdshell::alias::SiteAliasManager;
//! use cmdshell::bootstrap::{Bootstrapper, ManifestHost, SessionOptions};
//! use cmdshell::registry::manifest::HostManifest;
//! use cmdshell::util::config::UserConfig;
//! use std::path::Path;
//!
//! fn main() -> cmdshell::Result<()> {
//!     let manifest = HostManifest::load(Path::new("host.toml"))?;
//!     let mut host = ManifestHost::new(manifest, None);
//!     let options = SessionOptions {
//!         working_directory: std::env::current_dir()?,
//!         ..SessionOptions::default()
//!     };
//!     let boot = Bootstrapper::new(UserConfig::default(), options, SiteAliasManager::default());
//!     boot.launch(&mut host)?;
//!     Ok(())
//! }
//! ```

#![warn(rust_2018_idioms)]

pub mod alias;
pub mod bootstrap;
pub mod error;
pub mod filter;
pub mod history;
pub mod registry;
pub mod shell;

// Utility modules
pub mod util;

// Re-exports
pub use anyhow::{Context, Result};
pub use error::{ShellError, ShellResult};

/// Package version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name
pub const NAME: &str = env!("CARGO_PKG_NAME");
