//! History path resolution
//!
//! Picks the file the shell keeps its history in. The name depends on the
//! session: no site root means a per-directory global history, otherwise
//! history is shared per version, per site alias, or per site root.

pub mod digest;

use std::path::{Path, PathBuf};

use crate::alias::{AliasError, AliasResolver};

pub use digest::path_digest;

/// Session facts the history file name is derived from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    /// Whether a site root was found
    pub has_root_environment: bool,
    /// Share history across all sites of one version
    pub use_version_history: bool,
    /// Targeted site alias, e.g. `@prod`
    pub active_alias_name: Option<String>,
    /// Root path, or the version token when version history is on
    pub root_path_or_version: String,
    /// Current working directory
    pub working_directory: String,
}

impl SessionContext {
    /// A session without a site root
    pub fn global(working_directory: impl Into<String>) -> Self {
        Self {
            has_root_environment: false,
            use_version_history: false,
            active_alias_name: None,
            root_path_or_version: String::new(),
            working_directory: working_directory.into(),
        }
    }

    /// A session with a resolved site root
    pub fn rooted(
        root_path_or_version: impl Into<String>,
        working_directory: impl Into<String>,
    ) -> Self {
        Self {
            has_root_environment: true,
            use_version_history: false,
            active_alias_name: None,
            root_path_or_version: root_path_or_version.into(),
            working_directory: working_directory.into(),
        }
    }

    pub fn with_version_history(
        mut self,
        enabled: bool,
    ) -> Self {
        self.use_version_history = enabled;
        self
    }

    pub fn with_alias(
        mut self,
        alias: Option<String>,
    ) -> Self {
        self.active_alias_name = alias;
        self
    }
}

/// Whether `token` can stand as one component of a history file name
pub fn is_file_name_token(token: &str) -> bool {
    !token.is_empty() && token != "." && token != ".." && !token.contains(['/', '\\', '\0'])
}

/// Derives the history file path for a session
#[derive(Debug, Clone)]
pub struct HistoryPathResolver {
    tool_name: String,
}

impl HistoryPathResolver {
    /// `tool_name` prefixes every site-scoped history file
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
        }
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    /// File name (without directory) for the session.
    ///
    /// Version tokens and canonical alias names are used verbatim; their
    /// loaders reject values that are not [`is_file_name_token`].
    pub fn identity(
        &self,
        ctx: &SessionContext,
        aliases: &dyn AliasResolver,
    ) -> Result<String, AliasError> {
        if !ctx.has_root_environment {
            return Ok(format!("global-{}", path_digest(&ctx.working_directory)));
        }
        if ctx.use_version_history {
            return Ok(format!("{}-{}", self.tool_name, ctx.root_path_or_version));
        }
        if let Some(alias) = &ctx.active_alias_name {
            let site = aliases.resolve(alias)?;
            return Ok(format!("{}-site-{}", self.tool_name, site.name));
        }
        Ok(format!(
            "{}-site-{}",
            self.tool_name,
            path_digest(&ctx.root_path_or_version)
        ))
    }

    /// Full history path under `cache_directory`.
    ///
    /// Fails only if the alias collaborator cannot resolve the active alias.
    pub fn resolve(
        &self,
        cache_directory: &Path,
        ctx: &SessionContext,
        aliases: &dyn AliasResolver,
    ) -> Result<PathBuf, AliasError> {
        Ok(cache_directory.join(self.identity(ctx, aliases)?))
    }
}
