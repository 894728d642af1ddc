//! Shell bootstrap
//!
//! Prepares a shell session in a fixed order: derive the session context,
//! resolve the history file, filter the host registry, register the survivors,
//! tear the host down, then hand the terminal to the line shell.

mod host;

pub use host::{locate_root, HostEnvironment, ManifestHost};

use std::path::PathBuf;

use tracing::{debug, info};

use crate::alias::AliasResolver;
use crate::error::ShellResult;
use crate::filter::CommandFilter;
use crate::history::{HistoryPathResolver, SessionContext};
use crate::registry::Command;
use crate::shell::{CommandTable, LineShell, LineShellConfig};
use crate::util::config::UserConfig;

/// Per-invocation session flags
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Share history across sites of the same host version
    pub use_version_history: bool,
    /// Targeted site alias
    pub alias: Option<String>,
    /// Working directory of the invocation
    pub working_directory: PathBuf,
}

/// A shell ready to take over the terminal
#[derive(Debug)]
pub struct PreparedShell {
    /// Line shell settings, history path included
    pub config: LineShellConfig,
    /// Registered commands
    pub table: CommandTable,
}

impl PreparedShell {
    /// Run the shell until the user exits
    pub fn run(self) -> ShellResult<()> {
        LineShell::new(self.config, self.table)?.run()
    }
}

/// Builds shell sessions for a host
pub struct Bootstrapper {
    config: UserConfig,
    options: SessionOptions,
    aliases: Box<dyn AliasResolver>,
}

impl Bootstrapper {
    pub fn new(
        config: UserConfig,
        options: SessionOptions,
        aliases: impl AliasResolver + 'static,
    ) -> Self {
        Self {
            config,
            options,
            aliases: Box::new(aliases),
        }
    }

    pub fn config(&self) -> &UserConfig {
        &self.config
    }

    /// Session facts for `host`
    pub fn session_context(
        &self,
        host: &dyn HostEnvironment,
    ) -> SessionContext {
        let cwd = self.options.working_directory.display().to_string();
        match host.root() {
            None => SessionContext::global(cwd),
            Some(root) => {
                let root_or_version = if self.options.use_version_history {
                    host.version().to_string()
                } else {
                    root.display().to_string()
                };
                SessionContext::rooted(root_or_version, cwd)
                    .with_version_history(self.options.use_version_history)
                    .with_alias(self.options.alias.clone())
            }
        }
    }

    /// History file for a session against `host`
    pub fn history_path(
        &self,
        host: &dyn HostEnvironment,
    ) -> ShellResult<PathBuf> {
        let ctx = self.session_context(host);
        let resolver = HistoryPathResolver::new(&self.config.tool_name);
        Ok(resolver.resolve(&self.config.history_dir(), &ctx, self.aliases.as_ref())?)
    }

    /// Host commands safe to expose, in registry order
    pub fn exposed_commands(
        &self,
        host: &dyn HostEnvironment,
    ) -> Vec<Command> {
        let filter = CommandFilter::new(self.config.commands.ignored(), self.config.commands.reserved());
        filter.filter(host.registry().entries())
    }

    /// Everything up to handing over the terminal, host teardown included
    pub fn prepare(
        &self,
        host: &mut dyn HostEnvironment,
    ) -> ShellResult<PreparedShell> {
        let history_file = self.history_path(host)?;
        info!("History file: {}", history_file.display());

        let repl = &self.config.repl;
        let config = LineShellConfig {
            prompt: repl.prompt.clone(),
            vi_mode: repl.vi_mode,
            history_file,
            history_size: repl.history_size,
            colors: repl.colors,
        };

        let commands = self.exposed_commands(host);
        debug!(
            "Exposing {} of {} registry entries",
            commands.len(),
            host.registry().len()
        );
        let mut table = CommandTable::new(self.config.commands.reserved());
        table.register_all(commands, host.invoker(self.options.alias.as_deref()))?;

        host.teardown()?;
        Ok(PreparedShell { config, table })
    }

    /// Prepare and run the shell; returns once the user exits
    pub fn launch(
        &self,
        host: &mut dyn HostEnvironment,
    ) -> ShellResult<()> {
        self.prepare(host)?.run()
    }
}
