//! Host environments

use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::debug;

use crate::error::{ShellError, ShellResult};
use crate::registry::manifest::HostManifest;
use crate::registry::CommandRegistry;
use crate::shell::{Invoker, ProcessInvoker};

/// The host application the shell fronts
pub trait HostEnvironment {
    /// Host name
    fn name(&self) -> &str;

    /// Host version token
    fn version(&self) -> &str;

    /// Resolved site root, if any
    fn root(&self) -> Option<&Path>;

    /// Snapshot of the host's command registry
    fn registry(&self) -> &CommandRegistry;

    /// Invoker for commands run against `alias`
    fn invoker(
        &self,
        alias: Option<&str>,
    ) -> Rc<dyn Invoker>;

    /// Release host resources before the shell takes over the terminal
    fn teardown(&mut self) -> ShellResult<()>;
}

/// A host described by a manifest and run as a child process
#[derive(Debug)]
pub struct ManifestHost {
    manifest: HostManifest,
    registry: CommandRegistry,
    root: Option<PathBuf>,
}

impl ManifestHost {
    pub fn new(
        manifest: HostManifest,
        root: Option<PathBuf>,
    ) -> Self {
        let registry = manifest.registry();
        Self {
            manifest,
            registry,
            root,
        }
    }

    pub fn manifest(&self) -> &HostManifest {
        &self.manifest
    }
}

impl HostEnvironment for ManifestHost {
    fn name(&self) -> &str {
        &self.manifest.host.name
    }

    fn version(&self) -> &str {
        &self.manifest.host.version
    }

    fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    fn invoker(
        &self,
        alias: Option<&str>,
    ) -> Rc<dyn Invoker> {
        Rc::new(
            ProcessInvoker::new(self.manifest.host.binary())
                .with_alias(alias.map(str::to_string))
                .with_working_dir(self.root.clone()),
        )
    }

    fn teardown(&mut self) -> ShellResult<()> {
        debug!("Tearing down host {}", self.manifest.host.name);
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }
}

/// Pick the site root.
///
/// An explicit root must exist. Otherwise the alias record's root is used, and
/// failing that the nearest ancestor of `cwd` containing `marker`.
pub fn locate_root(
    explicit: Option<&Path>,
    alias_root: Option<&Path>,
    cwd: &Path,
    marker: &str,
) -> ShellResult<Option<PathBuf>> {
    if let Some(root) = explicit {
        if !root.is_dir() {
            return Err(ShellError::RootNotFound(root.to_path_buf()));
        }
        return Ok(Some(root.to_path_buf()));
    }
    if let Some(root) = alias_root {
        return Ok(Some(root.to_path_buf()));
    }
    Ok(cwd
        .ancestors()
        .find(|dir| dir.join(marker).is_file())
        .map(Path::to_path_buf))
}
