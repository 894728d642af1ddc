//! Command invocation

use std::path::PathBuf;
use std::process::Command as Process;

use tracing::debug;

use crate::error::{ShellError, ShellResult};

/// Runs a host command on behalf of the shell
pub trait Invoker {
    /// Run `command` with `args` and return its exit status
    fn invoke(
        &self,
        command: &str,
        args: &[String],
    ) -> ShellResult<i32>;
}

/// Runs host commands as child processes: `<binary> [@alias] <command> <args...>`
#[derive(Debug, Clone)]
pub struct ProcessInvoker {
    binary: String,
    alias: Option<String>,
    working_dir: Option<PathBuf>,
}

impl ProcessInvoker {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            alias: None,
            working_dir: None,
        }
    }

    /// Target a site alias
    pub fn with_alias(
        mut self,
        alias: Option<String>,
    ) -> Self {
        self.alias = alias.map(|a| if a.starts_with('@') { a } else { format!("@{}", a) });
        self
    }

    /// Run commands from `dir`
    pub fn with_working_dir(
        mut self,
        dir: Option<PathBuf>,
    ) -> Self {
        self.working_dir = dir;
        self
    }

    /// Arguments passed to the host binary
    pub fn command_line(
        &self,
        command: &str,
        args: &[String],
    ) -> Vec<String> {
        let mut line = Vec::with_capacity(args.len() + 2);
        if let Some(alias) = &self.alias {
            line.push(alias.clone());
        }
        line.push(command.to_string());
        line.extend(args.iter().cloned());
        line
    }
}

impl Invoker for ProcessInvoker {
    fn invoke(
        &self,
        command: &str,
        args: &[String],
    ) -> ShellResult<i32> {
        let line = self.command_line(command, args);
        debug!("Running {} {}", self.binary, line.join(" "));

        let mut process = Process::new(&self.binary);
        process.args(&line);
        if let Some(dir) = &self.working_dir {
            process.current_dir(dir);
        }
        let status = process.status().map_err(|source| ShellError::Spawn {
            command: self.binary.clone(),
            source,
        })?;
        // Killed by a signal
        Ok(status.code().unwrap_or(-1))
    }
}
