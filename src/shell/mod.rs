//! Shell Module
//!
//! The interactive side of cmdshell.
//!
//! This module contains:
//! - [`table::CommandTable`] - Checked mapping from callable names to host commands
//! - [`invoke::Invoker`] - How a host command is run
//! - [`commands::dispatch`] - Built-in words and command dispatch
//! - [`line::LineShell`] - Line-based shell with rustyline

pub mod commands;
pub mod invoke;
pub mod line;
pub mod table;

pub use commands::{dispatch, parse_line, BuiltinHandler, CommandResult, HistoryInfo};
pub use invoke::{Invoker, ProcessInvoker};
pub use line::{LineShell, LineShellConfig, ShellCompleter};
pub use table::{CommandTable, ExposedCommand, TableError};
