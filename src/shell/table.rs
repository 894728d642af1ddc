//! Exposed command table
//!
//! Maps every callable identifier to the command it runs. Registration is
//! checked: a reserved or already registered primary name is refused, so the
//! REPL never dispatches a reserved word to a host command. Alias collisions
//! are never errors.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

use super::invoke::Invoker;
use crate::error::ShellResult;
use crate::filter::ReservedWordSet;
use crate::registry::Command;

/// Registration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// Primary name or alias is a reserved word
    #[error("`{0}` is a reserved word and cannot name a command")]
    Reserved(String),

    /// Primary name is already exposed
    #[error("A command named `{0}` is already exposed")]
    Duplicate(String),
}

/// A host command callable from the shell
#[derive(Clone)]
pub struct ExposedCommand {
    command: Command,
    invoker: Rc<dyn Invoker>,
}

impl ExposedCommand {
    pub fn new(
        command: Command,
        invoker: Rc<dyn Invoker>,
    ) -> Self {
        Self { command, invoker }
    }

    /// Exposed name
    pub fn name(&self) -> &str {
        &self.command.name
    }

    /// Underlying host command
    pub fn command(&self) -> &Command {
        &self.command
    }

    /// Run the command with `args`, returning its exit status
    pub fn invoke(
        &self,
        args: &[String],
    ) -> ShellResult<i32> {
        self.invoker.invoke(&self.command.name, args)
    }
}

impl fmt::Debug for ExposedCommand {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("ExposedCommand")
            .field("name", &self.command.name)
            .field("aliases", &self.command.aliases)
            .finish_non_exhaustive()
    }
}

/// Callable identifiers registered with the shell
#[derive(Debug)]
pub struct CommandTable {
    reserved: ReservedWordSet,
    commands: Vec<ExposedCommand>,
    index: IndexMap<String, usize>,
}

impl CommandTable {
    /// Create an empty table guarding `reserved`
    pub fn new(reserved: ReservedWordSet) -> Self {
        Self {
            reserved,
            commands: Vec::new(),
            index: IndexMap::new(),
        }
    }

    /// Register a command.
    ///
    /// Nothing is registered when an error is returned. Primary names win over
    /// aliases: a name already indexed as another command's alias takes that
    /// key over, and an alias already taken by any command is skipped.
    pub fn register(
        &mut self,
        exposed: ExposedCommand,
    ) -> Result<(), TableError> {
        let name = exposed.name().to_string();
        if self.reserved.contains(&name) {
            return Err(TableError::Reserved(name));
        }
        if let Some(holder) = self.holder(&name) {
            if holder.name() == name {
                return Err(TableError::Duplicate(name));
            }
        }
        if let Some(alias) = exposed.command.aliases.iter().find(|a| self.reserved.contains(a)) {
            return Err(TableError::Reserved(alias.clone()));
        }

        let slot = self.commands.len();
        if let Some(evicted) = self.index.insert(name.clone(), slot) {
            debug!(
                "Alias `{}` of `{}` replaced by the command of that name",
                name,
                self.commands[evicted].name()
            );
        }
        for alias in &exposed.command.aliases {
            if self.index.contains_key(alias) {
                debug!("Alias `{}` of `{}` already taken, skipped", alias, exposed.name());
                continue;
            }
            self.index.insert(alias.clone(), slot);
        }
        self.commands.push(exposed);
        Ok(())
    }

    /// Register every command of `commands` with the same invoker
    pub fn register_all(
        &mut self,
        commands: Vec<Command>,
        invoker: Rc<dyn Invoker>,
    ) -> Result<(), TableError> {
        for command in commands {
            self.register(ExposedCommand::new(command, Rc::clone(&invoker)))?;
        }
        Ok(())
    }

    fn holder(
        &self,
        key: &str,
    ) -> Option<&ExposedCommand> {
        self.index.get(key).map(|&slot| &self.commands[slot])
    }

    /// Find a command by exposed name or alias
    pub fn lookup(
        &self,
        name: &str,
    ) -> Option<&ExposedCommand> {
        self.holder(name)
    }

    /// Every callable identifier, aliases included
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.index.keys().map(String::as_str)
    }

    /// Exposed commands in registration order
    pub fn iter(&self) -> impl Iterator<Item = &ExposedCommand> + '_ {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
