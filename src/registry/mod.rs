//! Host command registry
//!
//! A read-only view of the commands a host application exposes. Hosts register
//! every command under its canonical name and again under each alias, so
//! enumerating the registry yields alias entries whose lookup key differs from
//! the command name.

pub mod manifest;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A positional argument accepted by a host command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentSpec {
    /// Argument name
    pub name: String,
    /// Help text
    #[serde(default)]
    pub description: String,
    /// Whether the argument must be supplied
    #[serde(default)]
    pub required: bool,
}

/// An option accepted by a host command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Long option name, without leading dashes
    pub name: String,
    /// Single-letter shortcut
    #[serde(default)]
    pub shortcut: Option<String>,
    /// Help text
    #[serde(default)]
    pub description: String,
    /// Whether the option expects a value
    #[serde(default)]
    pub takes_value: bool,
}

/// Arguments and options of a host command.
///
/// Only ever displayed; nothing in the shell interprets it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDefinition {
    /// One-line description
    #[serde(default)]
    pub description: String,
    /// Positional arguments
    #[serde(default)]
    pub arguments: Vec<ArgumentSpec>,
    /// Options
    #[serde(default)]
    pub options: Vec<OptionSpec>,
}

impl CommandDefinition {
    /// Usage synopsis, e.g. `<uri> [path] [--yes]`
    pub fn synopsis(&self) -> String {
        let mut parts: Vec<String> = self
            .arguments
            .iter()
            .map(|arg| {
                if arg.required {
                    format!("<{}>", arg.name)
                } else {
                    format!("[{}]", arg.name)
                }
            })
            .collect();
        parts.extend(self.options.iter().map(|opt| {
            if opt.takes_value {
                format!("[--{}=VALUE]", opt.name)
            } else {
                format!("[--{}]", opt.name)
            }
        }));
        parts.join(" ")
    }
}

/// A command registered by the host application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Canonical name
    pub name: String,
    /// Alternate names
    #[serde(default)]
    pub aliases: IndexSet<String>,
    /// Arguments and options
    #[serde(flatten)]
    pub definition: CommandDefinition,
}

impl Command {
    /// Create a command without aliases or definition
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: IndexSet::new(),
            definition: CommandDefinition::default(),
        }
    }

    /// Add aliases
    pub fn with_aliases<I, S>(
        mut self,
        aliases: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Set the definition
    pub fn with_definition(
        mut self,
        definition: CommandDefinition,
    ) -> Self {
        self.definition = definition;
        self
    }

    /// Namespace of the command (text before the first `:`), if any
    pub fn namespace(&self) -> Option<&str> {
        self.name.split_once(':').map(|(ns, _)| ns)
    }
}

/// Registry of host commands keyed by lookup name
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    entries: IndexMap<String, Command>,
}

impl CommandRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command under its name and each of its aliases.
    ///
    /// An alias key never replaces an entry stored under a canonical name.
    pub fn register(
        &mut self,
        command: Command,
    ) {
        self.entries.insert(command.name.clone(), command.clone());
        for alias in &command.aliases {
            match self.entries.get(alias) {
                Some(existing) if existing.name == *alias => {
                    debug!("Alias `{}` of `{}` shadows a command, skipped", alias, command.name);
                }
                _ => {
                    self.entries.insert(alias.clone(), command.clone());
                }
            }
        }
    }

    /// Look up a command by name or alias
    pub fn get(
        &self,
        key: &str,
    ) -> Option<&Command> {
        self.entries.get(key)
    }

    /// All `(lookup key, command)` entries in registration order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Command)> + '_ {
        self.entries.iter().map(|(key, command)| (key.as_str(), command))
    }

    /// Number of lookup keys, aliases included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Command> for CommandRegistry {
    fn from_iter<T: IntoIterator<Item = Command>>(iter: T) -> Self {
        let mut registry = Self::new();
        for command in iter {
            registry.register(command);
        }
        registry
    }
}
