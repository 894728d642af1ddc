//! Command filter
//!
//! Selects the host commands that can be called from the shell. A command is
//! dropped when its name is ignored, reserved, or when the registry entry is
//! an alias key rather than the canonical one; surviving commands lose any
//! alias that is a reserved word. Collisions are dropped silently.

mod words;

pub use words::{IgnoredCommandSet, ReservedWordSet, BUILTIN_WORDS, DEFAULT_IGNORED, SYNTAX_KEYWORDS};

use tracing::trace;

use crate::registry::Command;

/// Filters a host registry down to the commands safe to expose
#[derive(Debug, Clone, Default)]
pub struct CommandFilter {
    ignored: IgnoredCommandSet,
    reserved: ReservedWordSet,
}

impl CommandFilter {
    /// Create a filter
    pub fn new(
        ignored: IgnoredCommandSet,
        reserved: ReservedWordSet,
    ) -> Self {
        Self { ignored, reserved }
    }

    pub fn ignored(&self) -> &IgnoredCommandSet {
        &self.ignored
    }

    pub fn reserved(&self) -> &ReservedWordSet {
        &self.reserved
    }

    /// Filter `(lookup key, command)` entries.
    ///
    /// Returns fresh copies in enumeration order; the input is left untouched.
    pub fn filter<'a, I>(
        &self,
        entries: I,
    ) -> Vec<Command>
    where
        I: IntoIterator<Item = (&'a str, &'a Command)>,
    {
        entries
            .into_iter()
            .filter(|(key, command)| self.accepts(key, command))
            .map(|(_, command)| self.prune_aliases(command))
            .collect()
    }

    fn accepts(
        &self,
        key: &str,
        command: &Command,
    ) -> bool {
        if key != command.name {
            trace!("`{}` is an alias entry of `{}`", key, command.name);
            return false;
        }
        if self.ignored.contains(&command.name) {
            trace!("`{}` is ignored", command.name);
            return false;
        }
        if self.reserved.contains(&command.name) {
            trace!("`{}` is a reserved word", command.name);
            return false;
        }
        true
    }

    fn prune_aliases(
        &self,
        command: &Command,
    ) -> Command {
        let aliases = command
            .aliases
            .iter()
            .filter(|alias| !self.reserved.contains(alias))
            .cloned()
            .collect();
        Command {
            name: command.name.clone(),
            aliases,
            definition: command.definition.clone(),
        }
    }
}
