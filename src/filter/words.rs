//! Reserved and ignored word sets

use std::collections::BTreeSet;

/// Words the shell interprets itself
pub const BUILTIN_WORDS: &[&str] = &["exit", "quit", "help", "history", "clear", "commands"];

/// Words held back for shell syntax
pub const SYNTAX_KEYWORDS: &[&str] = &[
    "if", "else", "elif", "then", "fi", "for", "while", "do", "done", "in", "let", "set",
    "unset", "function", "return", "source", "and", "or", "not", "true", "false", "null",
];

/// Host commands never exposed in the shell
pub const DEFAULT_IGNORED: &[&str] = &["help", "list", "shell", "core:cli", "completion", "_complete"];

/// Identifiers that cannot name a callable in the shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedWordSet {
    words: BTreeSet<String>,
}

impl ReservedWordSet {
    /// Build from an explicit list
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Built-in words plus syntax keywords
    pub fn shell_keywords() -> Self {
        Self::new(BUILTIN_WORDS.iter().chain(SYNTAX_KEYWORDS).copied())
    }

    /// Extend with additional words
    pub fn with_extra<I, S>(
        mut self,
        words: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.words.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn contains(
        &self,
        word: &str,
    ) -> bool {
        self.words.contains(word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(String::as_str)
    }
}

impl Default for ReservedWordSet {
    fn default() -> Self {
        Self::shell_keywords()
    }
}

/// Command names excluded regardless of collisions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredCommandSet {
    names: BTreeSet<String>,
}

impl IgnoredCommandSet {
    /// Build from an explicit list
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Help, listing, completion and the shell launcher itself
    pub fn defaults() -> Self {
        Self::new(DEFAULT_IGNORED.iter().copied())
    }

    /// Extend with additional names
    pub fn with_extra<I, S>(
        mut self,
        names: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn contains(
        &self,
        name: &str,
    ) -> bool {
        self.names.contains(name)
    }
}

impl Default for IgnoredCommandSet {
    fn default() -> Self {
        Self::defaults()
    }
}
