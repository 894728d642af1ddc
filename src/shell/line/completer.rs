//! Shell completer
//!
//! Completes built-in words and exposed command names for rustyline.

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Helper;

use crate::filter::BUILTIN_WORDS;
use crate::shell::table::CommandTable;

/// Completes the command word, and the argument of `help`
#[derive(Debug, Clone, Default)]
pub struct ShellCompleter {
    /// Candidate names, sorted and deduplicated
    names: Vec<String>,
}

impl ShellCompleter {
    /// Collect candidates from the built-ins and `table`
    pub fn new(table: &CommandTable) -> Self {
        let mut names: Vec<String> = BUILTIN_WORDS
            .iter()
            .map(|w| w.to_string())
            .chain(table.names().map(str::to_string))
            .collect();
        names.sort();
        names.dedup();
        Self { names }
    }

    /// Start of the word under the cursor and its candidates
    pub fn candidates(
        &self,
        line: &str,
        pos: usize,
    ) -> (usize, Vec<Pair>) {
        let head = &line[..pos];
        let start = head
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        let word = &head[start..];

        let preceding: Vec<&str> = head[..start].split_whitespace().collect();
        let completes_name = match preceding.as_slice() {
            [] => true,
            [first] => matches!(*first, "help" | ":help" | ":h"),
            _ => false,
        };
        if !completes_name {
            return (start, Vec::new());
        }

        let candidates = self
            .names
            .iter()
            .filter(|name| name.starts_with(word))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect();
        (start, candidates)
    }
}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        Ok(self.candidates(line, pos))
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;
}

impl Highlighter for ShellCompleter {}

impl Validator for ShellCompleter {}

impl Helper for ShellCompleter {}
