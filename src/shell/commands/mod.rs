//! Shell command dispatch
//!
//! Handles the built-in words and forwards everything else to the exposed
//! host commands.

use std::collections::BTreeMap;
use std::path::Path;

use owo_colors::OwoColorize;

use super::table::{CommandTable, ExposedCommand};
use crate::error::ShellResult;

/// Command result
#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    /// Exit the shell
    Exit,
    /// Continue to next input
    Continue,
    /// Output a message
    Output(String),
    /// Clear the terminal
    ClearScreen,
}

/// History facts shown by the `history` built-in
#[derive(Debug, Clone, Copy)]
pub struct HistoryInfo<'a> {
    /// History file
    pub path: &'a Path,
    /// Entries recorded so far
    pub entries: usize,
}

/// Split an input line into words using shell quoting rules
pub fn parse_line(line: &str) -> Result<Vec<String>, shell_words::ParseError> {
    shell_words::split(line)
}

/// Run one parsed line
pub fn dispatch(
    table: &CommandTable,
    words: &[String],
    history: HistoryInfo<'_>,
    colors: bool,
) -> ShellResult<CommandResult> {
    let Some((first, args)) = words.split_first() else {
        return Ok(CommandResult::Continue);
    };

    let handler = BuiltinHandler::new(table, history, colors);
    if let Some(result) = handler.handle(first, args) {
        return Ok(result);
    }

    match table.lookup(first) {
        Some(exposed) => {
            let status = exposed.invoke(args)?;
            if status == 0 {
                Ok(CommandResult::Continue)
            } else {
                Ok(CommandResult::Output(format!(
                    "`{}` exited with status {}",
                    exposed.name(),
                    status
                )))
            }
        }
        None => Ok(CommandResult::Output(format!("Unknown command: {}", first))),
    }
}

/// Built-in words of the shell
pub struct BuiltinHandler<'a> {
    table: &'a CommandTable,
    history: HistoryInfo<'a>,
    colors: bool,
}

impl<'a> BuiltinHandler<'a> {
    /// Create a new handler
    pub fn new(
        table: &'a CommandTable,
        history: HistoryInfo<'a>,
        colors: bool,
    ) -> Self {
        Self {
            table,
            history,
            colors,
        }
    }

    /// Handle `word` if it is a built-in.
    ///
    /// A leading `:` is accepted, and with it the short forms `:q` and `:h`.
    pub fn handle(
        &self,
        word: &str,
        args: &[String],
    ) -> Option<CommandResult> {
        let word = match word.strip_prefix(':') {
            Some("q") => "quit",
            Some("h") => "help",
            Some(meta) => meta,
            None => word,
        };
        match word {
            "exit" | "quit" => Some(CommandResult::Exit),
            "help" => Some(CommandResult::Output(match args.first() {
                Some(name) => self.describe(name),
                None => self.overview(),
            })),
            "commands" => Some(CommandResult::Output(self.table.names().collect::<Vec<_>>().join("\n"))),
            "history" => Some(CommandResult::Output(format!(
                "History file: {}\nEntries: {}",
                self.history.path.display(),
                self.history.entries
            ))),
            "clear" => Some(CommandResult::ClearScreen),
            _ => None,
        }
    }

    fn heading(
        &self,
        text: &str,
    ) -> String {
        if self.colors {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn label(
        &self,
        text: &str,
    ) -> String {
        if self.colors {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    /// Built-ins, then exposed commands grouped by namespace
    fn overview(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.heading("Built-in commands:"));
        out.push('\n');
        let builtins = [
            ("exit, quit", "Leave the shell"),
            ("help [command]", "Show this help, or help for one command"),
            ("commands", "List every callable name"),
            ("history", "Show the history file"),
            ("clear", "Clear the screen"),
        ];
        for (usage, text) in builtins {
            out.push_str(&format!("  {:<16} {}\n", usage, text));
        }

        if self.table.is_empty() {
            out.push_str("\nNo host commands available.");
            return out;
        }

        let mut groups: BTreeMap<&str, Vec<&ExposedCommand>> = BTreeMap::new();
        for exposed in self.table.iter() {
            groups.entry(exposed.command().namespace().unwrap_or("")).or_default().push(exposed);
        }
        let width = self.table.iter().map(|e| Self::title(e).len()).max().unwrap_or(0);

        out.push('\n');
        out.push_str(&self.heading("Available commands:"));
        for (namespace, commands) in groups {
            out.push('\n');
            if !namespace.is_empty() {
                out.push_str(&self.heading(&format!("{}:", namespace)));
                out.push('\n');
            }
            for exposed in commands {
                let title = Self::title(exposed);
                let padding = " ".repeat(width - title.len());
                out.push_str(&format!(
                    "  {}{} {}\n",
                    self.label(&title),
                    padding,
                    exposed.command().definition.description
                ));
            }
        }
        out.trim_end().to_string()
    }

    fn title(exposed: &ExposedCommand) -> String {
        let aliases = &exposed.command().aliases;
        if aliases.is_empty() {
            exposed.name().to_string()
        } else {
            let aliases: Vec<&str> = aliases.iter().map(String::as_str).collect();
            format!("{} ({})", exposed.name(), aliases.join(", "))
        }
    }

    /// Help for one command
    fn describe(
        &self,
        name: &str,
    ) -> String {
        let Some(exposed) = self.table.lookup(name) else {
            return format!("Unknown command: {}", name);
        };
        let command = exposed.command();
        let definition = &command.definition;

        let mut out = self.label(&command.name);
        if !definition.description.is_empty() {
            out.push_str(&format!(" - {}", definition.description));
        }
        let usage = format!("{} {}", command.name, definition.synopsis());
        out.push_str(&format!("\n{} {}", self.heading("Usage:"), usage.trim_end()));

        if !command.aliases.is_empty() {
            let aliases: Vec<&str> = command.aliases.iter().map(String::as_str).collect();
            out.push_str(&format!("\n{} {}", self.heading("Aliases:"), aliases.join(", ")));
        }
        if !definition.arguments.is_empty() {
            out.push_str(&format!("\n{}", self.heading("Arguments:")));
            for arg in &definition.arguments {
                let required = if arg.required { " (required)" } else { "" };
                out.push_str(&format!("\n  {:<16} {}{}", arg.name, arg.description, required));
            }
        }
        if !definition.options.is_empty() {
            out.push_str(&format!("\n{}", self.heading("Options:")));
            for opt in &definition.options {
                let flag = match &opt.shortcut {
                    Some(short) => format!("-{}, --{}", short, opt.name),
                    None => format!("    --{}", opt.name),
                };
                out.push_str(&format!("\n  {:<16} {}", flag, opt.description));
            }
        }
        out
    }
}
