//! Line-based shell with rustyline
//!
//! Reads lines with editing, completion and persistent history, and runs them
//! against the exposed command table.

use std::fs;
use std::path::PathBuf;

use rustyline::config::Config;
use rustyline::error::ReadlineError;
use rustyline::history::{FileHistory, History};
use rustyline::{CompletionType, EditMode, Editor};
use tracing::{debug, warn};

use crate::error::ShellResult;
use crate::shell::commands::{dispatch, parse_line, CommandResult, HistoryInfo};
use crate::shell::table::CommandTable;

mod completer;
pub use completer::ShellCompleter;

/// Line shell configuration
#[derive(Debug, Clone)]
pub struct LineShellConfig {
    /// Prompt to display
    pub prompt: String,
    /// Enable VI mode
    pub vi_mode: bool,
    /// History file path
    pub history_file: PathBuf,
    /// Maximum history size
    pub history_size: usize,
    /// Colored help output
    pub colors: bool,
}

impl LineShellConfig {
    /// Defaults with the given history file
    pub fn new(history_file: PathBuf) -> Self {
        Self {
            prompt: "> ".into(),
            vi_mode: false,
            history_file,
            history_size: 1000,
            colors: true,
        }
    }
}

/// Line shell
///
/// Owns the terminal until the user exits.
pub struct LineShell {
    /// Configuration
    config: LineShellConfig,
    /// rustyline editor
    editor: Editor<ShellCompleter, FileHistory>,
    /// Exposed commands
    table: CommandTable,
}

impl LineShell {
    /// Create a shell over `table`, loading any existing history
    pub fn new(
        config: LineShellConfig,
        table: CommandTable,
    ) -> ShellResult<Self> {
        let rl_config = Config::builder()
            .history_ignore_space(true)
            .history_ignore_dups(true)?
            .max_history_size(config.history_size)?
            .auto_add_history(false)
            .completion_type(CompletionType::List)
            .edit_mode(if config.vi_mode {
                EditMode::Vi
            } else {
                EditMode::Emacs
            })
            .build();

        let mut editor: Editor<ShellCompleter, FileHistory> = Editor::with_config(rl_config)?;
        editor.set_helper(Some(ShellCompleter::new(&table)));

        if config.history_file.exists() {
            if let Err(e) = editor.load_history(&config.history_file) {
                warn!("Cannot load history from {}: {}", config.history_file.display(), e);
            }
        }

        Ok(Self {
            config,
            editor,
            table,
        })
    }

    /// Exposed commands
    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    /// Run the shell until the user exits, then save history
    pub fn run(&mut self) -> ShellResult<()> {
        println!("{} commands available - type `help` for a list", self.table.len());
        println!("Press Ctrl+D or type `exit` to leave\n");

        loop {
            match self.editor.readline(&self.config.prompt) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    self.editor.add_history_entry(line.as_str())?;

                    match self.execute(&line) {
                        Ok(CommandResult::Exit) => break,
                        Ok(CommandResult::Continue) => {}
                        Ok(CommandResult::Output(msg)) => println!("{}", msg),
                        Ok(CommandResult::ClearScreen) => self.editor.clear_screen()?,
                        Err(e) => println!("Error: {}", e),
                    }
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl-D pressed
                    break;
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl-C pressed
                    continue;
                }
                Err(e) => {
                    self.save_history();
                    return Err(e.into());
                }
            }
        }

        self.save_history();
        Ok(())
    }

    fn execute(
        &self,
        line: &str,
    ) -> ShellResult<CommandResult> {
        let words = match parse_line(line) {
            Ok(words) => words,
            Err(e) => return Ok(CommandResult::Output(format!("Error: {}", e))),
        };
        let history = HistoryInfo {
            path: &self.config.history_file,
            entries: self.editor.history().len(),
        };
        dispatch(&self.table, &words, history, self.config.colors)
    }

    fn save_history(&mut self) {
        let path = &self.config.history_file;
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("Cannot create history directory {}: {}", parent.display(), e);
                return;
            }
        }
        match self.editor.save_history(path) {
            Ok(()) => debug!("History saved to {}", path.display()),
            Err(e) => warn!("Cannot save history to {}: {}", path.display(), e),
        }
    }
}
