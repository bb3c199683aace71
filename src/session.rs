//! Terminal session controller
//!
//! Owns the gate/command phase machine, the live input line, and the command
//! history. Every entry point returns output lines and effect requests; the
//! session never writes to the display itself, which keeps the whole state
//! machine testable without a terminal.
//!
//! The gate is cosmetic: a plain string comparison against a phrase that
//! ships in the configuration file. It gates the UI flow, not access.

use tracing::{debug, info};

use crate::commands::{self, CommandOutput, Completion, OutputLine};
use crate::config::Config;
use crate::history::{CommandHistory, HistoryNav};

/// A single terminal session
pub struct Session {
    config: Config,
    /// Gate state. Starts true; once cleared it never goes back.
    locked: bool,
    input: String,
    history: CommandHistory,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            locked: true,
            input: String::new(),
            history: CommandHistory::new(),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// The live input line
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Prompt label shown in front of the input line
    pub fn prompt_label(&self) -> String {
        format!("{}@{}:$ ~ ", self.config.username(), self.config.hostname())
    }

    /// Append a typed character to the input line
    pub fn insert_char(&mut self, ch: char) {
        self.input.push(ch);
    }

    /// Delete the last character of the input line
    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Commit the current input line (Enter)
    pub fn submit(&mut self) -> CommandOutput {
        if self.locked {
            self.submit_gate()
        } else {
            self.submit_command()
        }
    }

    fn submit_gate(&mut self) -> CommandOutput {
        let attempt = std::mem::take(&mut self.input);

        // Byte-for-byte comparison; a config without a gate-phrase never opens
        if self.config.gate_phrase() == Some(attempt.as_str()) {
            self.locked = false;
            info!("gate passed, session unlocked");
            self.welcome()
        } else {
            debug!("gate attempt rejected");
            CommandOutput {
                lines: vec![OutputLine::error("Access Denied. Incorrect password.")],
                effects: Vec::new(),
            }
        }
    }

    fn welcome(&self) -> CommandOutput {
        let mut lines: Vec<OutputLine> = self
            .config
            .ascii
            .iter()
            .map(|line| OutputLine::ascii(line.as_str()))
            .collect();
        lines.push(OutputLine::plain(""));
        lines.push(OutputLine::plain(
            self.config
                .about_greeting
                .as_deref()
                .unwrap_or("Welcome to the terminal!"),
        ));
        lines.push(OutputLine::plain(""));
        lines.push(OutputLine::plain("Type \"help\" to see available commands."));
        lines.push(OutputLine::plain(""));
        CommandOutput {
            lines,
            effects: Vec::new(),
        }
    }

    fn submit_command(&mut self) -> CommandOutput {
        let line = std::mem::take(&mut self.input);
        self.history.reset_cursor();

        let command = line.trim();
        if command.is_empty() {
            return CommandOutput::default();
        }

        // Recorded before dispatch, so `history` lists itself
        self.history.push(command);
        debug!(command, "dispatching");

        let echo = format!(
            "{}@{}:$ ~ {}",
            self.config.username(),
            self.config.hostname(),
            command
        );
        let mut output = CommandOutput {
            lines: vec![OutputLine::prompt(echo)],
            effects: Vec::new(),
        };

        let dispatched = commands::dispatch(&self.config, &self.history, command);
        output.lines.extend(dispatched.lines);
        output.effects.extend(dispatched.effects);
        output
    }

    /// Recall an older history entry into the input line (Up)
    pub fn history_previous(&mut self) {
        if self.locked {
            return;
        }
        if let HistoryNav::Recall(entry) = self.history.previous() {
            self.input = entry;
        }
    }

    /// Walk back toward newer history entries (Down)
    pub fn history_next(&mut self) {
        if self.locked {
            return;
        }
        match self.history.next() {
            HistoryNav::Recall(entry) => self.input = entry,
            HistoryNav::ClearInput => self.input.clear(),
            HistoryNav::Unchanged => {}
        }
    }

    /// Drop the input line and any history selection (Escape)
    pub fn cancel(&mut self) {
        if self.locked {
            return;
        }
        self.input.clear();
        self.history.reset_cursor();
    }

    /// Tab completion against the command table
    pub fn complete(&mut self) -> Vec<OutputLine> {
        if self.locked {
            return Vec::new();
        }
        match commands::complete(&self.input) {
            Completion::Replace(command) => {
                self.input = command.to_string();
                Vec::new()
            }
            Completion::Candidates(matches) => {
                vec![OutputLine::info(format!(
                    "Available commands: {}",
                    matches.join(", ")
                ))]
            }
            Completion::NoMatch => Vec::new(),
        }
    }
}
