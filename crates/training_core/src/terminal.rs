//! Command interpreter for the desktop terminal app.

use serde::{Deserialize, Serialize};

pub const PROMPT: &str = "user@phishnet:~$";

const BANNER: &[&str] = &[
    "PhishOS v1.0.0 [Secure Boot]",
    "(c) 2024 PhishNet Corp. All rights reserved.",
    "",
    "Type 'help' for a list of commands.",
];

/// Scrollback for one terminal window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalSession {
    pub lines: Vec<String>,
}

impl Default for TerminalSession {
    fn default() -> Self {
        Self {
            lines: BANNER.iter().map(|line| line.to_string()).collect(),
        }
    }
}

impl TerminalSession {
    /// Runs `input` and appends the echo plus any response. `now_label` is the text printed by
    /// `date`.
    pub fn execute(&mut self, input: &str, now_label: &str) {
        let command = input.trim().to_lowercase();
        let response = match command.as_str() {
            "clear" => {
                self.lines.clear();
                return;
            }
            "help" => Some("Available commands: help, clear, date, whoami, ls".to_string()),
            "date" => Some(now_label.to_string()),
            "whoami" => Some("root (just kidding, you are employee_427)".to_string()),
            "ls" => Some("Documents  Downloads  Desktop  secrets.txt".to_string()),
            "" => None,
            other => Some(format!("command not found: {other}")),
        };

        self.lines.push(format!("{PROMPT} {input}"));
        self.lines.extend(response);
    }
}
