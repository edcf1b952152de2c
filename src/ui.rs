// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal I/O: output lines, a progress spinner, and prompts

use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use dialoguer::{theme::ColorfulTheme, Confirm, Select};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::errors::{Result, SearchError};

/// Everything the search engine needs from the terminal.
pub trait Terminal {
    fn write_line(&mut self, text: &str);

    /// Write without a trailing newline
    fn write(&mut self, text: &str);

    fn start_progress(&mut self, label: &str);

    fn stop_progress(&mut self);

    /// Yes/no question; blocks until answered
    fn confirm(&mut self, message: &str) -> Result<bool>;

    /// Pick one of `choices`; returns its index
    fn choose(&mut self, message: &str, choices: &[String]) -> Result<usize>;
}

/// Run `work` with a spinner labelled `label`; the spinner is stopped
/// whether `work` succeeds or fails.
pub fn with_progress<T, U>(ui: &mut U, label: &str, work: impl FnOnce() -> Result<T>) -> Result<T>
where
    U: Terminal + ?Sized,
{
    ui.start_progress(label);
    let result = work();
    ui.stop_progress();
    result
}

/// Real terminal: stdout for results, stderr for the spinner and prompts.
pub struct ConsoleUi {
    spinner: Option<ProgressBar>,
    interactive: bool,
}

impl Default for ConsoleUi {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleUi {
    pub fn new() -> Self {
        Self {
            spinner: None,
            interactive: io::stdin().is_terminal() && io::stderr().is_terminal(),
        }
    }
}

impl Terminal for ConsoleUi {
    fn write_line(&mut self, text: &str) {
        match &self.spinner {
            Some(spinner) => spinner.suspend(|| println!("{}", text)),
            None => println!("{}", text),
        }
    }

    fn write(&mut self, text: &str) {
        print!("{}", text);
        let _ = io::stdout().flush();
    }

    fn start_progress(&mut self, label: &str) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(label.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    fn stop_progress(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn confirm(&mut self, message: &str) -> Result<bool> {
        if !self.interactive {
            debug!(message, "not a terminal, declining prompt");
            return Ok(false);
        }
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .default(true)
            .interact()
            .map_err(|e| SearchError::Prompt(e.to_string()))
    }

    fn choose(&mut self, message: &str, choices: &[String]) -> Result<usize> {
        if !self.interactive {
            debug!(message, "not a terminal, taking first choice");
            return Ok(0);
        }
        Select::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .items(choices)
            .default(0)
            .interact()
            .map_err(|e| SearchError::Prompt(e.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory terminal for tests

    use super::*;
    use std::collections::VecDeque;

    #[derive(Debug, Default)]
    pub struct ScriptedUi {
        pub lines: Vec<String>,
        pub progress: Vec<String>,
        pub progress_running: bool,
        pub prompts: Vec<String>,
        pub confirms: VecDeque<bool>,
        pub choices: VecDeque<usize>,
    }

    impl ScriptedUi {
        pub fn confirming(answers: &[bool]) -> Self {
            Self {
                confirms: answers.iter().copied().collect(),
                ..Self::default()
            }
        }

        pub fn output(&self) -> String {
            self.lines.join("\n")
        }
    }

    impl Terminal for ScriptedUi {
        fn write_line(&mut self, text: &str) {
            self.lines.push(text.to_string());
        }

        fn write(&mut self, text: &str) {
            match self.lines.last_mut() {
                Some(last) => last.push_str(text),
                None => self.lines.push(text.to_string()),
            }
        }

        fn start_progress(&mut self, label: &str) {
            self.progress.push(label.to_string());
            self.progress_running = true;
        }

        fn stop_progress(&mut self) {
            self.progress_running = false;
        }

        fn confirm(&mut self, message: &str) -> Result<bool> {
            self.prompts.push(message.to_string());
            self.confirms
                .pop_front()
                .ok_or_else(|| SearchError::Prompt("no scripted answer".into()))
        }

        fn choose(&mut self, message: &str, _choices: &[String]) -> Result<usize> {
            self.prompts.push(message.to_string());
            self.choices
                .pop_front()
                .ok_or_else(|| SearchError::Prompt("no scripted choice".into()))
        }
    }
}
