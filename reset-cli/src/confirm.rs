//! Yes/no confirmations for destructive steps

use dialoguer::{theme::ColorfulTheme, Input};
use std::io::{self, BufRead, IsTerminal, Write};
use tracing::debug;

use crate::config::ResetConfig;
use crate::error::{ResetError, Result};

const RETRY_HINT: &str = "Please respond with 'y' or 'n'.";

/// Something that can ask the user a yes/no question.
pub trait Prompt {
    fn ask(&mut self, message: &str) -> Result<bool>;
}

/// Interpret one answer. Anything other than `y` or `n` is rejected.
pub fn parse_answer(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "y" => Some(true),
        "n" => Some(false),
        _ => None,
    }
}

#[allow(clippy::ptr_arg)]
fn validate_answer(input: &String) -> std::result::Result<(), &'static str> {
    match parse_answer(input) {
        Some(_) => Ok(()),
        None => Err(RETRY_HINT),
    }
}

/// Interactive prompts need a terminal on both ends; piped answers are read
/// line by line.
pub fn reads_lines(stdin_is_terminal: bool, stdout_is_terminal: bool) -> bool {
    !stdin_is_terminal || !stdout_is_terminal
}

/// Asks on the controlling terminal, or falls back to reading lines from
/// stdin when either end is not a terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn ask(&mut self, message: &str) -> Result<bool> {
        if reads_lines(io::stdin().is_terminal(), console::user_attended()) {
            let stdin = io::stdin();
            return LinePrompt::new(stdin.lock(), io::stdout()).ask(message);
        }

        let answer: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("{} (y/n)", message))
            .allow_empty(true)
            .validate_with(validate_answer)
            .interact_text()?;

        Ok(parse_answer(&answer).unwrap_or(false))
    }
}

/// Line-oriented prompt over any reader/writer pair.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn ask(&mut self, message: &str) -> Result<bool> {
        loop {
            write!(self.output, "{} (y/n): ", message).map_err(stdio_error)?;
            self.output.flush().map_err(stdio_error)?;

            let mut line = String::new();
            let read = self.input.read_line(&mut line).map_err(stdio_error)?;
            if read == 0 {
                return Err(stdio_error(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input closed before an answer was given",
                )));
            }

            if let Some(answer) = parse_answer(&line) {
                return Ok(answer);
            }
            writeln!(self.output, "{}", RETRY_HINT).map_err(stdio_error)?;
        }
    }
}

fn stdio_error(source: io::Error) -> ResetError {
    ResetError::io("<stdin>", source)
}

/// Decides whether a destructive step may go ahead.
///
/// With `--yes` or under CI every question is answered "yes" without
/// touching the prompt.
pub struct ConfirmationGate<'a> {
    unattended: bool,
    prompt: &'a mut dyn Prompt,
}

impl<'a> ConfirmationGate<'a> {
    pub fn new(config: &ResetConfig, prompt: &'a mut dyn Prompt) -> Self {
        Self {
            unattended: config.unattended(),
            prompt,
        }
    }

    pub fn confirm(&mut self, message: &str) -> Result<bool> {
        if self.unattended {
            debug!(question = message, "confirmation skipped");
            return Ok(true);
        }

        let answer = self.prompt.ask(message)?;
        debug!(question = message, answer, "confirmation answered");
        Ok(answer)
    }
}
