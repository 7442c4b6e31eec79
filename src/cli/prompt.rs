//! Interactive prompts over stdin/stdout.

use anyhow::{bail, Result};
use std::io::{BufRead, Write};

/// Asks the user for values during setup and `add`.
pub trait UserPrompt {
    /// Free-text input. `required` keeps asking until something non-blank is entered.
    fn input(&mut self, message: &str, required: bool) -> Result<String>;

    /// Pick one of `choices`; returns its index.
    fn select(&mut self, message: &str, choices: &[String]) -> Result<usize>;
}

/// Line-based prompt on any reader/writer pair.
pub struct LinePrompt<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            bail!("Input closed before a value was entered");
        }
        Ok(line.trim().to_string())
    }
}

/// Prompt bound to the terminal.
pub fn stdin_prompt() -> LinePrompt<std::io::StdinLock<'static>, std::io::Stdout> {
    LinePrompt::new(std::io::stdin().lock(), std::io::stdout())
}

impl<R: BufRead, W: Write> UserPrompt for LinePrompt<R, W> {
    fn input(&mut self, message: &str, required: bool) -> Result<String> {
        loop {
            write!(self.writer, "{} ", message)?;
            self.writer.flush()?;
            let value = self.read_line()?;
            if !required || !value.is_empty() {
                return Ok(value);
            }
            writeln!(self.writer, "A value is required.")?;
        }
    }

    fn select(&mut self, message: &str, choices: &[String]) -> Result<usize> {
        if choices.is_empty() {
            bail!("Nothing to choose from for: {}", message);
        }

        writeln!(self.writer, "{}", message)?;
        for (i, choice) in choices.iter().enumerate() {
            writeln!(self.writer, "  {}. {}", i + 1, choice)?;
        }

        loop {
            write!(self.writer, "Enter choice [1-{}] (default: 1): ", choices.len())?;
            self.writer.flush()?;
            let answer = self.read_line()?;
            if answer.is_empty() {
                return Ok(0);
            }
            match answer.parse::<usize>() {
                Ok(n) if (1..=choices.len()).contains(&n) => return Ok(n - 1),
                _ => writeln!(self.writer, "Please enter a number between 1 and {}.", choices.len())?,
            }
        }
    }
}
