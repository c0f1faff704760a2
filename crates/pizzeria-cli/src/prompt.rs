//! Line-oriented console prompts.
//!
//! Generic over the reader and writer so sessions can be scripted in tests.

use std::fmt::Display;
use std::io::{BufRead, Write};

use anyhow::{bail, Context};

const AFFIRMATIVE: [&str; 2] = ["y", "yes"];

pub(crate) struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes `question` and returns the trimmed answer.
    ///
    /// # Errors
    ///
    /// Returns an error if the console cannot be written or read, or if
    /// input ends before an answer arrives.
    pub(crate) fn ask(&mut self, question: &str) -> anyhow::Result<String> {
        write!(self.output, "{question}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .with_context(|| format!("failed to read answer to '{question}'"))?;
        if read == 0 {
            bail!("input closed while waiting for '{question}'");
        }
        Ok(line.trim().to_owned())
    }

    /// Uses `given` when it is non-blank, otherwise asks until answered.
    pub(crate) fn ask_unless(
        &mut self,
        given: Option<String>,
        question: &str,
    ) -> anyhow::Result<String> {
        match given {
            Some(value) if !value.trim().is_empty() => Ok(value.trim().to_owned()),
            _ => self.ask_required(question),
        }
    }

    /// Yes/no question: only `y` or `yes`, in any case, counts as yes.
    pub(crate) fn confirm(&mut self, question: &str) -> anyhow::Result<bool> {
        let answer = self.ask(&format!("{question} [y/N]"))?;
        Ok(AFFIRMATIVE
            .iter()
            .any(|yes| answer.eq_ignore_ascii_case(yes)))
    }

    /// Asks until the answer is non-blank.
    pub(crate) fn ask_required(&mut self, question: &str) -> anyhow::Result<String> {
        loop {
            let answer = self.ask(question)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            self.say(format!("{question} cannot be blank."))?;
        }
    }

    pub(crate) fn say(&mut self, line: impl Display) -> anyhow::Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn into_output(self) -> W {
        self.output
    }
}
