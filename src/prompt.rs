//! Confirmation of destructive actions.
//!
//! Every content edit and rename goes through [`Interaction::approve`]. In
//! quiet mode the action is announced and assumed approved; otherwise the
//! [`Confirm`] implementation decides.

use crate::errors::Result;
use crate::output_formatter::Highlighter;
use std::io::{self, BufRead, Stdout, StdinLock, Write};

/// A synchronous yes/no decision for one action.
pub trait Confirm {
    /// Asks `question` and returns `true` if the action should go ahead.
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Asks on `output` and reads the answer from `input`, one line per question.
///
/// An answer whose first character is `y` approves. Anything else, including
/// an empty line, declines. End of input declines as well.
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consumes the prompt and returns whatever was written to `output`.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl PromptConfirm<StdinLock<'static>, Stdout> {
    /// A prompt bound to the process's standard input and output.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        write!(self.output, "{question} (y/n) ")?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            log::warn!("Standard input closed, treating the answer as 'n'");
            writeln!(self.output)?;
            return Ok(false);
        }
        Ok(answer.starts_with('y'))
    }
}

/// Shared state of one run's user-facing side: where progress goes, how it is
/// colored and whether actions need confirmation.
pub struct Interaction<'a, W: Write> {
    pub out: &'a mut W,
    pub highlighter: Highlighter,
    confirm: &'a mut dyn Confirm,
    quiet: bool,
}

impl<'a, W: Write> Interaction<'a, W> {
    pub fn new(
        out: &'a mut W,
        confirm: &'a mut dyn Confirm,
        quiet: bool,
        highlighter: Highlighter,
    ) -> Self {
        Self {
            out,
            highlighter,
            confirm,
            quiet,
        }
    }

    /// Decides whether one destructive action goes ahead.
    ///
    /// Quiet mode prints `announcement` and approves; interactive mode asks
    /// `question`.
    pub fn approve(&mut self, question: &str, announcement: &str) -> Result<bool> {
        if self.quiet {
            writeln!(self.out, "{announcement}")?;
            return Ok(true);
        }
        self.out.flush()?;
        self.confirm.confirm(question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_first_character_decides() {
        let mut prompt = PromptConfirm::new(Cursor::new("y\nyes\nn\nY\n\nyikes\n"), Vec::new());

        let answers: Vec<bool> = (0..6).map(|_| prompt.confirm("Go?").unwrap()).collect();
        assert_eq!(answers, vec![true, true, false, false, false, true]);

        let written = String::from_utf8(prompt.into_output()).unwrap();
        assert_eq!(written.matches("Go? (y/n) ").count(), 6);
    }

    #[test]
    fn test_end_of_input_declines() {
        let mut prompt = PromptConfirm::new(io::empty(), Vec::new());
        assert!(!prompt.confirm("Rename?").unwrap());
        assert!(!prompt.confirm("Rename?").unwrap());
    }

    #[test]
    fn test_quiet_never_asks() {
        let mut out = Vec::new();
        let mut prompt = PromptConfirm::new(io::empty(), Vec::new());
        let mut interaction = Interaction::new(&mut out, &mut prompt, true, Highlighter::new(false));

        assert!(interaction.approve("Rename?", "Renaming...").unwrap());

        assert_eq!(String::from_utf8(out).unwrap(), "Renaming...\n");
        assert!(prompt.into_output().is_empty());
    }

    #[test]
    fn test_interactive_asks() {
        let mut out = Vec::new();
        let mut prompt = PromptConfirm::new(Cursor::new("n\n"), Vec::new());
        let mut interaction = Interaction::new(&mut out, &mut prompt, false, Highlighter::new(false));

        assert!(!interaction.approve("Rename?", "Renaming...").unwrap());

        assert!(out.is_empty());
        assert_eq!(String::from_utf8(prompt.into_output()).unwrap(), "Rename? (y/n) ");
    }
}
