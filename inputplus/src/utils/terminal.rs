//! # Terminal Input Helper
//!
//! This module provides the prompt loop. It repeatedly asks the user for a
//! value until the input converts to the requested type and satisfies every
//! [`Constraint`] given.
//!
//! ## Features
//! - Continuously prompts the user until valid input is received.
//! - Numeric prompts accept plain literals or small arithmetic expressions
//!   (see [`crate::expr`]).
//! - Constraints run in order; only the first failure is reported per attempt.
//! - Works on stdin/stdout, on a `rustyline` editor (feature `line-editor`),
//!   or on any [`LineReader`].
//!
//! ## Usage
//!
//! ### Example 1: Text input
//! ```rust,no_run
//! use inputplus::{Constraint, input_string};
//!
//! let name = input_string(
//!     "What's your name?",
//!     &[Constraint::MinLength(2), Constraint::MaxLength(35)],
//! )?;
//! println!("Hello, {}", name);
//! # Ok::<(), inputplus::PromptError>(())
//! ```
//!
//! ### Example 2: Scripted input
//! ```rust
//! use std::io::Cursor;
//! use inputplus::{Constraint, Terminal};
//! use inputplus::utils::StreamReader;
//!
//! let reader = StreamReader::new(Cursor::new("-1\n6*7\n"), Vec::new());
//! let mut terminal = Terminal::new(reader);
//!
//! let answer = terminal.ask_int("Pick a number", &[Constraint::greater_than(0)])?;
//! assert_eq!(answer, 42);
//! # Ok::<(), inputplus::PromptError>(())
//! ```

use crate::constraint::{Constraint, ConstraintError, ValueKind, check_all, first_violation};
use crate::expr::{self, Number};
use crate::utils::reader::{LineReader, StdioReader, StreamReader};
use std::io;
use thiserror::Error;
use tracing::{debug, trace};

const INVALID_EXPRESSION: &str = "Invalid expression";
const OUT_OF_RANGE: &str = "Input is out of range";
const UNREADABLE_LINE: &str = "Couldn't read line..";

/// Errors that end a prompt instead of asking again.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input stream closed")]
    Closed,
    #[error("input interrupted")]
    Interrupted,
    #[error(transparent)]
    Constraint(#[from] ConstraintError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// A prompt loop over a [`LineReader`].
pub struct Terminal<L> {
    reader: L,
}

impl Terminal<StdioReader> {
    /// A terminal on the process's stdin and stdout.
    pub fn stdio() -> Self {
        Terminal::new(StreamReader::stdio())
    }
}

#[cfg(feature = "line-editor")]
impl Terminal<crate::utils::reader::EditorReader> {
    /// A terminal with line editing and history.
    #[cfg_attr(docsrs, doc(cfg(feature = "line-editor")))]
    pub fn editor() -> Result<Self, PromptError> {
        Ok(Terminal::new(crate::utils::reader::EditorReader::new()?))
    }
}

impl<L: LineReader> Terminal<L> {
    pub fn new(reader: L) -> Self {
        Terminal { reader }
    }

    pub fn into_inner(self) -> L {
        self.reader
    }

    /// Prints `prompt` and loops until the trimmed answer satisfies every
    /// length constraint.
    pub fn ask_string(
        &mut self,
        prompt: &str,
        constraints: &[Constraint],
    ) -> Result<String, PromptError> {
        check_all(constraints, ValueKind::Text)?;

        loop {
            let Some(line) = self.next_line(prompt)? else {
                continue;
            };
            let answer = line.trim();

            match first_violation(answer, constraints) {
                None => {
                    trace!(answer, "accepted text input");
                    return Ok(answer.to_string());
                }
                Some(e) => {
                    debug!(answer, reason = %e, "rejected text input");
                    self.reader.report(&e.to_string())?;
                }
            }
        }
    }

    /// Prints `prompt` and loops until the answer converts to a number that
    /// satisfies every constraint.
    ///
    /// Unparsable text and arithmetic errors print `Invalid expression`.
    pub fn ask_float(
        &mut self,
        prompt: &str,
        constraints: &[Constraint],
    ) -> Result<f64, PromptError> {
        check_all(constraints, ValueKind::Number)?;
        self.ask_number(prompt, constraints, |n| Some(n.as_f64()))
    }

    /// Like [`Terminal::ask_float`] with an extra [`Constraint::IsInteger`]
    /// checked after the caller's constraints.
    ///
    /// Integral values outside the `i64` range print `Input is out of range`.
    pub fn ask_int(&mut self, prompt: &str, constraints: &[Constraint]) -> Result<i64, PromptError> {
        check_all(constraints, ValueKind::Number)?;

        let mut constraints = constraints.to_vec();
        constraints.push(Constraint::IsInteger);

        self.ask_number(prompt, &constraints, Number::to_i64)
    }

    fn ask_number<T>(
        &mut self,
        prompt: &str,
        constraints: &[Constraint],
        finish: impl Fn(Number) -> Option<T>,
    ) -> Result<T, PromptError> {
        loop {
            let Some(line) = self.next_line(prompt)? else {
                continue;
            };

            let number = match expr::convert(&line) {
                Ok(n) => n,
                Err(e) => {
                    debug!(answer = line.trim(), reason = %e, "rejected numeric input");
                    self.reader.report(INVALID_EXPRESSION)?;
                    continue;
                }
            };

            if let Some(e) = first_violation(number.as_f64(), constraints) {
                debug!(%number, reason = %e, "rejected numeric input");
                self.reader.report(&e.to_string())?;
                continue;
            }

            match finish(number) {
                Some(value) => {
                    trace!(%number, "accepted numeric input");
                    return Ok(value);
                }
                None => {
                    debug!(%number, "numeric input out of range");
                    self.reader.report(OUT_OF_RANGE)?;
                }
            }
        }
    }

    /// Reads one line. `None` means the line was unreadable and has already
    /// been reported.
    fn next_line(&mut self, prompt: &str) -> Result<Option<String>, PromptError> {
        match self.reader.read_line(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(PromptError::Io(e)) if e.kind() == io::ErrorKind::InvalidData => {
                debug!(error = %e, "unreadable input line");
                self.reader.report(UNREADABLE_LINE)?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "line-editor")] {
        fn interactive_reader() -> Box<dyn LineReader> {
            match crate::utils::reader::EditorReader::new() {
                Ok(editor) => Box::new(editor),
                Err(e) => {
                    debug!(error = %e, "line editor unavailable, using plain stdin");
                    Box::new(StreamReader::stdio())
                }
            }
        }
    } else {
        fn interactive_reader() -> Box<dyn LineReader> {
            Box::new(StreamReader::stdio())
        }
    }
}

impl Terminal<Box<dyn LineReader>> {
    /// The terminal the free functions use: a line editor when the
    /// `line-editor` feature is on and one can be opened, otherwise plain
    /// stdin/stdout.
    ///
    /// Keep one of these around to ask several questions in a row; editor
    /// history then carries over from one prompt to the next.
    pub fn interactive() -> Self {
        Terminal::new(interactive_reader())
    }
}

/// Asks for text on the process's terminal. See [`Terminal::ask_string`].
///
/// Each call opens its own reader, so editor history only lasts for this
/// one prompt. Use [`Terminal::interactive`] to share it across prompts.
pub fn input_string(prompt: &str, constraints: &[Constraint]) -> Result<String, PromptError> {
    Terminal::interactive().ask_string(prompt, constraints)
}

/// Asks for a number on the process's terminal. See [`Terminal::ask_float`].
///
/// Opens a fresh reader per call, like [`input_string`].
pub fn input_float(prompt: &str, constraints: &[Constraint]) -> Result<f64, PromptError> {
    Terminal::interactive().ask_float(prompt, constraints)
}

/// Asks for an integer on the process's terminal. See [`Terminal::ask_int`].
///
/// Opens a fresh reader per call, like [`input_string`].
pub fn input_int(prompt: &str, constraints: &[Constraint]) -> Result<i64, PromptError> {
    Terminal::interactive().ask_int(prompt, constraints)
}
