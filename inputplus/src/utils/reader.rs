//! # Line Readers
//!
//! The prompt loop never talks to stdin/stdout directly. It goes through a
//! [`LineReader`], which shows a prompt, hands back one line, and prints
//! feedback messages.
//!
//! - [`StreamReader`] works over any `BufRead` + `Write` pair. It is what the
//!   free functions use on plain stdin/stdout, and what tests use with an
//!   in-memory cursor.
//! - `EditorReader` (feature `line-editor`) reads through `rustyline`, giving
//!   the user cursor movement and in-session history.

use crate::utils::terminal::PromptError;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

/// A source of input lines plus a sink for prompts and feedback.
pub trait LineReader {
    /// Shows `prompt` on its own line and returns the next line of input,
    /// without the line terminator.
    ///
    /// Returns [`PromptError::Closed`] once input is exhausted. A line that
    /// is not valid UTF-8 surfaces as [`PromptError::Io`] with
    /// [`io::ErrorKind::InvalidData`]; the prompt loop reports it and asks
    /// again.
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError>;

    /// Prints one line of feedback, such as a constraint's error message.
    fn report(&mut self, message: &str) -> Result<(), PromptError>;
}

impl<L: LineReader + ?Sized> LineReader for Box<L> {
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        (**self).read_line(prompt)
    }

    fn report(&mut self, message: &str) -> Result<(), PromptError> {
        (**self).report(message)
    }
}

/// A [`LineReader`] over a buffered input and an output stream.
///
/// # Example
/// ```rust
/// use std::io::Cursor;
/// use inputplus::utils::{LineReader, StreamReader};
///
/// let mut reader = StreamReader::new(Cursor::new("hello\n"), Vec::new());
/// assert_eq!(reader.read_line("Name?").unwrap(), "hello");
///
/// let (_, output) = reader.into_parts();
/// assert_eq!(output, b"Name?\n");
/// ```
pub struct StreamReader<R, W> {
    input: R,
    output: W,
}

/// The reader used on the process's own standard streams.
pub type StdioReader = StreamReader<StdinLock<'static>, Stdout>;

impl StdioReader {
    pub fn stdio() -> Self {
        StreamReader::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> StreamReader<R, W> {
    pub fn new(input: R, output: W) -> Self {
        StreamReader { input, output }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: BufRead, W: Write> LineReader for StreamReader<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        writeln!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }

    fn report(&mut self, message: &str) -> Result<(), PromptError> {
        writeln!(self.output, "{}", message)?;
        self.output.flush()?;
        Ok(())
    }
}

#[cfg(feature = "line-editor")]
pub use editor::EditorReader;

#[cfg(feature = "line-editor")]
mod editor {
    use super::LineReader;
    use crate::utils::terminal::PromptError;
    use rustyline::{DefaultEditor, error::ReadlineError};
    use std::io::{self, Write};

    /// A [`LineReader`] backed by `rustyline`: line editing and history for
    /// the lifetime of the reader.
    #[cfg_attr(docsrs, doc(cfg(feature = "line-editor")))]
    pub struct EditorReader {
        editor: DefaultEditor,
    }

    impl EditorReader {
        pub fn new() -> Result<Self, PromptError> {
            let editor = DefaultEditor::new().map_err(readline_error)?;
            Ok(EditorReader { editor })
        }
    }

    impl LineReader for EditorReader {
        fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
            writeln!(io::stdout(), "{}", prompt)?;

            let line = self.editor.readline("").map_err(readline_error)?;
            self.editor.add_history_entry(line.as_str()).ok();
            Ok(line)
        }

        fn report(&mut self, message: &str) -> Result<(), PromptError> {
            writeln!(io::stdout(), "{}", message)?;
            Ok(())
        }
    }

    fn readline_error(e: ReadlineError) -> PromptError {
        match e {
            ReadlineError::Eof => PromptError::Closed,
            ReadlineError::Interrupted => PromptError::Interrupted,
            ReadlineError::Io(e) => PromptError::Io(e),
            other => PromptError::Io(io::Error::other(other.to_string())),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_ctrl_d_closes_input() {
            assert!(matches!(
                readline_error(ReadlineError::Eof),
                PromptError::Closed
            ));
        }

        #[test]
        fn test_ctrl_c_interrupts() {
            assert!(matches!(
                readline_error(ReadlineError::Interrupted),
                PromptError::Interrupted
            ));
        }

        #[test]
        fn test_io_error_keeps_its_kind() {
            let e = io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8");
            match readline_error(ReadlineError::Io(e)) {
                PromptError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::InvalidData),
                other => panic!("expected an I/O error, got {:?}", other),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_stream_reader_strips_line_endings() {
        let mut reader = StreamReader::new(Cursor::new("one\r\ntwo\nthree"), Vec::new());
        assert_eq!(reader.read_line("?").unwrap(), "one");
        assert_eq!(reader.read_line("?").unwrap(), "two");
        assert_eq!(reader.read_line("?").unwrap(), "three");
    }

    #[test]
    fn test_stream_reader_reports_end_of_input() {
        let mut reader = StreamReader::new(Cursor::new(""), Vec::new());
        assert!(matches!(reader.read_line("?"), Err(PromptError::Closed)));
    }

    #[test]
    fn test_stream_reader_writes_prompt_and_reports() {
        let mut reader = StreamReader::new(Cursor::new("x\n"), Vec::new());
        reader.read_line("Question").unwrap();
        reader.report("Nope").unwrap();

        let (_, output) = reader.into_parts();
        assert_eq!(String::from_utf8(output).unwrap(), "Question\nNope\n");
    }

    #[test]
    fn test_stream_reader_invalid_utf8_is_invalid_data() {
        let mut reader = StreamReader::new(Cursor::new(b"\xff\xfe\nok\n".to_vec()), Vec::new());
        match reader.read_line("?") {
            Err(PromptError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::InvalidData),
            other => panic!("expected invalid data, got {:?}", other),
        }
        assert_eq!(reader.read_line("?").unwrap(), "ok");
    }

    #[test]
    fn test_boxed_reader_delegates() {
        let mut reader: Box<dyn LineReader> =
            Box::new(StreamReader::new(Cursor::new("boxed\n"), Vec::new()));
        assert_eq!(reader.read_line("?").unwrap(), "boxed");
    }
}
