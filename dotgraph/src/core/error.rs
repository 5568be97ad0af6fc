//! The error type that the parser and the graph builder report.

use std::fmt;

/// The different families of problems that can be found in a DOT file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed token, such as an unterminated string.
    Lexical,
    /// Unexpected token for the current parser state.
    Syntax,
    /// Well formed input that does not make sense, such as '->' in a
    /// undirected graph. These are warnings and never abort the parse.
    Semantic,
    /// The file ended in the middle of a block.
    UnexpectedEof,
    /// The parser gave up after recovering from too many errors.
    TooManyErrors,
    /// The input could not be read.
    Io,
}

impl ErrorKind {
    /// Returns true if errors of this kind abort the whole parse.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ErrorKind::UnexpectedEof | ErrorKind::TooManyErrors | ErrorKind::Io
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Lexical => "lexical error",
            ErrorKind::Syntax => "syntax error",
            ErrorKind::Semantic => "warning",
            ErrorKind::UnexpectedEof => "unexpected end of file",
            ErrorKind::TooManyErrors => "too many errors",
            ErrorKind::Io => "i/o error",
        };
        write!(f, "{}", name)
    }
}

/// A diagnostic with a source location. Line and column are 1-based, and are
/// zero when the error is not tied to a location (i/o errors).
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ErrorKind,
    pub message: String,
    pub line: usize,
    pub column: usize,
    /// Char offset into the input, used for printing the error location.
    pub pos: usize,
}

impl ParseError {
    pub fn new(
        kind: ErrorKind,
        message: &str,
        line: usize,
        column: usize,
        pos: usize,
    ) -> Self {
        Self {
            kind,
            message: message.to_string(),
            line,
            column,
            pos,
        }
    }

    pub fn io(message: &str) -> Self {
        Self::new(ErrorKind::Io, message, 0, 0, 0)
    }

    pub fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            return write!(f, "{}: {}", self.kind, self.message);
        }
        write!(
            f,
            "{}:{}: {}: {}",
            self.line, self.column, self.kind, self.message
        )
    }
}

impl std::error::Error for ParseError {}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        ParseError::io(&err.to_string())
    }
}
