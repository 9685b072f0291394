//! PDF Content Stream Parser Module
//!
//! This module implements lexical analysis of PDF content streams according to
//! ISO 32000-1 Sections 7.2 and 7.8. It turns raw (already filter-decoded)
//! bytes into an ordered sequence of operand and operator tokens, including
//! the raw payloads of inline images.
//!
//! Content streams found in the wild are frequently non-conformant, so the
//! parser is salvage-first: apart from a mangled `ID` keyword, every
//! irregularity is logged and substituted with a safe default instead of
//! aborting the stream.

pub mod content;
pub mod cursor;
pub mod lexer;
pub mod objects;

pub use self::content::{ContentStreamParser, ImageParameters, Operator, Token, Tokens};
pub use self::cursor::PushbackReader;
pub use self::objects::{PdfArray, PdfDictionary, PdfName, PdfObject, PdfStream, PdfString};

/// Result type for parser operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Hard parser failures.
///
/// Recoverable irregularities (stray delimiters, malformed numbers, corrupt
/// trailing bytes) never show up here; they are logged and replaced with a
/// safe substitute so that as much of the stream as possible survives.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Syntax error at position {position}: {message}")]
    SyntaxError { position: usize, message: String },

    #[error("Pushback window exceeded at position {0}")]
    PushbackOverflow(usize),
}
