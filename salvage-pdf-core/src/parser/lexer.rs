//! Lexical primitives
//!
//! Byte classifiers and the low-level readers for numbers, names, literal
//! and hexadecimal strings and barewords, per ISO 32000-1 Section 7.2.
//! All readers operate on a [`PushbackReader`] and salvage what they can
//! from malformed input instead of failing.

use super::cursor::PushbackReader;
use super::objects::{PdfName, PdfObject, PdfString};
use super::ParseResult;
use std::io::Read;
use tracing::warn;

/// PDF whitespace per ISO 32000-1 Table 1 (NUL, HT, LF, FF, CR, SP).
pub fn is_whitespace(byte: u8) -> bool {
    matches!(byte, 0x00 | 0x09 | 0x0A | 0x0C | 0x0D | 0x20)
}

/// Closing delimiters that can never start a token.
pub fn is_closing(byte: u8) -> bool {
    matches!(byte, b')' | b'>' | b']')
}

/// Bytes that terminate a name or keyword bareword.
pub fn is_end_of_name(byte: u8) -> bool {
    matches!(
        byte,
        0x00 | 0x09
            | 0x0A
            | 0x0C
            | 0x0D
            | 0x20
            | b'('
            | b')'
            | b'<'
            | b'>'
            | b'['
            | b']'
            | b'/'
    )
}

/// Skip whitespace and `%` comments (which run to end of line).
pub fn skip_whitespace<R: Read>(r: &mut PushbackReader<R>) -> ParseResult<()> {
    while let Some(byte) = r.peek_byte()? {
        if is_whitespace(byte) {
            r.read_byte()?;
        } else if byte == b'%' {
            skip_comment(r)?;
        } else {
            break;
        }
    }
    Ok(())
}

fn skip_comment<R: Read>(r: &mut PushbackReader<R>) -> ParseResult<()> {
    while let Some(byte) = r.read_byte()? {
        if byte == b'\n' || byte == b'\r' {
            break;
        }
    }
    Ok(())
}

/// Read a numeric literal.
///
/// At most one leading sign and one decimal point are consumed; the token
/// ends at the first byte that is neither a digit nor the first unseen dot,
/// so `1.2.3` lexes as `1.2` followed by `.3`. A run without any digits
/// (a stray `-` or `.`) is substituted with integer 0.
pub fn read_number<R: Read>(r: &mut PushbackReader<R>) -> ParseResult<PdfObject> {
    let mut buffer = Vec::new();
    let first = match r.read_byte()? {
        Some(byte) => byte,
        None => return Ok(PdfObject::Integer(0)),
    };
    buffer.push(first);
    let mut dot_seen = first == b'.';

    while let Some(byte) = r.peek_byte()? {
        if byte.is_ascii_digit() || (byte == b'.' && !dot_seen) {
            if byte == b'.' {
                dot_seen = true;
            }
            buffer.push(byte);
            r.read_byte()?;
        } else {
            break;
        }
    }

    let text = String::from_utf8_lossy(&buffer);
    if let Ok(value) = text.parse::<i64>() {
        Ok(PdfObject::Integer(value))
    } else if let Ok(value) = text.parse::<f64>() {
        Ok(PdfObject::Real(value))
    } else {
        warn!("malformed number {:?} replaced with 0", text);
        Ok(PdfObject::Integer(0))
    }
}

/// Read a name object (e.g. `/Type`), decoding `#xx` hex escapes.
///
/// Expects the cursor to sit on the leading `/`. Broken escapes are kept
/// literally rather than rejected.
pub fn read_name<R: Read>(r: &mut PushbackReader<R>) -> ParseResult<PdfName> {
    r.read_byte()?; // leading '/'
    let mut bytes = Vec::new();

    while let Some(byte) = r.peek_byte()? {
        if is_end_of_name(byte) {
            break;
        }
        r.read_byte()?;

        if byte == b'#' {
            match read_hex_escape(r)? {
                Some(value) => bytes.push(value),
                None => bytes.push(b'#'),
            }
        } else {
            bytes.push(byte);
        }
    }

    Ok(PdfName(String::from_utf8_lossy(&bytes).into_owned()))
}

// Two hex digits after '#'; both are put back when the escape is broken.
fn read_hex_escape<R: Read>(r: &mut PushbackReader<R>) -> ParseResult<Option<u8>> {
    let high = match r.peek_byte()? {
        Some(byte) if byte.is_ascii_hexdigit() => {
            r.read_byte()?;
            byte
        }
        _ => return Ok(None),
    };
    let low = match r.peek_byte()? {
        Some(byte) if byte.is_ascii_hexdigit() => {
            r.read_byte()?;
            byte
        }
        _ => {
            r.unread(high)?;
            return Ok(None);
        }
    };

    Ok(Some(hex_value(high) << 4 | hex_value(low)))
}

fn hex_value(byte: u8) -> u8 {
    match byte {
        b'0'..=b'9' => byte - b'0',
        b'a'..=b'f' => byte - b'a' + 10,
        _ => byte - b'A' + 10,
    }
}

/// Read a literal string delimited by balanced parentheses.
///
/// Expects the cursor to sit on the opening `(`. Handles the standard
/// escapes, 1-3 digit octal escapes and escaped-newline continuations;
/// unknown escapes keep the escaped byte, an unterminated string salvages
/// what was read.
pub fn read_literal_string<R: Read>(r: &mut PushbackReader<R>) -> ParseResult<PdfString> {
    r.read_byte()?; // opening '('
    let mut bytes = Vec::new();
    let mut depth = 1usize;

    loop {
        let byte = match r.read_byte()? {
            Some(byte) => byte,
            None => {
                warn!("unterminated literal string");
                break;
            }
        };

        match byte {
            b'\\' => match r.read_byte()? {
                Some(b'n') => bytes.push(b'\n'),
                Some(b'r') => bytes.push(b'\r'),
                Some(b't') => bytes.push(b'\t'),
                Some(b'b') => bytes.push(0x08),
                Some(b'f') => bytes.push(0x0C),
                Some(escaped @ (b'(' | b')' | b'\\')) => bytes.push(escaped),
                Some(digit @ b'0'..=b'7') => {
                    bytes.push(read_octal_escape(r, digit)?);
                }
                Some(b'\r') => {
                    // line continuation; a following LF belongs to it
                    if r.peek_byte()? == Some(b'\n') {
                        r.read_byte()?;
                    }
                }
                Some(b'\n') => {}
                Some(other) => bytes.push(other),
                None => {
                    warn!("unterminated escape in literal string");
                    break;
                }
            },
            b'(' => {
                depth += 1;
                bytes.push(byte);
            }
            b')' => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
                bytes.push(byte);
            }
            _ => bytes.push(byte),
        }
    }

    Ok(PdfString(bytes))
}

// Up to two more octal digits after the first one.
fn read_octal_escape<R: Read>(r: &mut PushbackReader<R>, first: u8) -> ParseResult<u8> {
    let mut value = (first - b'0') as u32;
    for _ in 0..2 {
        match r.peek_byte()? {
            Some(digit @ b'0'..=b'7') => {
                r.read_byte()?;
                value = value * 8 + (digit - b'0') as u32;
            }
            _ => break,
        }
    }
    Ok(value as u8)
}

/// Read a hexadecimal string.
///
/// Expects the cursor to sit on the opening `<`. Whitespace between digits
/// is ignored, an odd trailing digit is padded with 0, anything else is
/// skipped with a warning, and end of input salvages what was read.
pub fn read_hex_string<R: Read>(r: &mut PushbackReader<R>) -> ParseResult<PdfString> {
    r.read_byte()?; // opening '<'
    let mut bytes = Vec::new();
    let mut nibble: Option<u8> = None;

    loop {
        let byte = match r.read_byte()? {
            Some(byte) => byte,
            None => {
                warn!("unterminated hex string");
                break;
            }
        };

        match byte {
            b'>' => break,
            _ if byte.is_ascii_hexdigit() => {
                let digit = hex_value(byte);
                match nibble.take() {
                    Some(high) => bytes.push(high << 4 | digit),
                    None => nibble = Some(digit),
                }
            }
            _ if is_whitespace(byte) => {}
            _ => warn!("skipped invalid byte 0x{:02x} in hex string", byte),
        }
    }

    if let Some(high) = nibble {
        bytes.push(high << 4);
    }

    Ok(PdfString(bytes))
}

/// Read a keyword bareword: the run of bytes up to the next whitespace or
/// delimiter. Used for `true`/`false`/`null`/`R` and operator fallbacks.
pub fn read_bareword<R: Read>(r: &mut PushbackReader<R>) -> ParseResult<String> {
    let mut bytes = Vec::new();
    while let Some(byte) = r.peek_byte()? {
        if is_end_of_name(byte) {
            break;
        }
        r.read_byte()?;
        bytes.push(byte);
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
