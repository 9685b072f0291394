//! PDF Object Model
//!
//! Direct objects as they appear inside content streams, plus the
//! recursive-descent readers for arrays and dictionaries and a serializer
//! used for inspection and round-trip testing. Indirect references cannot
//! legally occur in content streams; the lone-`R` placeholder survives only
//! as a corrupt-stream recovery.

use super::cursor::PushbackReader;
use super::{lexer, ParseResult};
use std::collections::HashMap;
use std::io::{self, Read, Write};
use tracing::warn;

/// PDF Name object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PdfName(pub String);

impl PdfName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// PDF String object (literal or hexadecimal; both carry raw bytes)
#[derive(Debug, Clone, PartialEq)]
pub struct PdfString(pub Vec<u8>);

/// PDF Array object
#[derive(Debug, Clone, PartialEq)]
pub struct PdfArray(pub Vec<PdfObject>);

impl PdfArray {
    /// The elements as floats, if every element is numeric.
    pub fn to_float_vec(&self) -> Option<Vec<f32>> {
        self.0
            .iter()
            .map(|object| object.as_number().map(|n| n as f32))
            .collect()
    }
}

/// PDF Dictionary object
#[derive(Debug, Clone, PartialEq)]
pub struct PdfDictionary(pub HashMap<PdfName, PdfObject>);

impl PdfDictionary {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn get(&self, key: &str) -> Option<&PdfObject> {
        self.0.iter().find(|(name, _)| name.0 == key).map(|(_, v)| v)
    }

    pub fn insert(&mut self, key: PdfName, value: PdfObject) {
        self.0.insert(key, value);
    }
}

impl Default for PdfDictionary {
    fn default() -> Self {
        Self::new()
    }
}

/// PDF Stream object: a dictionary merged with its raw payload bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfStream {
    pub dict: PdfDictionary,
    pub data: Vec<u8>,
}

/// PDF direct object types
#[derive(Debug, Clone, PartialEq)]
pub enum PdfObject {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    String(PdfString),
    Name(PdfName),
    Array(PdfArray),
    Dictionary(PdfDictionary),
    Stream(PdfStream),
    /// Unresolved indirect-reference placeholder (corrupt-stream recovery).
    Reference,
}

impl PdfObject {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PdfObject::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Numeric value of an integer or real.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PdfObject::Integer(value) => Some(*value as f64),
            PdfObject::Real(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PdfObject::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            PdfObject::Name(name) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&[u8]> {
        match self {
            PdfObject::String(string) => Some(&string.0),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&PdfArray> {
        match self {
            PdfObject::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&PdfDictionary> {
        match self {
            PdfObject::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// Serialize the object back to content-stream bytes.
    ///
    /// The output is semantically equivalent to the parsed input; exact
    /// whitespace is not reproduced.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self {
            PdfObject::Null => out.write_all(b"null"),
            PdfObject::Boolean(true) => out.write_all(b"true"),
            PdfObject::Boolean(false) => out.write_all(b"false"),
            PdfObject::Integer(value) => write!(out, "{}", value),
            PdfObject::Real(value) => {
                if value.fract() == 0.0 && value.abs() < 1e15 {
                    write!(out, "{:.1}", value)
                } else {
                    write!(out, "{}", value)
                }
            }
            PdfObject::String(string) => write_literal_string(out, &string.0),
            PdfObject::Name(name) => write_name(out, name.as_str()),
            PdfObject::Array(array) => {
                out.write_all(b"[")?;
                for (i, element) in array.0.iter().enumerate() {
                    if i > 0 {
                        out.write_all(b" ")?;
                    }
                    element.write_to(out)?;
                }
                out.write_all(b"]")
            }
            PdfObject::Dictionary(dict) => write_dictionary(out, dict),
            PdfObject::Stream(stream) => {
                write_dictionary(out, &stream.dict)?;
                out.write_all(b"\nstream\n")?;
                out.write_all(&stream.data)?;
                out.write_all(b"\nendstream")
            }
            PdfObject::Reference => out.write_all(b"R"),
        }
    }
}

fn write_dictionary<W: Write>(out: &mut W, dict: &PdfDictionary) -> io::Result<()> {
    out.write_all(b"<<")?;
    for (key, value) in &dict.0 {
        out.write_all(b" ")?;
        write_name(out, key.as_str())?;
        out.write_all(b" ")?;
        value.write_to(out)?;
    }
    out.write_all(b" >>")
}

fn write_name<W: Write>(out: &mut W, name: &str) -> io::Result<()> {
    out.write_all(b"/")?;
    for &byte in name.as_bytes() {
        if byte == b'#' || byte <= b' ' || byte > b'~' || lexer::is_end_of_name(byte) {
            write!(out, "#{:02x}", byte)?;
        } else {
            out.write_all(&[byte])?;
        }
    }
    Ok(())
}

fn write_literal_string<W: Write>(out: &mut W, bytes: &[u8]) -> io::Result<()> {
    out.write_all(b"(")?;
    for &byte in bytes {
        match byte {
            b'(' | b')' | b'\\' => out.write_all(&[b'\\', byte])?,
            b'\r' => out.write_all(b"\\r")?,
            b'\n' => out.write_all(b"\\n")?,
            _ => out.write_all(&[byte])?,
        }
    }
    out.write_all(b")")
}

/// Parse one direct object, or `None` at end of input.
///
/// Unknown barewords and stray delimiters are substituted with null so that
/// enclosing containers keep their remaining elements.
pub fn parse_object<R: Read>(r: &mut PushbackReader<R>) -> ParseResult<Option<PdfObject>> {
    lexer::skip_whitespace(r)?;

    let lead = match r.peek_byte()? {
        Some(byte) => byte,
        None => return Ok(None),
    };

    let object = match lead {
        b'<' => {
            r.read_byte()?;
            if r.peek_byte()? == Some(b'<') {
                r.read_byte()?;
                PdfObject::Dictionary(parse_dictionary_body(r)?)
            } else {
                r.unread(b'<')?;
                PdfObject::String(lexer::read_hex_string(r)?)
            }
        }
        b'[' => PdfObject::Array(parse_array(r)?),
        b'(' => PdfObject::String(lexer::read_literal_string(r)?),
        b'/' => PdfObject::Name(lexer::read_name(r)?),
        b'0'..=b'9' | b'-' | b'+' | b'.' => lexer::read_number(r)?,
        b't' | b'f' | b'n' | b'R' => match lexer::read_bareword(r)?.as_str() {
            "true" => PdfObject::Boolean(true),
            "false" => PdfObject::Boolean(false),
            "null" => PdfObject::Null,
            "R" => PdfObject::Reference,
            other => {
                warn!("unexpected keyword {:?} replaced with null", other);
                PdfObject::Null
            }
        },
        _ => {
            let word = lexer::read_bareword(r)?;
            if word.is_empty() {
                // a stray delimiter; consume it so parsing can progress
                r.read_byte()?;
                warn!("stray delimiter 0x{:02x} replaced with null", lead);
            } else {
                warn!("unexpected bareword {:?} replaced with null", word);
            }
            PdfObject::Null
        }
    };

    Ok(Some(object))
}

/// Parse an array; expects the cursor to sit on the opening `[`.
pub fn parse_array<R: Read>(r: &mut PushbackReader<R>) -> ParseResult<PdfArray> {
    r.read_byte()?; // opening '['
    let mut elements = Vec::new();

    loop {
        lexer::skip_whitespace(r)?;
        match r.peek_byte()? {
            Some(b']') => {
                r.read_byte()?;
                break;
            }
            Some(_) => match parse_object(r)? {
                Some(object) => elements.push(object),
                None => break,
            },
            None => {
                warn!("unterminated array");
                break;
            }
        }
    }

    Ok(PdfArray(elements))
}

/// Parse dictionary entries after the opening `<<` has been consumed.
pub fn parse_dictionary_body<R: Read>(r: &mut PushbackReader<R>) -> ParseResult<PdfDictionary> {
    let mut dict = PdfDictionary::new();

    loop {
        lexer::skip_whitespace(r)?;
        match r.peek_byte()? {
            Some(b'>') => {
                r.read_byte()?;
                if r.peek_byte()? == Some(b'>') {
                    r.read_byte()?;
                } else {
                    warn!("dictionary closed by a single '>'");
                }
                break;
            }
            Some(b'/') => {
                let key = lexer::read_name(r)?;
                match parse_object(r)? {
                    Some(value) => dict.insert(key, value),
                    None => {
                        warn!("missing value for dictionary key /{}", key.as_str());
                        break;
                    }
                }
            }
            Some(_) => {
                // non-name key; swallow one object to keep making progress
                warn!("skipped non-name dictionary key");
                if parse_object(r)?.is_none() {
                    break;
                }
            }
            None => {
                warn!("unterminated dictionary");
                break;
            }
        }
    }

    Ok(dict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn cursor(data: &[u8]) -> PushbackReader<Cursor<Vec<u8>>> {
        PushbackReader::new(Cursor::new(data.to_vec()))
    }

    fn parse(data: &[u8]) -> PdfObject {
        parse_object(&mut cursor(data)).unwrap().unwrap()
    }

    #[test]
    fn test_parse_scalars() {
        assert_eq!(parse(b"null"), PdfObject::Null);
        assert_eq!(parse(b"true"), PdfObject::Boolean(true));
        assert_eq!(parse(b"false"), PdfObject::Boolean(false));
        assert_eq!(parse(b"42"), PdfObject::Integer(42));
        assert_eq!(parse(b"-1.5"), PdfObject::Real(-1.5));
        assert_eq!(parse(b"R"), PdfObject::Reference);
    }

    #[test]
    fn test_parse_array() {
        let object = parse(b"[1 2.5 /Name (str) [true]]");
        let array = object.as_array().unwrap();
        assert_eq!(array.0.len(), 5);
        assert_eq!(array.0[0], PdfObject::Integer(1));
        assert_eq!(array.0[1], PdfObject::Real(2.5));
        assert_eq!(array.0[2].as_name(), Some("Name"));
        assert_eq!(array.0[3].as_string(), Some(&b"str"[..]));
        assert_eq!(
            array.0[4].as_array().unwrap().0,
            vec![PdfObject::Boolean(true)]
        );
    }

    #[test]
    fn test_parse_dictionary() {
        let object = parse(b"<< /W 2 /Decode [0 1] /Nested << /A true >> >>");
        let dict = object.as_dict().unwrap();
        assert_eq!(dict.get("W"), Some(&PdfObject::Integer(2)));
        assert_eq!(
            dict.get("Decode").unwrap().as_array().unwrap().0,
            vec![PdfObject::Integer(0), PdfObject::Integer(1)]
        );
        assert!(dict.get("Nested").unwrap().as_dict().is_some());
    }

    #[test]
    fn test_unterminated_containers_salvage() {
        let object = parse(b"[1 2");
        assert_eq!(object.as_array().unwrap().0.len(), 2);

        let object = parse(b"<< /A 1");
        assert_eq!(
            object.as_dict().unwrap().get("A"),
            Some(&PdfObject::Integer(1))
        );
    }

    #[test]
    fn test_float_array_conversion() {
        let object = parse(b"[0 1 0.5 255]");
        assert_eq!(
            object.as_array().unwrap().to_float_vec(),
            Some(vec![0.0, 1.0, 0.5, 255.0])
        );

        let object = parse(b"[0 /NotANumber]");
        assert_eq!(object.as_array().unwrap().to_float_vec(), None);
    }

    #[test]
    fn test_serialization_round_trip() {
        let original = parse(b"[1 2.5 /Name#20x (a(b)\\\\c) <<\n/K null >> true]");
        let mut bytes = Vec::new();
        original.write_to(&mut bytes).unwrap();
        let reparsed = parse(&bytes);
        assert_eq!(original, reparsed);
    }
}
