//! Content Stream Tokenizer
//!
//! Produces the ordered token sequence of a PDF content stream: operands,
//! operators, and inline-image payloads. Dispatch is keyed on the first
//! non-whitespace byte of each token, mirroring the delimiter rules of
//! ISO 32000-1 Section 7.8.2.
//!
//! The embedded payload of an inline image is textually indistinguishable
//! from operator data, so the `ID`…`EI` scan uses a bounded lookahead
//! heuristic to decide whether an `EI` byte pair ends the image or belongs
//! to the pixel data. The heuristic's exact thresholds are load-bearing:
//! real-world documents depend on them and they must not be "improved".

use super::cursor::PushbackReader;
use super::objects::{self, PdfName, PdfObject, PdfStream};
use super::{lexer, ParseError, ParseResult};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::io::{Cursor, Read};
use tracing::warn;

/// The inline-image-begin operator.
const BEGIN_IMAGE: &str = "BI";
/// The inline-image-data operator.
const IMAGE_DATA: &str = "ID";

/// Bytes inspected past a candidate `EI` terminator.
const BINARY_LOOKAHEAD: usize = 5;

lazy_static! {
    /// Abbreviated inline-image dictionary keys (ISO 32000-1 Table 93),
    /// long form to short form.
    static ref ABBREVIATED_KEYS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("BitsPerComponent", "BPC");
        m.insert("ColorSpace", "CS");
        m.insert("Decode", "D");
        m.insert("DecodeParms", "DP");
        m.insert("Filter", "F");
        m.insert("Height", "H");
        m.insert("ImageMask", "IM");
        m.insert("Interpolate", "I");
        m.insert("Width", "W");
        m
    };
}

/// One token of a content stream, in source order.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// An operand value.
    Object(PdfObject),
    /// An operator, possibly carrying inline-image attributes.
    Operator(Operator),
}

impl Token {
    pub fn as_object(&self) -> Option<&PdfObject> {
        match self {
            Token::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_operator(&self) -> Option<&Operator> {
        match self {
            Token::Operator(operator) => Some(operator),
            _ => None,
        }
    }

    /// The operator name, if this token is an operator.
    pub fn operator_name(&self) -> Option<&str> {
        self.as_operator().map(|op| op.name())
    }
}

/// A content-stream operator.
///
/// Only the inline-image-begin operator ever carries parameters and a raw
/// payload; every other operator is just its name.
#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    name: String,
    image_parameters: Option<ImageParameters>,
    image_data: Option<Vec<u8>>,
}

impl Operator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image_parameters: None,
            image_data: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image_parameters(&self) -> Option<&ImageParameters> {
        self.image_parameters.as_ref()
    }

    pub fn image_data(&self) -> Option<&[u8]> {
        self.image_data.as_deref()
    }
}

/// Inline-image parameters in insertion order.
///
/// Keys are unique (re-inserting replaces the value in place); order is
/// preserved for inspection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageParameters {
    entries: Vec<(PdfName, PdfObject)>,
}

impl ImageParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: PdfName, value: PdfObject) {
        match self.entries.iter_mut().find(|(name, _)| *name == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Exact-key lookup.
    pub fn get(&self, key: &str) -> Option<&PdfObject> {
        self.entries
            .iter()
            .find(|(name, _)| name.0 == key)
            .map(|(_, value)| value)
    }

    /// Lookup by the long key name, falling back to its inline-image
    /// abbreviation (`Width` also matches `W`, and so on).
    pub fn get_resolved(&self, key: &str) -> Option<&PdfObject> {
        self.get(key)
            .or_else(|| ABBREVIATED_KEYS.get(key).and_then(|short| self.get(short)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&PdfName, &PdfObject)> {
        self.entries.iter().map(|(name, value)| (name, value))
    }
}

/// The content-stream tokenizer.
///
/// Two consumption modes are available: [`parse_all`](Self::parse_all)
/// drains the source into an ordered token vector, and
/// [`next_token`](Self::next_token) pulls one token at a time (single pass,
/// forward only, not restartable). The underlying source is released when
/// the parser is dropped, on every exit path.
pub struct ContentStreamParser<R> {
    cursor: PushbackReader<R>,
    pending: Option<Token>,
}

impl ContentStreamParser<Cursor<Vec<u8>>> {
    /// Parse from an in-memory byte buffer.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self::new(Cursor::new(data.to_vec()))
    }
}

impl<R: Read> ContentStreamParser<R> {
    /// Create a parser over an already filter-decoded source.
    pub fn new(reader: R) -> Self {
        Self {
            cursor: PushbackReader::new(reader),
            pending: None,
        }
    }

    /// Drain the whole stream into its ordered token sequence.
    ///
    /// The source is consumed and released whether parsing succeeds or
    /// fails.
    pub fn parse_all(mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Turn the parser into an iterator over tokens.
    pub fn tokens(self) -> Tokens<R> {
        Tokens { parser: self }
    }

    /// Pull the next token, or `Ok(None)` once the stream is exhausted.
    /// A partial token is never returned.
    pub fn next_token(&mut self) -> ParseResult<Option<Token>> {
        if let Some(token) = self.pending.take() {
            return Ok(Some(token));
        }
        self.parse_next()
    }

    fn parse_next(&mut self) -> ParseResult<Option<Token>> {
        lexer::skip_whitespace(&mut self.cursor)?;

        let lead = match self.cursor.peek_byte()? {
            Some(byte) => byte,
            None => return Ok(None),
        };

        let token = match lead {
            b'<' => self.read_dictionary_or_hex_string()?,
            b'[' => Token::Object(PdfObject::Array(objects::parse_array(&mut self.cursor)?)),
            b'(' => Token::Object(PdfObject::String(lexer::read_literal_string(
                &mut self.cursor,
            )?)),
            b'/' => Token::Object(PdfObject::Name(lexer::read_name(&mut self.cursor)?)),
            b'0'..=b'9' | b'-' | b'+' | b'.' => {
                Token::Object(lexer::read_number(&mut self.cursor)?)
            }
            b'n' => match lexer::read_bareword(&mut self.cursor)?.as_str() {
                "null" => Token::Object(PdfObject::Null),
                word => Token::Operator(Operator::new(word)),
            },
            b't' | b'f' => match lexer::read_bareword(&mut self.cursor)?.as_str() {
                "true" => Token::Object(PdfObject::Boolean(true)),
                "false" => Token::Object(PdfObject::Boolean(false)),
                word => Token::Operator(Operator::new(word)),
            },
            b'R' => match lexer::read_bareword(&mut self.cursor)?.as_str() {
                // a lone R is all that remains of a reference in streams
                // that were stitched together without renumbering
                "R" => Token::Object(PdfObject::Reference),
                word => Token::Operator(Operator::new(word)),
            },
            b'B' => {
                let word = lexer::read_bareword(&mut self.cursor)?;
                if word == BEGIN_IMAGE {
                    self.read_inline_image()?
                } else {
                    Token::Operator(Operator::new(word))
                }
            }
            b'I' => self.read_image_data_operator()?,
            b']' => {
                // unmatched closing bracket; the stream is corrupt but the
                // rest of it is usually fine
                self.cursor.read_byte()?;
                warn!("stray ']' in content stream replaced with null");
                Token::Object(PdfObject::Null)
            }
            _ => {
                let name = self.read_operator_name()?;
                if name.is_empty() {
                    warn!("corrupted content stream tail, ending parse");
                    return Ok(None);
                }
                Token::Operator(Operator::new(name))
            }
        };

        Ok(Some(token))
    }

    // '<' is ambiguous: '<<' opens a dictionary, anything else is a hex
    // string. A dictionary followed by the `stream` keyword is merged with
    // its payload into a single stream token.
    fn read_dictionary_or_hex_string(&mut self) -> ParseResult<Token> {
        self.cursor.read_byte()?; // first '<'

        if self.cursor.peek_byte()? != Some(b'<') {
            self.cursor.unread(b'<')?;
            return Ok(Token::Object(PdfObject::String(lexer::read_hex_string(
                &mut self.cursor,
            )?)));
        }

        self.cursor.read_byte()?; // second '<'
        let dict = objects::parse_dictionary_body(&mut self.cursor)?;
        lexer::skip_whitespace(&mut self.cursor)?;

        if self.cursor.peek_byte()? == Some(b's') {
            let keyword = lexer::read_bareword(&mut self.cursor)?;
            if keyword == "stream" {
                let data = self.read_stream_payload()?;
                return Ok(Token::Object(PdfObject::Stream(PdfStream { dict, data })));
            }
            // not a stream after all; hold the keyword as the next token
            self.pending = Some(Token::Operator(Operator::new(keyword)));
        }

        Ok(Token::Object(PdfObject::Dictionary(dict)))
    }

    // Raw bytes between the `stream` keyword and `endstream`. Content
    // streams carry no trustworthy /Length for embedded streams, so the
    // payload is delimited by scanning.
    fn read_stream_payload(&mut self) -> ParseResult<Vec<u8>> {
        if self.cursor.peek_byte()? == Some(b'\r') {
            self.cursor.read_byte()?;
        }
        if self.cursor.peek_byte()? == Some(b'\n') {
            self.cursor.read_byte()?;
        }

        let mut data = Vec::new();
        loop {
            match self.cursor.read_byte()? {
                Some(byte) => {
                    data.push(byte);
                    if data.ends_with(b"endstream") {
                        data.truncate(data.len() - b"endstream".len());
                        trim_one_eol(&mut data);
                        break;
                    }
                }
                None => {
                    warn!("missing endstream keyword, keeping remaining bytes");
                    break;
                }
            }
        }

        Ok(data)
    }

    // After `BI`, names and values alternate until a non-name token shows
    // up; that terminal token is the `ID` operator already carrying the raw
    // payload, which is transferred onto the begin operator.
    fn read_inline_image(&mut self) -> ParseResult<Token> {
        let mut parameters = ImageParameters::new();
        let mut image_data = None;

        loop {
            match self.next_token()? {
                Some(Token::Object(PdfObject::Name(key))) => match self.next_token()? {
                    Some(Token::Object(value)) => parameters.insert(key, value),
                    Some(Token::Operator(op)) => {
                        warn!(
                            "operator {:?} in place of a value for inline image key /{}",
                            op.name(),
                            key.as_str()
                        );
                        image_data = op.image_data;
                        break;
                    }
                    None => {
                        warn!("content stream ended inside inline image parameters");
                        break;
                    }
                },
                Some(Token::Operator(op)) => {
                    image_data = op.image_data;
                    break;
                }
                Some(token) => {
                    // not a name, not the data operator; put it back so it
                    // is not lost
                    warn!("unexpected operand after inline image parameters");
                    if self.pending.is_none() {
                        self.pending = Some(token);
                    }
                    break;
                }
                None => {
                    warn!("content stream ended before inline image data");
                    break;
                }
            }
        }

        let mut operator = Operator::new(BEGIN_IMAGE);
        operator.image_parameters = Some(parameters);
        operator.image_data = image_data;
        Ok(Token::Operator(operator))
    }

    // The `ID` operator: anything other than the exact two bytes is a hard
    // failure, then the raw payload runs to the `EI` terminator.
    fn read_image_data_operator(&mut self) -> ParseResult<Token> {
        let position = self.cursor.position();
        let first = self.cursor.read_byte()?;
        let second = self.cursor.read_byte()?;

        if first != Some(b'I') || second != Some(b'D') {
            let actual: String = [first, second]
                .iter()
                .flatten()
                .map(|&byte| byte as char)
                .collect();
            return Err(ParseError::SyntaxError {
                position,
                message: format!("expected operator 'ID' actual='{}'", actual),
            });
        }

        if let Some(byte) = self.cursor.peek_byte()? {
            if lexer::is_whitespace(byte) {
                self.cursor.read_byte()?;
            }
        }

        let mut data = Vec::new();
        let mut last = self.cursor.read_byte()?;
        let mut current = self.cursor.read_byte()?;

        // The payload may itself contain the bytes "EI ", so a candidate
        // terminator only counts when the following bytes do not look like
        // binary data.
        loop {
            if last == Some(b'E')
                && current == Some(b'I')
                && self.peek_is_space_or_return()?
                && self.following_bytes_look_textual()?
            {
                // the byte separating payload and EI is a delimiter, not data
                if matches!(data.last(), Some(&(b' ' | b'\r' | b'\n'))) {
                    data.pop();
                }
                break;
            }
            if self.cursor.peek_byte()?.is_none() {
                break;
            }
            if let Some(byte) = last {
                data.push(byte);
            }
            last = current;
            current = self.cursor.read_byte()?;
        }

        let mut operator = Operator::new(IMAGE_DATA);
        operator.image_data = Some(data);
        Ok(Token::Operator(operator))
    }

    fn peek_is_space_or_return(&mut self) -> ParseResult<bool> {
        Ok(matches!(
            self.cursor.peek_byte()?,
            Some(b' ' | b'\r' | b'\n')
        ))
    }

    // Inspect up to five bytes past the candidate terminator. Tab, LF, CR
    // and printable ASCII count as text; control bytes and everything above
    // 0x7F count as binary. The inspected bytes are always pushed back.
    fn following_bytes_look_textual(&mut self) -> ParseResult<bool> {
        let mut buffer = [0u8; BINARY_LOOKAHEAD];
        let mut filled = 0;
        while filled < BINARY_LOOKAHEAD {
            match self.cursor.read_byte()? {
                Some(byte) => {
                    buffer[filled] = byte;
                    filled += 1;
                }
                None => break,
            }
        }

        let textual = buffer[..filled].iter().all(|&byte| {
            byte == 0x09 || byte == 0x0A || byte == 0x0D || (0x20..=0x7F).contains(&byte)
        });

        self.cursor.unread_all(&buffer[..filled])?;
        Ok(textual)
    }

    // Operator barewords exclude digits so that operands and operators
    // stay separable; the Type3 glyph metrics operators d0 and d1 are the
    // one exception and absorb their digit.
    fn read_operator_name(&mut self) -> ParseResult<String> {
        lexer::skip_whitespace(&mut self.cursor)?;
        let mut buffer = Vec::new();

        while let Some(next) = self.cursor.peek_byte()? {
            if lexer::is_whitespace(next)
                || lexer::is_closing(next)
                || matches!(next, b'[' | b'<' | b'(' | b'/')
                || next.is_ascii_digit()
            {
                break;
            }
            let current = match self.cursor.read_byte()? {
                Some(byte) => byte,
                None => break,
            };
            buffer.push(current);

            if current == b'd' {
                if let Some(digit @ (b'0' | b'1')) = self.cursor.peek_byte()? {
                    self.cursor.read_byte()?;
                    buffer.push(digit);
                }
            }
        }

        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

fn trim_one_eol(data: &mut Vec<u8>) {
    if data.ends_with(b"\r\n") {
        data.truncate(data.len() - 2);
    } else if matches!(data.last(), Some(&(b'\n' | b'\r'))) {
        data.pop();
    }
}

/// Iterator over the tokens of a content stream.
pub struct Tokens<R> {
    parser: ContentStreamParser<R>,
}

impl<R: Read> Iterator for Tokens<R> {
    type Item = ParseResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.parser.next_token().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(data: &[u8]) -> Vec<Token> {
        ContentStreamParser::from_bytes(data).parse_all().unwrap()
    }

    fn integer(value: i64) -> Token {
        Token::Object(PdfObject::Integer(value))
    }

    fn real(value: f64) -> Token {
        Token::Object(PdfObject::Real(value))
    }

    fn operator(name: &str) -> Token {
        Token::Operator(Operator::new(name))
    }

    #[test]
    fn test_numbers_and_operators() {
        let tokens = parse(b"1 0 0 1 50 50 cm 2 w");
        assert_eq!(
            tokens,
            vec![
                integer(1),
                integer(0),
                integer(0),
                integer(1),
                integer(50),
                integer(50),
                operator("cm"),
                integer(2),
                operator("w"),
            ]
        );
    }

    #[test]
    fn test_real_lexing() {
        let tokens = parse(b"12.5 Tc");
        assert_eq!(tokens, vec![real(12.5), operator("Tc")]);
    }

    #[test]
    fn test_two_dots_make_two_tokens() {
        let tokens = parse(b"1.2.3");
        assert_eq!(tokens, vec![real(1.2), real(0.3)]);
    }

    #[test]
    fn test_keywords() {
        let tokens = parse(b"true false null");
        assert_eq!(
            tokens,
            vec![
                Token::Object(PdfObject::Boolean(true)),
                Token::Object(PdfObject::Boolean(false)),
                Token::Object(PdfObject::Null),
            ]
        );
    }

    #[test]
    fn test_keyword_lookalikes_become_operators() {
        let tokens = parse(b"truex nul fx");
        assert_eq!(
            tokens,
            vec![operator("truex"), operator("nul"), operator("fx")]
        );
    }

    #[test]
    fn test_lone_r_is_a_reference_placeholder() {
        let tokens = parse(b"R RG");
        assert_eq!(
            tokens,
            vec![Token::Object(PdfObject::Reference), operator("RG")]
        );
    }

    #[test]
    fn test_text_block() {
        let tokens = parse(b"BT /F1 12 Tf (Hello World) Tj ET");
        assert_eq!(tokens.len(), 7);
        assert_eq!(tokens[0], operator("BT"));
        assert_eq!(tokens[1].as_object().unwrap().as_name(), Some("F1"));
        assert_eq!(tokens[2], integer(12));
        assert_eq!(tokens[3], operator("Tf"));
        assert_eq!(
            tokens[4].as_object().unwrap().as_string(),
            Some(&b"Hello World"[..])
        );
        assert_eq!(tokens[5], operator("Tj"));
        assert_eq!(tokens[6], operator("ET"));
    }

    #[test]
    fn test_array_operand() {
        let tokens = parse(b"[(A) -120 (B)] TJ");
        let array = tokens[0].as_object().unwrap().as_array().unwrap();
        assert_eq!(array.0.len(), 3);
        assert_eq!(tokens[1], operator("TJ"));
    }

    #[test]
    fn test_dictionary_operand() {
        let tokens = parse(b"/MC0 << /MCID 0 >> BDC");
        assert_eq!(tokens[0].as_object().unwrap().as_name(), Some("MC0"));
        let dict = tokens[1].as_object().unwrap().as_dict().unwrap();
        assert_eq!(dict.get("MCID"), Some(&PdfObject::Integer(0)));
        assert_eq!(tokens[2], operator("BDC"));
    }

    #[test]
    fn test_hex_string_operand() {
        let tokens = parse(b"<48656C6C6F> Tj");
        assert_eq!(
            tokens[0].as_object().unwrap().as_string(),
            Some(&b"Hello"[..])
        );
    }

    #[test]
    fn test_dictionary_with_stream_merges() {
        let tokens = parse(b"<< /Length 5 >>\nstream\n01234\nendstream Q");
        match tokens[0].as_object().unwrap() {
            PdfObject::Stream(stream) => {
                assert_eq!(stream.dict.get("Length"), Some(&PdfObject::Integer(5)));
                assert_eq!(stream.data, b"01234");
            }
            other => panic!("expected stream, got {:?}", other),
        }
        assert_eq!(tokens[1], operator("Q"));
    }

    #[test]
    fn test_dictionary_before_s_operator_stays_a_dictionary() {
        let tokens = parse(b"<< /A 1 >> sh");
        assert!(tokens[0].as_object().unwrap().as_dict().is_some());
        assert_eq!(tokens[1], operator("sh"));
    }

    #[test]
    fn test_inline_image() {
        let tokens = parse(b"BI /W 2 /H 1 ID \xAA\xBB EI Q");
        let op = tokens[0].as_operator().unwrap();
        assert_eq!(op.name(), "BI");

        let params = op.image_parameters().unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("W"), Some(&PdfObject::Integer(2)));
        assert_eq!(params.get("H"), Some(&PdfObject::Integer(1)));

        assert_eq!(op.image_data(), Some(&[0xAA, 0xBB][..]));
        assert_eq!(tokens[1], operator("Q"));
    }

    #[test]
    fn test_inline_image_parameter_order_is_preserved() {
        let tokens = parse(b"BI /H 1 /W 2 /BPC 8 ID x EI");
        let params = tokens[0].as_operator().unwrap().image_parameters().unwrap();
        let keys: Vec<&str> = params.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(keys, vec!["H", "W", "BPC"]);
    }

    #[test]
    fn test_abbreviated_key_resolution() {
        let tokens = parse(b"BI /W 2 /Height 1 ID x EI");
        let params = tokens[0].as_operator().unwrap().image_parameters().unwrap();
        assert_eq!(params.get_resolved("Width"), Some(&PdfObject::Integer(2)));
        assert_eq!(params.get_resolved("Height"), Some(&PdfObject::Integer(1)));
        assert_eq!(params.get_resolved("BitsPerComponent"), None);
    }

    #[test]
    fn test_inline_image_payload_containing_ei_bytes() {
        // "EI " inside the payload is followed by binary bytes, so the scan
        // must continue to the real terminator
        let mut stream = b"BI /W 2 /H 1 ID ".to_vec();
        stream.extend_from_slice(b"EI \x01\x02\x03\x04\x05\xAA");
        stream.extend_from_slice(b" EI Q");
        let tokens = parse(&stream);

        let op = tokens[0].as_operator().unwrap();
        assert_eq!(op.image_data(), Some(&b"EI \x01\x02\x03\x04\x05\xAA"[..]));
        assert_eq!(tokens[1], operator("Q"));
    }

    #[test]
    fn test_inline_image_payload_at_eof() {
        let tokens = parse(b"BI /W 1 /H 1 ID \xAA\xBB\xCC\xDD");
        let op = tokens[0].as_operator().unwrap();
        // the trailing two-byte scan window is dropped when the stream ends
        assert_eq!(op.image_data(), Some(&[0xAA, 0xBB][..]));
    }

    #[test]
    fn test_id_keyword_mismatch_is_fatal() {
        let err = ContentStreamParser::from_bytes(b"BI /W 1 IX \x00\x01 EI")
            .parse_all()
            .unwrap_err();
        match err {
            ParseError::SyntaxError { message, .. } => {
                assert!(message.contains("'ID'"));
                assert!(message.contains("IX"));
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_stray_closing_bracket_recovers() {
        let tokens = parse(b"] 7 q");
        assert_eq!(
            tokens,
            vec![Token::Object(PdfObject::Null), integer(7), operator("q")]
        );
    }

    #[test]
    fn test_type3_metrics_operators_absorb_digit() {
        let tokens = parse(b"0 0 d0 1 2 3 4 5 6 d1");
        assert_eq!(tokens[2], operator("d0"));
        assert_eq!(tokens[9], operator("d1"));
    }

    #[test]
    fn test_empty_bareword_ends_parse() {
        // '>' cannot start a token; the corrupted tail is dropped while
        // everything before it survives
        let tokens = parse(b"q Q > W n");
        assert_eq!(tokens, vec![operator("q"), operator("Q")]);
    }

    #[test]
    fn test_comments_are_skipped() {
        let tokens = parse(b"q % save state\nQ");
        assert_eq!(tokens, vec![operator("q"), operator("Q")]);
    }

    #[test]
    fn test_pull_iterator() {
        let mut iter = ContentStreamParser::from_bytes(b"1 2 add").tokens();
        assert_eq!(iter.next().unwrap().unwrap(), integer(1));
        assert_eq!(iter.next().unwrap().unwrap(), integer(2));
        assert_eq!(iter.next().unwrap().unwrap(), operator("add"));
        assert!(iter.next().is_none());
    }
}
