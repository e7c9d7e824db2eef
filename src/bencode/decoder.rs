use super::value::{Dictionary, Value};
use super::Result;
use crate::error::BencodeError;
use tracing::trace;

/// Default limit on nested lists and dictionaries
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Configuration for the bencode decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Deepest container nesting accepted before failing with `NestingTooDeep`
    pub max_depth: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Stateless bencode decoder; holds nothing but its configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

/// Decode bencoded data into a Value using the default configuration
pub fn decode(data: &[u8]) -> Result<Value> {
    Decoder::default().decode(data)
}

impl Decoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode exactly one value spanning the whole buffer
    pub fn decode(&self, data: &[u8]) -> Result<Value> {
        let (value, end) = self.decode_at(data, 0)?;

        if end != data.len() {
            return Err(BencodeError::TrailingData(end));
        }

        trace!(bytes = data.len(), kind = value.kind(), "decoded bencode value");
        Ok(value)
    }

    /// Decode one value starting at `pos`, returning it with the offset just past it
    pub fn decode_at(&self, data: &[u8], pos: usize) -> Result<(Value, usize)> {
        let mut pos = pos;
        let value = self.decode_value(data, &mut pos, 0)?;
        Ok((value, pos))
    }

    fn decode_value(&self, data: &[u8], pos: &mut usize, depth: usize) -> Result<Value> {
        match data.get(*pos) {
            None => Err(BencodeError::UnexpectedEof(*pos)),
            Some(b'i') => decode_integer(data, pos),
            Some(b'l') => self.decode_list(data, pos, depth + 1),
            Some(b'd') => self.decode_dict(data, pos, depth + 1),
            Some(b'0'..=b'9') => decode_bytes(data, pos).map(Value::Bytes),
            Some(&byte) => Err(BencodeError::UnrecognizedToken {
                position: *pos,
                byte,
            }),
        }
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.config.max_depth {
            return Err(BencodeError::NestingTooDeep(self.config.max_depth));
        }
        Ok(())
    }

    fn decode_list(&self, data: &[u8], pos: &mut usize, depth: usize) -> Result<Value> {
        self.check_depth(depth)?;

        let start = *pos;
        *pos += 1; // Skip 'l'

        let mut list = Vec::new();

        loop {
            match data.get(*pos) {
                None => return Err(BencodeError::MissingTerminator(start)),
                Some(b'e') => break,
                Some(_) => list.push(self.decode_value(data, pos, depth)?),
            }
        }

        *pos += 1; // Skip 'e'

        Ok(Value::List(list))
    }

    fn decode_dict(&self, data: &[u8], pos: &mut usize, depth: usize) -> Result<Value> {
        self.check_depth(depth)?;

        let start = *pos;
        *pos += 1; // Skip 'd'

        let mut dict = Dictionary::default();

        loop {
            let key_pos = *pos;
            match data.get(key_pos) {
                None => return Err(BencodeError::MissingTerminator(start)),
                Some(b'e') => break,
                // Keys must be byte strings
                Some(b'0'..=b'9') => {
                    let key = decode_bytes(data, pos)?;
                    let value = self.decode_value(data, pos, depth)?;
                    dict.insert(key, value)
                        .map_err(|_| BencodeError::InvalidDictionaryKey(key_pos))?;
                }
                Some(_) => return Err(BencodeError::InvalidDictionaryKey(key_pos)),
            }
        }

        *pos += 1; // Skip 'e'

        Ok(Value::Dict(dict))
    }
}

fn decode_integer(data: &[u8], pos: &mut usize) -> Result<Value> {
    let start = *pos;
    let body = start + 1; // Skip 'i'

    let end = data[body..]
        .iter()
        .position(|&b| b == b'e')
        .map(|offset| body + offset)
        .ok_or(BencodeError::MissingTerminator(start))?;

    let text = &data[body..end];
    let num = parse_integer(text).ok_or_else(|| BencodeError::InvalidInteger {
        position: start,
        text: String::from_utf8_lossy(text).into_owned(),
    })?;

    *pos = end + 1; // Skip 'e'

    Ok(Value::Integer(num))
}

/// Parse the text between `i` and `e`: optional '-', no leading zeros, no "-0"
fn parse_integer(text: &[u8]) -> Option<i64> {
    let digits = text.strip_prefix(b"-").unwrap_or(text);

    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }

    let negative = digits.len() != text.len();
    if digits[0] == b'0' && (digits.len() > 1 || negative) {
        return None;
    }

    std::str::from_utf8(text).ok()?.parse().ok()
}

fn decode_bytes(data: &[u8], pos: &mut usize) -> Result<Vec<u8>> {
    let start = *pos;
    let digits = data[start..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    let colon = start + digits;

    match data.get(colon) {
        None => return Err(BencodeError::UnexpectedEof(colon)),
        Some(b':') if digits > 0 => {}
        Some(_) => return Err(BencodeError::MalformedLength(start)),
    }

    let len = data[start..colon]
        .iter()
        .try_fold(0usize, |acc, &b| {
            acc.checked_mul(10)?.checked_add(usize::from(b - b'0'))
        })
        .ok_or(BencodeError::MalformedLength(start))?;

    let body = colon + 1; // Skip ':'
    let end = body
        .checked_add(len)
        .filter(|&end| end <= data.len())
        .ok_or(BencodeError::UnexpectedEof(data.len()))?;

    *pos = end;

    Ok(data[body..end].to_vec())
}
