//! Bencode decoding and canonical encoding.
//!
//! Byte strings stay raw bytes end to end; nothing here assumes a text
//! encoding. Decoding is lenient about dictionary key order, encoding always
//! writes keys sorted by raw byte value.

mod decoder;
mod encoder;
mod value;

pub use decoder::{decode, Decoder, DecoderConfig, DEFAULT_MAX_DEPTH};
pub use encoder::encode;
pub use value::{Dictionary, Value};

pub type Result<T> = std::result::Result<T, crate::error::BencodeError>;
