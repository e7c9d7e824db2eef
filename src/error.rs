use thiserror::Error;

/// Errors raised while decoding bencode or constructing a `Value`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BencodeError {
    #[error("Malformed byte string length at offset {0}")]
    MalformedLength(usize),

    #[error("Unexpected end of input at offset {0}")]
    UnexpectedEof(usize),

    #[error("Invalid integer at offset {position}: {text:?}")]
    InvalidInteger { position: usize, text: String },

    #[error("Missing terminator for value starting at offset {0}")]
    MissingTerminator(usize),

    #[error("Invalid dictionary key at offset {0}")]
    InvalidDictionaryKey(usize),

    #[error("Duplicate dictionary key: {0:?}")]
    DuplicateKey(String),

    #[error("Unrecognized token {byte:#04x} at offset {position}")]
    UnrecognizedToken { position: usize, byte: u8 },

    #[error("Trailing data after value at offset {0}")]
    TrailingData(usize),

    #[error("Nesting deeper than {0} levels")]
    NestingTooDeep(usize),
}

/// Errors raised while extracting torrent metadata from a decoded value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetainfoError {
    #[error("Missing '{0}' field")]
    MissingField(String),

    #[error("Field '{key}' must be a {expected}")]
    TypeMismatch { key: String, expected: &'static str },

    #[error("Pieces length {0} is not a multiple of 20")]
    InvalidPieceLength(usize),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Bencode parsing error: {0}")]
    Bencode(#[from] BencodeError),

    #[error("Invalid torrent file: {0}")]
    Metainfo(#[from] MetainfoError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
