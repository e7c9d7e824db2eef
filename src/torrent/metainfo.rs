use super::Pieces;
use crate::bencode::{encode, Dictionary, Value};
use crate::error::MetainfoError;
use sha1::{Digest, Sha1};
use std::borrow::Cow;
use tracing::debug;

/// Summary of a single-file torrent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentInfo {
    /// Raw `announce` bytes; decoded as text only for display
    pub announce: Vec<u8>,
    /// Content length in bytes
    pub length: i64,
    /// SHA1 of the canonically encoded info dictionary
    pub info_hash: [u8; 20],
    /// Number of bytes in each piece
    pub piece_length: i64,
    /// SHA1 hashes of all pieces
    pub pieces: Pieces,
}

/// Extract torrent metadata from a decoded top-level dictionary
pub fn extract(top_level: &Value) -> Result<TorrentInfo, MetainfoError> {
    TorrentInfo::extract(top_level)
}

impl TorrentInfo {
    pub fn extract(top_level: &Value) -> Result<Self, MetainfoError> {
        let dict = top_level.as_dict().ok_or_else(|| MetainfoError::TypeMismatch {
            key: "(root)".to_string(),
            expected: "dictionary",
        })?;

        let announce = require_bytes(dict, "announce")?.to_vec();

        let info_value = require(dict, "info")?;
        let info = info_value.as_dict().ok_or_else(|| type_mismatch("info", "dictionary"))?;

        // Multi-file `files` lists are not handled; only single-file fields are read.
        let piece_length = require_integer(info, "piece length")?;
        let pieces = Pieces::from_bytes(require_bytes(info, "pieces")?)?;
        let length = require_integer(info, "length")?;

        let info_hash = info_hash(info_value);

        debug!(
            length,
            piece_length,
            pieces = pieces.len(),
            info_hash = %hex::encode(info_hash),
            "extracted torrent metadata"
        );

        Ok(TorrentInfo {
            announce,
            length,
            info_hash,
            piece_length,
            pieces,
        })
    }

    /// Tracker URL as text, with invalid UTF-8 replaced
    pub fn tracker_url(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.announce)
    }

    /// Get the info hash as a hex string
    pub fn info_hash_hex(&self) -> String {
        hex::encode(self.info_hash)
    }

    pub fn piece_hashes_hex(&self) -> Vec<String> {
        self.pieces.iter().map(|p| p.hex()).collect()
    }

    pub fn num_pieces(&self) -> usize {
        self.pieces.len()
    }
}

/// SHA1 of the canonical encoding of `info`
pub fn info_hash(info: &Value) -> [u8; 20] {
    Sha1::digest(encode(info)).into()
}

fn type_mismatch(key: &str, expected: &'static str) -> MetainfoError {
    MetainfoError::TypeMismatch {
        key: key.to_string(),
        expected,
    }
}

fn require<'a>(dict: &'a Dictionary, key: &str) -> Result<&'a Value, MetainfoError> {
    dict.get(key.as_bytes())
        .ok_or_else(|| MetainfoError::MissingField(key.to_string()))
}

fn require_bytes<'a>(dict: &'a Dictionary, key: &str) -> Result<&'a [u8], MetainfoError> {
    require(dict, key)?
        .as_bytes()
        .ok_or_else(|| type_mismatch(key, "byte string"))
}

fn require_integer(dict: &Dictionary, key: &str) -> Result<i64, MetainfoError> {
    require(dict, key)?
        .as_integer()
        .ok_or_else(|| type_mismatch(key, "integer"))
}
