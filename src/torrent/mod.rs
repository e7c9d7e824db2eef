mod metainfo;
mod piece;

pub use metainfo::{extract, info_hash, TorrentInfo};
pub use piece::{PieceHash, Pieces, PIECE_HASH_LEN};

use crate::bencode::Decoder;
use crate::error::Result;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Load and parse a .torrent file
pub async fn load_torrent_file<P: AsRef<Path>>(path: P, decoder: &Decoder) -> Result<TorrentInfo> {
    let path = path.as_ref();
    let data = fs::read(path).await?;
    debug!(path = %path.display(), bytes = data.len(), "read torrent file");
    parse_torrent(&data, decoder)
}

/// Parse torrent data from bytes
pub fn parse_torrent(data: &[u8], decoder: &Decoder) -> Result<TorrentInfo> {
    let value = decoder.decode(data)?;
    Ok(extract(&value)?)
}
