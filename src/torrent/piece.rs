use crate::error::MetainfoError;

/// Size of a SHA1 piece hash in bytes
pub const PIECE_HASH_LEN: usize = 20;

/// A 20-byte SHA1 hash representing a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceHash([u8; PIECE_HASH_LEN]);

impl PieceHash {
    pub fn new(hash: [u8; PIECE_HASH_LEN]) -> Self {
        Self(hash)
    }

    pub fn as_bytes(&self) -> &[u8; PIECE_HASH_LEN] {
        &self.0
    }

    /// Lowercase 40-character hex rendering
    pub fn hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl AsRef<[u8]> for PieceHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Collection of piece hashes, in the order they appear in `pieces`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pieces {
    hashes: Vec<PieceHash>,
}

impl Pieces {
    /// Split concatenated SHA1 hashes into consecutive 20-byte chunks
    pub fn from_bytes(data: &[u8]) -> Result<Self, MetainfoError> {
        if data.len() % PIECE_HASH_LEN != 0 {
            return Err(MetainfoError::InvalidPieceLength(data.len()));
        }

        let hashes = data
            .chunks_exact(PIECE_HASH_LEN)
            .map(|chunk| {
                let mut hash = [0u8; PIECE_HASH_LEN];
                hash.copy_from_slice(chunk);
                PieceHash(hash)
            })
            .collect();

        Ok(Self { hashes })
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PieceHash> {
        self.hashes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PieceHash> {
        self.hashes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_preserves_order() {
        let mut data = vec![0xabu8; 20];
        data.extend(0u8..20);

        let pieces = Pieces::from_bytes(&data).unwrap();
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces.get(0).unwrap().hex(), "ab".repeat(20));
        assert_eq!(
            pieces.get(1).unwrap().hex(),
            "000102030405060708090a0b0c0d0e0f10111213"
        );
        assert!(pieces.iter().all(|p| p.hex().len() == 40));
    }

    #[test]
    fn test_rejects_partial_hash() {
        assert_eq!(
            Pieces::from_bytes(&[0u8; 41]),
            Err(MetainfoError::InvalidPieceLength(41))
        );
    }

    #[test]
    fn test_empty_pieces() {
        let pieces = Pieces::from_bytes(&[]).unwrap();
        assert!(pieces.is_empty());
    }
}
