use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tokio::io::AsyncReadExt;

use super::error::StorageError;
use super::traits::BoxReader;

/// Read buffer size used when hashing streams.
const HASH_BUF_SIZE: usize = 64 * 1024;

/// A validated SHA-256 content hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Compute the SHA-256 hash of the given data.
    pub fn compute(data: &[u8]) -> Self {
        let hash = Sha256::digest(data);
        Self(hash.into())
    }

    /// Hash an entire stream, failing with [`StorageError::Read`] if it cannot
    /// be consumed to the end.
    ///
    /// Returns the hash together with the number of bytes read. Streams longer
    /// than `max_size` are rejected with [`StorageError::SizeLimitExceeded`].
    pub async fn compute_stream(
        mut reader: BoxReader,
        max_size: u64,
    ) -> Result<(Self, u64), StorageError> {
        let mut hasher = Sha256::new();
        let mut total_bytes: u64 = 0;
        let mut buf = vec![0u8; HASH_BUF_SIZE];

        loop {
            let n = reader.read(&mut buf).await.map_err(StorageError::Read)?;
            if n == 0 {
                break;
            }

            total_bytes += n as u64;
            if total_bytes > max_size {
                return Err(StorageError::SizeLimitExceeded {
                    actual: total_bytes,
                    limit: max_size,
                });
            }

            hasher.update(&buf[..n]);
        }

        Ok((Self(hasher.finalize().into()), total_bytes))
    }

    /// Construct from raw SHA-256 bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse a hex-encoded content hash string.
    pub fn from_hex(s: &str) -> Result<Self, StorageError> {
        if s.len() != 64 {
            return Err(StorageError::InvalidHash(format!(
                "expected 64 hex characters, got {}",
                s.len()
            )));
        }

        let bytes =
            hex::decode(s).map_err(|e| StorageError::InvalidHash(format!("invalid hex: {e}")))?;

        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| StorageError::InvalidHash("decoded to wrong length".into()))?;

        Ok(Self(arr))
    }

    /// Return the hash as a 64-character lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({})", self.to_hex())
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for ContentHash {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}
