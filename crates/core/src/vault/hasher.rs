//! Content hashing for asset store names.

use std::fs::File;
use std::io::{BufReader, Read, Result};
use std::path::Path;

use sha2::{Digest, Sha256};

/// Hex SHA-256 of a file, read in chunks.
///
/// Two assets with the same bytes get the same store name, so filing a
/// copy of an asset that is already in the store is detected.
pub fn content_hash(path: &Path) -> Result<String> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Hex SHA-256 of in-memory bytes.
///
/// ```
/// use notestore_core::vault::hasher::content_hash_bytes;
///
/// assert_eq!(
///     content_hash_bytes(b"test"),
///     "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
/// );
/// ```
pub fn content_hash_bytes(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
