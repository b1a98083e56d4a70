//! SHA256 content verification

use crate::error::{Error, Result};
use sha2::{Digest, Sha256};
use tracing::debug;

/// Lowercase hex SHA256 digest of `data`
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Verify that `data` hashes to `expected`.
///
/// The comparison is case-sensitive against the lowercase hex digest.
/// `source` names the data in the diagnostic on mismatch.
pub fn validate_sha256(source: &str, data: &[u8], expected: &str) -> Result<()> {
    let actual = sha256_hex(data);
    if actual != expected {
        return Err(Error::checksum_mismatch(source, expected, actual));
    }

    debug!("sha256 checksum verified for {}", source);
    Ok(())
}
