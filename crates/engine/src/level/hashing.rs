use sha2::{Digest, Sha256};

use super::types::LevelDesc;

pub fn level_fingerprint(level: &LevelDesc) -> Result<String, serde_json::Error> {
    let canonical = serde_json::to_vec(level)?;
    let mut hasher = Sha256::new();
    hasher.update(&canonical);
    Ok(to_hex_lower(&hasher.finalize()))
}

pub(crate) fn to_hex_lower(bytes: &[u8]) -> String {
    let mut output = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        use std::fmt::Write as _;
        let _ = write!(&mut output, "{byte:02x}");
    }
    output
}
