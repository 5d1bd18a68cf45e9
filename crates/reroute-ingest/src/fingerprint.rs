use sha2::{Digest, Sha256};

/// Deterministic fingerprint of a migration sheet's two URL columns.
///
/// Hex-encoded SHA-256 over both columns in their ingested order, each row
/// prefixed with its column so that moving a URL between columns changes
/// the fingerprint. Row order is part of the input (it drives tie-breaks),
/// so it is hashed as-is rather than sorted.
pub fn generate(old: &[String], new: &[String]) -> String {
    let mut combined = String::new();
    for value in old {
        combined.push_str("old:");
        combined.push_str(value);
        combined.push('\n');
    }
    for value in new {
        combined.push_str("new:");
        combined.push_str(value);
        combined.push('\n');
    }
    hex_encode(&sha256_bytes(combined.as_bytes()))
}

fn sha256_bytes(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
