//! Input identity of an execution definition.

use sha2::{Digest, Sha256};

use super::ExecutionDefinition;

/// Hex sha256 over the definition's JSON form.
///
/// Every field that reaches the backend takes part; the stored fingerprint
/// itself is skipped during serialization, so recomputing over a built
/// definition gives back the same value.
pub fn compute_fingerprint(definition: &ExecutionDefinition) -> Result<String, serde_json::Error> {
    let bytes = serde_json::to_vec(definition)?;
    Ok(Sha256::digest(&bytes)
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect())
}
