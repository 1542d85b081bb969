use serde::{Deserialize, Serialize};

use crate::algo::HashAlgo;

/// Signing-party identifier used when none is configured.
pub const DEFAULT_SELF_KEY: &str = "WePay";

/// Per-instance signing configuration.
///
/// Every [`Signer`](crate::Signer) owns its configuration outright; nothing
/// is shared between instances and nothing can change after construction, so
/// two signers built from the same value can never observe each other.
///
/// Deserializes with per-field defaults, so a partial document like
/// `{"hash_algo": "sha256"}` is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignerConfig {
    /// Identifier of the signing party. Mixed into the scope string and the
    /// first key-derivation round as additional entropy, so one client
    /// keypair used with two signing parties yields unrelated signatures.
    pub self_key: String,

    /// Hash algorithm for every digest and HMAC round of the pipeline.
    pub hash_algo: HashAlgo,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            self_key: DEFAULT_SELF_KEY.to_string(),
            hash_algo: HashAlgo::default(),
        }
    }
}
