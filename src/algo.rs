use std::fmt;
use std::str::FromStr;

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::error::ConfigurationError;

/// Hash algorithm backing every stage of the signing pipeline: the unkeyed
/// scope/context digests, the key-derivation chain, and the final keyed
/// digest.
///
/// The set is closed on purpose. A signer can only be configured with one of
/// these variants, so an unsupported or weak hash (MD5, SHA-1) can never
/// reach the pipeline; names coming from configuration go through
/// [`FromStr`] and are rejected there. The default matches the reference
/// deployment, SHA-512.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgo {
    Sha256,
    Sha384,
    #[default]
    Sha512,
}

impl HashAlgo {
    /// Lowercase algorithm name, e.g. `"sha512"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgo::Sha256 => "sha256",
            HashAlgo::Sha384 => "sha384",
            HashAlgo::Sha512 => "sha512",
        }
    }

    /// Digest length in bytes. A hex signature is twice this many characters.
    pub fn output_len(&self) -> usize {
        match self {
            HashAlgo::Sha256 => 32,
            HashAlgo::Sha384 => 48,
            HashAlgo::Sha512 => 64,
        }
    }

    /// Lowercase hex digest of `data` with the unkeyed hash.
    pub(crate) fn hex_digest(&self, data: &[u8]) -> String {
        match self {
            HashAlgo::Sha256 => hex_digest::<Sha256>(data),
            HashAlgo::Sha384 => hex_digest::<Sha384>(data),
            HashAlgo::Sha512 => hex_digest::<Sha512>(data),
        }
    }

    /// Raw HMAC of `message` under `key`.
    pub(crate) fn keyed_digest(&self, key: &[u8], message: &[u8]) -> Vec<u8> {
        match self {
            HashAlgo::Sha256 => keyed_digest::<Hmac<Sha256>>(key, message),
            HashAlgo::Sha384 => keyed_digest::<Hmac<Sha384>>(key, message),
            HashAlgo::Sha512 => keyed_digest::<Hmac<Sha512>>(key, message),
        }
    }
}

impl fmt::Display for HashAlgo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgo {
    type Err = ConfigurationError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        if name.eq_ignore_ascii_case("sha256") {
            Ok(HashAlgo::Sha256)
        } else if name.eq_ignore_ascii_case("sha384") {
            Ok(HashAlgo::Sha384)
        } else if name.eq_ignore_ascii_case("sha512") {
            Ok(HashAlgo::Sha512)
        } else {
            Err(ConfigurationError::UnsupportedHashAlgo(name.to_string()))
        }
    }
}

fn hex_digest<D: Digest>(data: &[u8]) -> String {
    hex::encode(D::digest(data))
}

fn keyed_digest<M: Mac + KeyInit>(key: &[u8], message: &[u8]) -> Vec<u8> {
    let mut mac = <M as Mac>::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(message);
    mac.finalize().into_bytes().to_vec()
}
