use thiserror::Error;

/// Rejections raised while constructing a [`Signer`](crate::Signer) or
/// parsing a hash algorithm name.
///
/// Configuration errors are fatal to the instance being built; a `Signer`
/// either validates completely or does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// `client_id` was empty.
    #[error("client_id must not be empty")]
    EmptyClientId,

    /// `client_secret` was empty.
    #[error("client_secret must not be empty")]
    EmptyClientSecret,

    /// A hash algorithm name matched none of the supported algorithms.
    #[error("unsupported hash algorithm {0:?} (expected sha256, sha384 or sha512)")]
    UnsupportedHashAlgo(String),
}

/// Rejections raised while canonicalizing a payload for signing.
///
/// No partial result is ever returned alongside one of these; the payload is
/// either signed whole or not at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// A payload value was an array or object. Only scalar values (strings,
    /// numbers, booleans, null) have a canonical string form.
    #[error("payload field {field:?} is not a scalar value")]
    NonScalarValue {
        /// Name of the offending payload field.
        field: String,
    },
}
