//! Deterministic keyed signing of request payloads on behalf of a client
//! keypair, in the style of a stripped-down AWS Signature v4.
//!
//! A [`Signer`] binds a client identity (`client_id`, `client_secret`), a
//! signing-party identifier (`self_key`), and a flat payload of scalar
//! fields into one reproducible lowercase-hex digest. The pipeline
//! canonicalizes the payload (lowercased `key=value` lines, sorted after
//! rendering, plus the sorted original-case field names), hashes the scope
//! and context, assembles a five-line string-to-sign, derives the HMAC key
//! through a three-round chain (secret over `self_key`, then `client_id`,
//! then the fixed `signer` tag), and signs. Anyone holding the same secret
//! and configuration reproduces the digest byte for byte; nobody else can.
//!
//! [`Signer::generate_query_string_params`] wraps the same signature into
//! ready-to-append URL parameters, with the signature under `stoken`.
//!
//! ```
//! use serde_json::json;
//! use wepay_signer::Signer;
//!
//! let signer = Signer::new("1234", "abcd")?;
//! let payload = json!({
//!     "token": "TOK",
//!     "page": "https://go.wepay.com/x",
//!     "redirect_uri": "https://partner.example/cb"
//! });
//! let payload = payload.as_object().expect("payload is an object");
//!
//! let signature = signer.sign(payload)?;
//! assert_eq!(signature.len(), 128); // SHA-512 digest in hex
//!
//! let query = signer.generate_query_string_params(payload)?;
//! assert!(query.starts_with("client_id=1234&page="));
//! assert!(query.contains(&format!("stoken={signature}")));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod algo;
mod config;
mod error;
mod signer;

pub use algo::HashAlgo;
pub use config::{DEFAULT_SELF_KEY, SignerConfig};
pub use error::{ConfigurationError, PayloadError};
pub use signer::Signer;
