use std::fmt;

use serde_json::{Map, Value};
use zeroize::Zeroizing;

use crate::algo::HashAlgo;
use crate::config::SignerConfig;
use crate::error::{ConfigurationError, PayloadError};

/// Fixed purpose tag ending both the scope string and the key-derivation
/// chain.
const SIGNING_PURPOSE: &str = "signer";

/// Signs payloads on behalf of a client keypair.
///
/// The client party holds a public identifier (`client_id`) and a shared
/// secret (`client_secret`) known only to the client and the signing party.
/// The signing party mixes in its own `self_key`, so the same keypair used
/// with two signing parties yields unrelated signatures.
///
/// A `Signer` is immutable after construction. Its methods take `&self` and
/// only clone or derive from their inputs, so one instance can be shared
/// freely across threads.
pub struct Signer {
    client_id: String,
    client_secret: String,
    config: SignerConfig,
}

impl Signer {
    /// Creates a signer with the default configuration (`self_key` `"WePay"`,
    /// SHA-512).
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        Self::with_config(client_id, client_secret, SignerConfig::default())
    }

    /// Creates a signer with an explicit configuration. The configuration is
    /// owned by the new instance and cannot change afterwards.
    pub fn with_config(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        config: SignerConfig,
    ) -> Result<Self, ConfigurationError> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();
        if client_id.is_empty() {
            return Err(ConfigurationError::EmptyClientId);
        }
        if client_secret.is_empty() {
            return Err(ConfigurationError::EmptyClientSecret);
        }
        Ok(Self {
            client_id,
            client_secret,
            config,
        })
    }

    /// Public identifier of the client party.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Identifier of the signing party.
    pub fn self_key(&self) -> &str {
        &self.config.self_key
    }

    /// Hash algorithm backing every digest and HMAC round.
    pub fn hash_algo(&self) -> HashAlgo {
        self.config.hash_algo
    }

    /// Signs `payload` and returns the signature as lowercase hex.
    ///
    /// The instance's `client_id` and `client_secret` are injected into a
    /// copy of the payload before canonicalization, replacing any
    /// caller-supplied values for those two fields. The caller's map is left
    /// untouched. For a fixed identity, configuration, and payload the
    /// digest is identical on every call, regardless of the order keys were
    /// inserted in.
    pub fn sign(&self, payload: &Map<String, Value>) -> Result<String, PayloadError> {
        let mut merged = payload.clone();
        merged.insert(
            "client_id".to_string(),
            Value::String(self.client_id.clone()),
        );
        merged.insert(
            "client_secret".to_string(),
            Value::String(self.client_secret.clone()),
        );

        let scope = self.create_scope();
        let context = create_context(&merged)?;
        let string_to_sign = self.create_string_to_sign(&scope, &context);
        let signing_key = self.derive_signing_key();

        let signature = hex::encode(
            self.config
                .hash_algo
                .keyed_digest(&signing_key, string_to_sign.as_bytes()),
        );
        tracing::debug!(
            client_id = %self.client_id,
            hash_algo = %self.config.hash_algo,
            fields = payload.len(),
            "signed payload"
        );
        Ok(signature)
    }

    /// Signs `payload` and renders the parameters to append to a request
    /// URL: every payload field plus `client_id` and the signature under
    /// `stoken`, as `key=value` pairs sorted by key and joined with `&`.
    ///
    /// A caller-supplied `client_secret` field is dropped first; the secret
    /// is never valid to transmit. Values are emitted verbatim with their
    /// original case and no percent-encoding, so escaping for URL use is the
    /// caller's responsibility. The caller's map is not modified.
    pub fn generate_query_string_params(
        &self,
        payload: &Map<String, Value>,
    ) -> Result<String, PayloadError> {
        let mut params = payload.clone();
        params.remove("client_secret");

        let signed_token = self.sign(&params)?;
        params.insert(
            "client_id".to_string(),
            Value::String(self.client_id.clone()),
        );
        params.insert("stoken".to_string(), Value::String(signed_token));

        let mut pairs: Vec<(&String, &Value)> = params.iter().collect();
        pairs.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));

        let mut query = Vec::with_capacity(pairs.len());
        for (key, value) in pairs {
            query.push(format!("{key}={}", render_scalar(key, value)?));
        }
        tracing::debug!(
            client_id = %self.client_id,
            fields = query.len(),
            "generated query string params"
        );
        Ok(query.join("&"))
    }

    /// Scope a signature is valid in: `{self_key}/{client_id}/signer`.
    fn create_scope(&self) -> String {
        format!(
            "{}/{}/{}",
            self.config.self_key, self.client_id, SIGNING_PURPOSE
        )
    }

    /// Assembles the string-to-sign: the algorithm tag, the signing party,
    /// the client id, and the unkeyed hex digests of scope and context, five
    /// lines joined by `\n` with no trailing newline. This layout is the
    /// cross-implementation contract; any byte of deviation produces
    /// signatures other parties cannot reproduce.
    fn create_string_to_sign(&self, scope: &str, context: &str) -> String {
        let algo = self.config.hash_algo;
        format!(
            "SIGNER-HMAC-{}\n{}\n{}\n{}\n{}",
            algo.as_str().to_uppercase(),
            self.config.self_key,
            self.client_id,
            algo.hex_digest(scope.as_bytes()),
            algo.hex_digest(context.as_bytes()),
        )
    }

    /// Derives the key for the final signature through three chained HMAC
    /// rounds: secret keyed over `self_key`, that result over `client_id`,
    /// and that result over the fixed `"signer"` tag. Each round narrows the
    /// scope a leaked intermediate would be valid for. The result never
    /// leaves this module and is wiped on drop.
    fn derive_signing_key(&self) -> Zeroizing<Vec<u8>> {
        let algo = self.config.hash_algo;
        let self_key_round = Zeroizing::new(algo.keyed_digest(
            self.client_secret.as_bytes(),
            self.config.self_key.as_bytes(),
        ));
        let client_id_round =
            Zeroizing::new(algo.keyed_digest(&self_key_round, self.client_id.as_bytes()));
        Zeroizing::new(algo.keyed_digest(&client_id_round, SIGNING_PURPOSE.as_bytes()))
    }
}

/// `client_secret` must never leak into logs through a stray `{:?}`.
impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("config", &self.config)
            .finish()
    }
}

/// Builds the canonical context string for a payload.
///
/// Every entry renders as `"{key}={value}\n"` with key and value lowercased,
/// and the rendered lines are then sorted byte-wise. After the lines comes a
/// blank line and the `;`-joined field names, original case, sorted in their
/// own order.
///
/// NOTE: sorting happens on the formatted lines, not on the keys. The two
/// differ when one key is a strict prefix of another (`page` / `page2`: `'2'`
/// sorts before `'='`), and deployed verifiers expect the line order, so it
/// must stay this way.
fn create_context(payload: &Map<String, Value>) -> Result<String, PayloadError> {
    let mut lines = Vec::with_capacity(payload.len());
    for (key, value) in payload {
        let rendered = render_scalar(key, value)?;
        lines.push(format!(
            "{}={}\n",
            key.to_lowercase(),
            rendered.to_lowercase()
        ));
    }
    lines.sort_unstable();

    let mut fields: Vec<&str> = payload.keys().map(String::as_str).collect();
    fields.sort_unstable();

    let mut context = lines.concat();
    context.push('\n');
    context.push_str(&fields.join(";"));
    Ok(context)
}

/// Renders a scalar payload value as its plain string form: strings pass
/// through unquoted, numbers and booleans as they display, null as `null`.
fn render_scalar(key: &str, value: &Value) -> Result<String, PayloadError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        Value::Array(_) | Value::Object(_) => Err(PayloadError::NonScalarValue {
            field: key.to_string(),
        }),
    }
}
