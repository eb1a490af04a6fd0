//! Template signature: `hex(md5(payload + secret))`.
//!
//! This is the integrity checksum the reporting API verifies against its
//! copy of the shared secret. It is not an HMAC and offers no authenticity
//! guarantee; changing the construction requires a matching server change.

/// Holds the shared secret and signs serialized templates.
#[derive(Clone)]
pub struct Signer {
    secret: String,
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl Signer {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Sign the exact text that will be sent as `pluginData`.
    pub fn sign(&self, payload: &str) -> String {
        sign(payload, &self.secret)
    }
}

/// Compute the 32-char lowercase hex digest of `payload` followed by `secret`.
pub fn sign(payload: &str, secret: &str) -> String {
    let mut context = md5::Context::new();
    context.consume(payload.as_bytes());
    context.consume(secret.as_bytes());
    format!("{:x}", context.compute())
}
