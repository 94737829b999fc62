//! GitHub webhook signature verification.
//!
//! GitHub signs the raw request body with HMAC-SHA256 and sends the digest in
//! the `X-Hub-Signature-256` header as `sha256=<hex>`. The secret is injected
//! at construction so the verifier can be exercised in isolation.

use ring::hmac::{self, Key};

use crate::util::constant_time_cmp;

pub const HMAC_PREFIX: &str = "sha256=";

pub struct SignatureVerifier {
    key: Key,
}

impl SignatureVerifier {
    pub fn new(secret: &str) -> Self {
        let key = Key::new(hmac::HMAC_SHA256, secret.as_bytes());
        Self { key }
    }

    /// Computes the signature header value this verifier would accept for
    /// `body`.
    pub fn sign(&self, body: &[u8]) -> String {
        let signed = hmac::sign(&self.key, body);
        format!("{}{}", HMAC_PREFIX, hex::encode(signed))
    }

    /// Constant-time check of a caller-supplied signature against the raw
    /// body bytes. Anything malformed (wrong length, missing prefix) is
    /// simply "not verified" - this never errors.
    pub fn verify(&self, body: &[u8], supplied: &str) -> bool {
        let expected = self.sign(body);
        constant_time_cmp(&expected, supplied)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_roundtrip_verifies() {
        let verifier = SignatureVerifier::new("test_secret");
        let body = br#"{"ref":"refs/heads/main"}"#;

        let sig = verifier.sign(body);
        assert!(sig.starts_with(HMAC_PREFIX));
        assert!(verifier.verify(body, &sig));
    }

    #[test]
    fn test_body_mutation_rejected() {
        let verifier = SignatureVerifier::new("test_secret");
        let sig = verifier.sign(b"payload-a");

        assert!(!verifier.verify(b"payload-b", &sig));
    }

    #[test]
    fn test_signature_mutation_rejected() {
        let verifier = SignatureVerifier::new("test_secret");
        let mut sig = verifier.sign(b"payload").into_bytes();

        // flip one hex character
        let last = sig.len() - 1;
        sig[last] = if sig[last] == b'0' { b'1' } else { b'0' };

        assert!(!verifier.verify(b"payload", std::str::from_utf8(&sig).unwrap()));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let signer = SignatureVerifier::new("secret_one");
        let verifier = SignatureVerifier::new("secret_two");

        let sig = signer.sign(b"payload");
        assert!(!verifier.verify(b"payload", &sig));
    }

    #[test]
    fn test_malformed_signature_rejected_without_panic() {
        let verifier = SignatureVerifier::new("test_secret");

        assert!(!verifier.verify(b"payload", ""));
        assert!(!verifier.verify(b"payload", "sha256="));
        assert!(!verifier.verify(b"payload", "not-even-hex"));
    }
}
