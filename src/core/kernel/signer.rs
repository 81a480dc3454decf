use crate::core::errors::ExchangeError;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, Secret};
use sha2::Sha256;
use std::collections::HashMap;

type HmacSha256 = Hmac<Sha256>;

/// Result type for signing operations: (headers, `query_params`)
pub type SignatureResult = Result<(HashMap<String, String>, Vec<(String, String)>), ExchangeError>;

/// Signer trait for request authentication
///
/// Transport-facing seam: a REST client that only knows raw query strings
/// hands them to a signer and gets back the headers and the full, signed
/// parameter list to send.
pub trait Signer: Send + Sync {
    /// Sign a request and return headers and query parameters
    ///
    /// # Arguments
    /// * `method` - HTTP method (GET, POST, etc.)
    /// * `endpoint` - API endpoint path
    /// * `query_string` - Query string (without leading '?')
    /// * `body` - Raw request body bytes
    /// * `timestamp` - Request timestamp in milliseconds
    ///
    /// # Returns
    /// Tuple of (headers, signed_query_params) to include in the request
    fn sign_request(
        &self,
        method: &str,
        endpoint: &str,
        query_string: &str,
        body: &[u8],
        timestamp: u64,
    ) -> SignatureResult;
}

/// HMAC-SHA256 keyed by a secret, hex output.
pub struct HmacSigner {
    secret_key: Secret<String>,
}

impl HmacSigner {
    pub fn new(secret_key: String) -> Self {
        Self {
            secret_key: Secret::new(secret_key),
        }
    }

    /// Signs `payload` and returns the 64-character lowercase hex digest.
    pub fn sign(&self, payload: &[u8]) -> String {
        hmac_sha256_hex(self.secret_key.expose_secret().as_bytes(), payload)
    }
}

impl std::fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSigner")
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

#[must_use]
pub fn hmac_sha256_hex(key: &[u8], payload: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc4231_case_2() {
        let digest = hmac_sha256_hex(b"Jefe", b"what do ya want for nothing?");
        assert_eq!(
            digest,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_sign_is_deterministic_lowercase_hex() {
        let signer = HmacSigner::new("S".to_string());
        let first = signer.sign(b"symbol=BTC-USDT&timestamp=1700000000000");
        let second = signer.sign(b"symbol=BTC-USDT&timestamp=1700000000000");

        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        assert_eq!(
            first,
            "a747eaa19a848d1d5177d0b9b70fd065ce2ad01d9aa5b07390e44d6270f007e3"
        );
    }

    #[test]
    fn test_single_byte_changes_digest() {
        let payload = b"symbol=BTC-USDT&timestamp=1700000000000";
        let base = HmacSigner::new("S".to_string()).sign(payload);

        assert_ne!(base, HmacSigner::new("T".to_string()).sign(payload));
        assert_ne!(
            base,
            HmacSigner::new("S".to_string()).sign(b"symbol=BTC-USDT&timestamp=1700000000001")
        );
    }

    #[test]
    fn test_empty_secret_still_signs() {
        let digest = HmacSigner::new(String::new()).sign(b"timestamp=1");
        assert_eq!(digest.len(), 64);
    }

    #[test]
    fn test_debug_hides_secret() {
        let signer = HmacSigner::new("super-secret".to_string());
        assert!(!format!("{:?}", signer).contains("super-secret"));
    }
}
