use crate::core::errors::ExchangeError;
use crate::core::kernel::{keysort, SignatureResult, Signer};
use crate::exchanges::bingx::auth::BingxAuth;
use crate::exchanges::bingx::constants::SIGNATURE_PARAM;

impl Signer for BingxAuth {
    /// Sign a raw query string for transports that do not build a
    /// [`RestRequest`](crate::core::types::RestRequest).
    ///
    /// Returned params are in canonical order with `signature` last. Repeated
    /// keys in `query_string` keep their last value.
    fn sign_request(
        &self,
        _method: &str,
        _endpoint: &str,
        query_string: &str,
        body: &[u8],
        timestamp: u64,
    ) -> SignatureResult {
        if !body.is_empty() {
            return Err(ExchangeError::InvalidParameters(
                "BingX signs query parameters only; send body fields as parameters".to_string(),
            ));
        }

        let params: Vec<(String, String)> = serde_urlencoded::from_str(query_string)
            .map_err(|e| ExchangeError::InvalidParameters(format!("Invalid query string: {}", e)))?;

        let mut signed = self.add_auth_to_params(Some(keysort(params)), timestamp)?;
        let signature = signed
            .remove(SIGNATURE_PARAM)
            .ok_or_else(|| ExchangeError::AuthError("Signature missing after signing".to_string()))?;

        let mut signed_params: Vec<(String, String)> = signed.into_iter().collect();
        signed_params.push((SIGNATURE_PARAM.to_string(), signature));

        Ok((self.header_for_authentication(), signed_params))
    }
}
