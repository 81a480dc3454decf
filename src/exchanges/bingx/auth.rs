use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{
    canonical_query, keysort, signed_query, HmacSigner, SystemClock, TimeProvider,
};
use crate::core::traits::RequestAuthenticator;
use crate::core::types::{HeaderMap, ParamMap, RestRequest, WsAuthMessage, WsRequest};
use crate::exchanges::bingx::constants::{
    API_KEY_HEADER, BROKER_ID, REFERRAL_HEADER, SIGNATURE_PARAM, SOURCE_KEY, SOURCE_KEY_HEADER,
    TIMESTAMP_PARAM, WS_AUTH_EXPIRY_MS, WS_AUTH_PREFIX,
};
use std::sync::Arc;
use tracing::{debug, instrument, trace};

/// BingX request authenticator.
///
/// Holds one API key pair for its whole lifetime and is otherwise stateless,
/// so a single instance can be shared across tasks behind an `Arc`.
pub struct BingxAuth {
    api_key: String,
    signer: HmacSigner,
    clock: Arc<dyn TimeProvider>,
}

impl BingxAuth {
    /// Create an authenticator reading time from the system clock.
    ///
    /// Credentials are not checked here; an empty key still yields a
    /// well-formed signature that the venue will reject. Use
    /// [`BingxAuth::from_config`] to fail fast instead.
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            signer: HmacSigner::new(secret_key.into()),
            clock: Arc::new(SystemClock),
        }
    }

    /// Create an authenticator from validated configuration.
    pub fn from_config(config: &ExchangeConfig) -> Result<Self, ExchangeError> {
        config.validate()?;
        debug!(exchange = "bingx", "created request authenticator");
        Ok(Self::new(config.api_key(), config.secret_key()))
    }

    /// Replace the time source used for timestamps and handshake expiries.
    pub fn with_time_provider(mut self, clock: Arc<dyn TimeProvider>) -> Self {
        self.clock = clock;
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Add `timestamp` and `signature` to a parameter set.
    ///
    /// Stale auth entries from an earlier signing pass are replaced, and the
    /// old signature is never part of what gets signed. The API key is not
    /// added to the signed set; it only travels in the header.
    pub fn add_auth_to_params(
        &self,
        params: Option<ParamMap>,
        timestamp: u64,
    ) -> Result<ParamMap, ExchangeError> {
        let mut request_params = keysort(params.unwrap_or_default());
        request_params.remove(SIGNATURE_PARAM);
        request_params.insert(TIMESTAMP_PARAM.to_string(), timestamp.to_string());

        let payload = canonical_query(&request_params)?;
        let signature = self.signer.sign(payload.as_bytes());
        request_params.insert(SIGNATURE_PARAM.to_string(), signature);

        Ok(request_params)
    }

    /// Headers identifying the caller on every private REST call.
    pub fn header_for_authentication(&self) -> HeaderMap {
        HeaderMap::from([
            (API_KEY_HEADER.to_string(), self.api_key.clone()),
            (SOURCE_KEY_HEADER.to_string(), SOURCE_KEY.to_string()),
        ])
    }

    /// Broker attribution header. Independent of authentication; the
    /// transport may merge it into any request.
    pub fn referral_headers() -> HeaderMap {
        HeaderMap::from([(REFERRAL_HEADER.to_string(), BROKER_ID.to_string())])
    }

    /// Sign a REST request with the current time.
    ///
    /// Headers already present on the request take precedence over the
    /// generated identification headers.
    #[instrument(skip_all, fields(exchange = "bingx", method = %request.method, endpoint = %request.endpoint))]
    pub fn rest_authenticate(&self, request: RestRequest) -> Result<RestRequest, ExchangeError> {
        let timestamp = self.clock.now_millis();
        self.rest_authenticate_at(request, timestamp)
    }

    /// Sign a REST request with an explicit timestamp.
    pub fn rest_authenticate_at(
        &self,
        mut request: RestRequest,
        timestamp: u64,
    ) -> Result<RestRequest, ExchangeError> {
        let params = self.add_auth_to_params(request.params.take(), timestamp)?;
        trace!(param_count = params.len(), timestamp, "signed request parameters");
        request.params = Some(params);

        let mut headers = self.header_for_authentication();
        if let Some(existing) = request.headers.take() {
            headers.extend(existing);
        }
        request.headers = Some(headers);

        Ok(request)
    }

    /// Wire query string of a signed request, signature last.
    pub fn query_string(request: &RestRequest) -> Result<String, ExchangeError> {
        match &request.params {
            Some(params) => signed_query(params, SIGNATURE_PARAM),
            None => Ok(String::new()),
        }
    }

    /// BingX authenticates the connection once via [`BingxAuth::ws_auth_message`];
    /// individual streaming requests pass through untouched.
    pub fn ws_authenticate(&self, request: WsRequest) -> WsRequest {
        request
    }

    /// Build the handshake that authenticates a streaming connection.
    ///
    /// The expiry is time-bound, so call this again for every (re)connect.
    #[instrument(skip_all, fields(exchange = "bingx"))]
    pub fn ws_auth_message(&self) -> WsAuthMessage {
        let expires = self.clock.now_millis() + WS_AUTH_EXPIRY_MS;
        let payload = format!("{}{}", WS_AUTH_PREFIX, expires);
        let signature = self.signer.sign(payload.as_bytes());
        debug!(expires, "built streaming auth handshake");

        WsAuthMessage::new(self.api_key.clone(), expires, signature)
    }
}

impl RequestAuthenticator for BingxAuth {
    fn rest_authenticate(&self, request: RestRequest) -> Result<RestRequest, ExchangeError> {
        Self::rest_authenticate(self, request)
    }

    fn ws_authenticate(&self, request: WsRequest) -> Result<WsRequest, ExchangeError> {
        Ok(Self::ws_authenticate(self, request))
    }
}

impl std::fmt::Debug for BingxAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BingxAuth")
            .field(
                "api_key",
                &format!("{}...", self.api_key.chars().take(4).collect::<String>()),
            )
            .field("secret_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kernel::FixedClock;
    use crate::core::types::RestMethod;
    use serde_json::json;

    const TS: u64 = 1_700_000_000_000;

    fn fixed_auth() -> BingxAuth {
        BingxAuth::new("K", "S").with_time_provider(Arc::new(FixedClock(TS)))
    }

    #[test]
    fn test_rest_authenticate_pinned_vector() {
        let request = RestRequest::get("/openApi/spot/v1/account/balance")
            .with_param("symbol", "BTC-USDT");

        let signed = fixed_auth().rest_authenticate(request).unwrap();
        let params = signed.params.as_ref().unwrap();

        assert_eq!(
            params.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["signature", "symbol", "timestamp"]
        );
        assert_eq!(signed.param("timestamp"), Some("1700000000000"));
        assert_eq!(
            signed.param("signature"),
            Some("a747eaa19a848d1d5177d0b9b70fd065ce2ad01d9aa5b07390e44d6270f007e3")
        );
        assert_eq!(signed.method, RestMethod::Get);
        assert_eq!(signed.endpoint, "/openApi/spot/v1/account/balance");
    }

    #[test]
    fn test_rest_authenticate_without_params() {
        let signed = fixed_auth()
            .rest_authenticate(RestRequest::get("/openApi/spot/v1/account/balance"))
            .unwrap();

        assert_eq!(signed.params.as_ref().unwrap().len(), 2);
        assert_eq!(
            signed.param("signature"),
            Some("9831094698748824c68b873b7fe9451f930c30ee4ba83b895628a72c4d8f4ead")
        );
    }

    #[test]
    fn test_api_key_is_not_signed() {
        let signed = fixed_auth()
            .rest_authenticate(RestRequest::get("/x").with_param("symbol", "BTC-USDT"))
            .unwrap();

        assert!(signed.param("api_key").is_none());
        assert!(signed.param("apiKey").is_none());
        assert_eq!(signed.header(API_KEY_HEADER), Some("K"));
    }

    #[test]
    fn test_identification_headers_added() {
        let signed = fixed_auth()
            .rest_authenticate(RestRequest::post("/openApi/spot/v1/trade/order"))
            .unwrap();

        assert_eq!(signed.header(API_KEY_HEADER), Some("K"));
        assert_eq!(signed.header(SOURCE_KEY_HEADER), Some(SOURCE_KEY));
        assert!(signed.header(REFERRAL_HEADER).is_none());
    }

    #[test]
    fn test_existing_headers_take_precedence() {
        let request = RestRequest::get("/x")
            .with_header(API_KEY_HEADER, "custom")
            .with_header("Content-Type", "application/json");

        let signed = fixed_auth().rest_authenticate(request).unwrap();

        assert_eq!(signed.header(API_KEY_HEADER), Some("custom"));
        assert_eq!(signed.header(SOURCE_KEY_HEADER), Some(SOURCE_KEY));
        assert_eq!(signed.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn test_reauthentication_replaces_stale_auth_params() {
        let auth = fixed_auth();
        let first = auth
            .rest_authenticate_at(RestRequest::get("/x").with_param("symbol", "BTC-USDT"), 1)
            .unwrap();
        let second = auth.rest_authenticate_at(first, TS).unwrap();

        assert_eq!(second.params.as_ref().unwrap().len(), 3);
        assert_eq!(second.param("timestamp"), Some("1700000000000"));
        // Same as signing the fresh request: the stale signature is not in the payload.
        assert_eq!(
            second.param("signature"),
            Some("a747eaa19a848d1d5177d0b9b70fd065ce2ad01d9aa5b07390e44d6270f007e3")
        );
    }

    #[test]
    fn test_query_string_of_signed_request() {
        let signed = fixed_auth()
            .rest_authenticate(RestRequest::get("/x").with_param("symbol", "BTC-USDT"))
            .unwrap();

        assert_eq!(
            BingxAuth::query_string(&signed).unwrap(),
            "symbol=BTC-USDT&timestamp=1700000000000\
             &signature=a747eaa19a848d1d5177d0b9b70fd065ce2ad01d9aa5b07390e44d6270f007e3"
        );
        assert_eq!(BingxAuth::query_string(&RestRequest::get("/x")).unwrap(), "");
    }

    #[test]
    fn test_ws_authenticate_is_identity() {
        let request = WsRequest::new(json!({
            "id": "e745cd6d-d0f6-4a70-8d5a-043e4c741b40",
            "reqType": "sub",
            "dataType": "BTC-USDT@depth"
        }));

        let auth = fixed_auth();
        assert_eq!(auth.ws_authenticate(request.clone()), request);
        assert_eq!(
            RequestAuthenticator::ws_authenticate(&auth, request.clone()).unwrap(),
            request
        );
    }

    #[test]
    fn test_ws_auth_message_pinned_vector() {
        let message = fixed_auth().ws_auth_message();

        assert_eq!(message.op, "auth");
        assert_eq!(message.api_key(), "K");
        assert_eq!(message.expires(), TS + 10_000);
        assert_eq!(
            message.signature(),
            "4841ffbc502afac7804302743836cc8c35342da249045b46b383874c8b3f7162"
        );
    }

    #[test]
    fn test_from_config_rejects_empty_secret() {
        let config = ExchangeConfig::new("K".to_string(), String::new());
        let err = BingxAuth::from_config(&config).unwrap_err();
        assert!(matches!(err, ExchangeError::ConfigError(_)));
    }

    #[test]
    fn test_new_accepts_empty_credentials() {
        let auth = BingxAuth::new("", "").with_time_provider(Arc::new(FixedClock(TS)));
        let signed = auth.rest_authenticate(RestRequest::get("/x")).unwrap();
        assert_eq!(signed.param("signature").map(str::len), Some(64));
    }

    #[test]
    fn test_referral_headers() {
        let headers = BingxAuth::referral_headers();
        assert_eq!(headers.get(REFERRAL_HEADER).map(String::as_str), Some(BROKER_ID));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_debug_hides_secret() {
        let auth = BingxAuth::new("abcdefgh", "very-secret");
        let debug = format!("{:?}", auth);
        assert!(!debug.contains("very-secret"));
        assert!(!debug.contains("abcdefgh"));
        assert!(debug.contains("abcd..."));
    }
}
