use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Request parameters in canonical (byte-wise ascending key) order.
pub type ParamMap = BTreeMap<String, String>;

/// HTTP headers to attach to an outgoing request.
pub type HeaderMap = HashMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RestMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl RestMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for RestMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outgoing REST call as seen by the authentication layer.
///
/// `params` and `headers` are optional so that "no parameters" and "empty
/// parameters" can both be expressed by the transport; authentication always
/// leaves both populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestRequest {
    pub method: RestMethod,
    pub endpoint: String,
    pub params: Option<ParamMap>,
    pub headers: Option<HeaderMap>,
}

impl RestRequest {
    pub fn new(method: RestMethod, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            params: None,
            headers: None,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(RestMethod::Get, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(RestMethod::Post, endpoint)
    }

    /// Add a query/body parameter. Values are stored in their string form.
    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params
            .get_or_insert_with(ParamMap::new)
            .insert(key.into(), value.to_string());
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HeaderMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.as_ref()?.get(key).map(String::as_str)
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.as_ref()?.get(key).map(String::as_str)
    }
}

/// A streaming-channel request. Opaque to authentication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WsRequest {
    pub payload: serde_json::Value,
}

impl WsRequest {
    pub fn new(payload: serde_json::Value) -> Self {
        Self { payload }
    }
}

/// Positional arguments of the streaming auth handshake:
/// `[api_key, expires_ms, signature]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WsAuthArgs(pub String, pub u64, pub String);

/// Handshake sent once per streaming connection before subscribing to
/// private channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WsAuthMessage {
    pub op: String,
    pub args: WsAuthArgs,
}

impl WsAuthMessage {
    pub const OP: &'static str = "auth";

    pub fn new(api_key: String, expires: u64, signature: String) -> Self {
        Self {
            op: Self::OP.to_string(),
            args: WsAuthArgs(api_key, expires, signature),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.args.0
    }

    pub const fn expires(&self) -> u64 {
        self.args.1
    }

    pub fn signature(&self) -> &str {
        &self.args.2
    }

    /// Wire text, ready to be sent as a text frame.
    pub fn to_json(&self) -> Result<String, crate::core::errors::ExchangeError> {
        Ok(serde_json::to_string(self)?)
    }
}
