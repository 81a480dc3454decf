use crate::core::{
    errors::ExchangeError,
    types::{RestRequest, WsRequest},
};

/// Turns outgoing requests into ones the venue accepts as authenticated.
///
/// Transports hold an `Arc<dyn RequestAuthenticator>` and route every private
/// call through it just before sending.
pub trait RequestAuthenticator: Send + Sync {
    /// Sign a REST request, returning the request with auth params and headers added.
    fn rest_authenticate(&self, request: RestRequest) -> Result<RestRequest, ExchangeError>;

    /// Prepare a streaming request. Venues that authenticate the connection
    /// once at handshake time return the request unchanged.
    fn ws_authenticate(&self, request: WsRequest) -> Result<WsRequest, ExchangeError>;
}
